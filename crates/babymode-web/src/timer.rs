//! `setTimeout` handles

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::util::{error, window};

/// A pending timeout, cancelled when dropped
pub struct Timeout {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// Run `callback` once after `delay_ms`
    pub fn new<F>(delay_ms: f64, callback: F) -> Result<Self, JsValue>
    where
        F: FnOnce() + 'static,
    {
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(callback) = callback.take() {
                callback();
            }
        }) as Box<dyn FnMut()>);

        let id = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms.max(0.0).round() as i32,
        )?;

        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}

/// Run `callback` after `delay_ms` with no handle to cancel it.
///
/// The closure frees itself after it runs.
pub fn defer<F>(delay_ms: f64, callback: F)
where
    F: FnOnce() + 'static,
{
    let closure = Closure::once_into_js(callback);
    let scheduled = window().and_then(|w| {
        w.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.unchecked_ref(),
            delay_ms.max(0.0).round() as i32,
        )
    });
    if let Err(e) = scheduled {
        error(&format!("[timer] setTimeout failed: {:?}", e));
    }
}
