//! Shared browser utilities
//!
//! Console bindings, the clock and lookups of the global objects every
//! component needs.

use babymode_core::Size;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

#[wasm_bindgen]
extern "C" {
    /// Console.log binding for WASM
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    pub fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn error(s: &str);

    #[wasm_bindgen(js_namespace = Date, js_name = now)]
    fn date_now() -> f64;
}

/// Milliseconds on a monotonic clock, falling back to wall time
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(date_now)
}

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

pub fn body() -> Result<HtmlElement, JsValue> {
    document()?
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))
}

/// `innerWidth` x `innerHeight`
pub fn viewport() -> Size {
    let Some(window) = web_sys::window() else {
        return Size::ZERO;
    };
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(read(window.inner_width()), read(window.inner_height()))
}

/// `Math.random()`
pub fn random_unit() -> f64 {
    js_sys::Math::random()
}

/// Best-effort human readable text for a thrown value
pub fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Ok(message) = js_sys::Reflect::get(value, &"message".into()) {
        if let Some(s) = message.as_string() {
            return s;
        }
    }
    format!("{:?}", value)
}

/// Look up `name` on `target` and call it if it is a function.
///
/// Returns `None` when the method does not exist.
pub fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Option<Result<JsValue, JsValue>> {
    let method = js_sys::Reflect::get(target, &JsValue::from_str(name)).ok()?;
    let function = method.dyn_ref::<js_sys::Function>()?;
    let array = args.iter().collect::<js_sys::Array>();
    Some(function.apply(target, &array))
}
