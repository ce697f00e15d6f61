//! Fullscreen, orientation and battery over the real browser APIs
//!
//! Most of these are missing or vendor-prefixed somewhere, so they are looked
//! up dynamically instead of through typed bindings.

use babymode_core::{BatteryStatus, CapabilityError, CapabilityProvider, Orientation, Support};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::util::{call_method, describe, document, log, window};

const REQUEST_FULLSCREEN: [&str; 3] = [
    "requestFullscreen",
    "webkitRequestFullscreen",
    "msRequestFullscreen",
];

const EXIT_FULLSCREEN: [&str; 3] = ["exitFullscreen", "webkitExitFullscreen", "msExitFullscreen"];

/// [`CapabilityProvider`] backed by `window`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCapabilities;

impl BrowserCapabilities {
    /// `navigator.getBattery()` result, if the API exists and resolves
    pub async fn battery_manager(&self) -> Support<JsValue> {
        let Ok(window) = window() else {
            return Support::Unavailable;
        };
        match call_method(window.navigator().as_ref(), "getBattery", &[]) {
            None => Support::Unavailable,
            Some(called) => Support::Available(settle(called).await),
        }
    }

    /// Read `level` and `charging` from a `BatteryManager`
    pub fn read_battery(manager: &JsValue) -> BatteryStatus {
        let level = js_sys::Reflect::get(manager, &"level".into())
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1.0);
        let charging = js_sys::Reflect::get(manager, &"charging".into())
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        BatteryStatus { level, charging }
    }
}

impl CapabilityProvider for BrowserCapabilities {
    async fn request_fullscreen(&self) -> Support<()> {
        let Some(root) = document().ok().and_then(|d| d.document_element()) else {
            return Support::Unavailable;
        };
        for name in REQUEST_FULLSCREEN {
            if let Some(called) = call_method(root.as_ref(), name, &[]) {
                return Support::Available(settle(called).await.map(|_| ()));
            }
        }
        Support::Unavailable
    }

    async fn lock_orientation(&self, orientation: Orientation) -> Support<()> {
        let Some(screen) = window().ok().and_then(|w| w.screen().ok()) else {
            return Support::Unavailable;
        };
        let target = match js_sys::Reflect::get(&screen, &"orientation".into()) {
            Ok(target) if !target.is_undefined() && !target.is_null() => target,
            _ => return Support::Unavailable,
        };
        match call_method(&target, "lock", &[JsValue::from_str(orientation.as_str())]) {
            None => Support::Unavailable,
            Some(called) => Support::Available(settle(called).await.map(|_| ())),
        }
    }

    async fn battery(&self) -> Support<BatteryStatus> {
        match self.battery_manager().await {
            Support::Unavailable => Support::Unavailable,
            Support::Available(result) => Support::Available(result.map(|m| Self::read_battery(&m))),
        }
    }

    fn exit_fullscreen(&self) {
        let Ok(doc) = document() else {
            return;
        };
        for name in EXIT_FULLSCREEN {
            if let Some(called) = call_method(doc.as_ref(), name, &[]) {
                // Rejects when not in fullscreen
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = settle(called).await {
                        log(&format!("[kiosk] exit fullscreen: {}", e));
                    }
                });
                return;
            }
        }
    }
}

/// Await the call result if it returned a promise, and map failures
async fn settle(called: Result<JsValue, JsValue>) -> Result<JsValue, CapabilityError> {
    let value = called.map_err(classify)?;
    match value.dyn_into::<js_sys::Promise>() {
        Ok(promise) => JsFuture::from(promise).await.map_err(classify),
        Err(value) => Ok(value),
    }
}

/// `NotAllowedError` and `SecurityError` are refusals; anything else is a failure
fn classify(error: JsValue) -> CapabilityError {
    let name = js_sys::Reflect::get(&error, &"name".into())
        .ok()
        .and_then(|n| n.as_string())
        .unwrap_or_default();
    let message = describe(&error);
    match name.as_str() {
        "NotAllowedError" | "SecurityError" => CapabilityError::Denied(message),
        _ => CapabilityError::Failed(message),
    }
}
