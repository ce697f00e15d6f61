//! Baby Mode offline service worker
//!
//! `sw.js` registers the event listeners synchronously and forwards each
//! event to the handler exported here once the module has loaded. Every
//! handler returns a promise for `waitUntil` or `respondWith`.

mod notifications;
mod storage;
mod util;

use babymode_core::{CacheWorker, FetchOutcome, SyncTask, WorkerMessage};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{ExtendableMessageEvent, FetchEvent, NotificationEvent, PushEvent, Response};

pub use storage::{describe_request, BrowserCaches, EventNetwork, GlobalScope, NetResponse};
use util::{describe, error, log};

fn worker() -> CacheWorker {
    CacheWorker::default()
}

fn cache_error(e: babymode_core::CacheError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    log("[sw] Baby Mode service worker loaded");
}

/// Populate the app-shell cache and skip waiting
#[wasm_bindgen]
pub fn handle_install() -> js_sys::Promise {
    future_to_promise(async move {
        let caches = BrowserCaches::new().map_err(cache_error)?;
        let worker = worker();
        log(&format!("[sw] caching app shell in {}", worker.manifest().name));
        worker
            .install(&caches, &GlobalScope)
            .await
            .map_err(cache_error)?;
        Ok(JsValue::UNDEFINED)
    })
}

/// Delete other cache versions and claim clients
#[wasm_bindgen]
pub fn handle_activate() -> js_sys::Promise {
    future_to_promise(async move {
        let caches = BrowserCaches::new().map_err(cache_error)?;
        let deleted = worker()
            .activate(&caches, &GlobalScope)
            .await
            .map_err(cache_error)?;
        for name in deleted {
            log(&format!("[sw] deleted old cache {}", name));
        }
        Ok(JsValue::UNDEFINED)
    })
}

/// Cache-first response for an intercepted fetch
#[wasm_bindgen]
pub fn handle_fetch(event: FetchEvent) -> js_sys::Promise {
    future_to_promise(async move {
        let request = event.request();
        let descriptor = describe_request(&request);
        let caches = BrowserCaches::new().map_err(cache_error)?;
        let network = EventNetwork::new(request);

        let outcome = worker().respond(&descriptor, &caches, &network).await;
        if let FetchOutcome::Unavailable(ref e) = outcome {
            error(&format!("[sw] {} unavailable: {}", descriptor.url, e));
        }
        match outcome.into_response() {
            Some(response) => Ok(response.0.into()),
            None => Ok(Response::error().into()),
        }
    })
}

/// `postMessage` from a page
#[wasm_bindgen]
pub fn handle_message(event: ExtendableMessageEvent) -> js_sys::Promise {
    future_to_promise(async move {
        let json = js_sys::JSON::stringify(&event.data())
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or_default();
        if WorkerMessage::parse(&json) == Some(WorkerMessage::SkipWaiting) {
            log("[sw] skip waiting requested");
            util::resolve(util::scope().skip_waiting()).await?;
        }
        Ok(JsValue::UNDEFINED)
    })
}

/// `sync` and `periodicsync`
#[wasm_bindgen]
pub fn handle_sync(event: JsValue) -> js_sys::Promise {
    future_to_promise(async move {
        let tag = js_sys::Reflect::get(&event, &"tag".into())
            .ok()
            .and_then(|t| t.as_string())
            .unwrap_or_default();
        match SyncTask::from_tag(&tag) {
            Some(SyncTask::Background) => log("[sw] background sync triggered"),
            Some(SyncTask::Content) => log("[sw] periodic sync executed"),
            None => {}
        }
        Ok(JsValue::UNDEFINED)
    })
}

/// Show a silent notification for a push message
#[wasm_bindgen]
pub fn handle_push(event: PushEvent) -> js_sys::Promise {
    let data = event.data().map(|d| d.text());
    future_to_promise(async move {
        notifications::show_push(data).await?;
        Ok(JsValue::UNDEFINED)
    })
}

/// Close the notification and bring the app forward
#[wasm_bindgen]
pub fn handle_notification_click(event: NotificationEvent) -> js_sys::Promise {
    event.notification().close();
    future_to_promise(async move {
        notifications::focus_or_open().await?;
        Ok(JsValue::UNDEFINED)
    })
}

/// Worker-level `error` and `unhandledrejection`
#[wasm_bindgen]
pub fn handle_error(event: JsValue) {
    let detail = ["error", "reason"]
        .iter()
        .find_map(|key| {
            js_sys::Reflect::get(&event, &JsValue::from_str(key))
                .ok()
                .filter(|v| !v.is_undefined())
        })
        .map(|v| describe(&v))
        .unwrap_or_else(|| describe(&event));
    error(&format!("[sw] {}", detail));
    if let Some(rejection) = event.dyn_ref::<web_sys::PromiseRejectionEvent>() {
        rejection.prevent_default();
    }
}
