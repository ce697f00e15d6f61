//! Page-wide hooks: service worker registration, the install prompt and
//! uncaught error logging

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{ErrorEvent, Event, EventTarget, PromiseRejectionEvent, Window};

use crate::events::Subscriptions;
use crate::util::{describe, error, log};

/// Script URL of the offline worker
pub const SERVICE_WORKER_URL: &str = "sw.js";

/// Listeners that live for the whole page
pub struct PageGlobals {
    subscriptions: Subscriptions,
    install_prompt: Rc<RefCell<Option<Event>>>,
    registration_requested: Rc<Cell<bool>>,
}

impl PageGlobals {
    pub fn install(window: &Window) -> Result<Self, JsValue> {
        let mut subscriptions = Subscriptions::new();
        let install_prompt = Rc::new(RefCell::new(None));
        let registration_requested = Rc::new(Cell::new(false));
        let target: &EventTarget = window.as_ref();

        // `load` has already fired when booting from a late module script
        let loaded = window
            .document()
            .map(|doc| doc.ready_state() == "complete")
            .unwrap_or(false);
        if loaded {
            registration_requested.set(true);
            register_service_worker();
        } else {
            let requested = registration_requested.clone();
            subscriptions.listen(target, "load", move |_e: Event| {
                requested.set(true);
                register_service_worker();
            })?;
        }

        let prompt = install_prompt.clone();
        subscriptions.listen(target, "beforeinstallprompt", move |e: Event| {
            e.prevent_default();
            *prompt.borrow_mut() = Some(e);
            log("[app] installation available");
        })?;

        subscriptions.listen(target, "error", |e: Event| {
            let detail = match e.dyn_ref::<ErrorEvent>() {
                Some(err) => describe(&err.error()),
                None => "unknown".to_string(),
            };
            error(&format!("[app] error: {}", detail));
        })?;

        subscriptions.listen(target, "unhandledrejection", |e: Event| {
            let reason = match e.dyn_ref::<PromiseRejectionEvent>() {
                Some(rejection) => describe(&rejection.reason()),
                None => "unknown".to_string(),
            };
            error(&format!("[app] unhandled rejection: {}", reason));
            e.prevent_default();
        })?;

        Ok(Self {
            subscriptions,
            install_prompt,
            registration_requested,
        })
    }

    /// Check whether worker registration has been started
    pub fn registration_requested(&self) -> bool {
        self.registration_requested.get()
    }

    /// Check whether the browser offered installation and it was deferred
    pub fn install_available(&self) -> bool {
        self.install_prompt.borrow().is_some()
    }

    /// Show the deferred install prompt, once
    pub fn prompt_install(&self) -> bool {
        let Some(event) = self.install_prompt.borrow_mut().take() else {
            return false;
        };
        match crate::util::call_method(event.as_ref(), "prompt", &[]) {
            Some(Ok(_)) => true,
            Some(Err(e)) => {
                error(&format!("[app] install prompt failed: {}", describe(&e)));
                false
            }
            None => false,
        }
    }

    pub fn detach(&mut self) {
        self.subscriptions.clear();
    }
}

/// Register the offline worker, logging the outcome
pub fn register_service_worker() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(navigator.as_ref(), &"serviceWorker".into()).unwrap_or(false);
    if !supported {
        log("[app] service workers not supported");
        return;
    }
    let promise = navigator.service_worker().register(SERVICE_WORKER_URL);
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(registration) => {
                let scope = js_sys::Reflect::get(&registration, &"scope".into())
                    .ok()
                    .and_then(|s| s.as_string())
                    .unwrap_or_default();
                log(&format!("[app] service worker registered for {}", scope));
            }
            Err(e) => error(&format!("[app] service worker registration failed: {}", describe(&e))),
        }
    });
}
