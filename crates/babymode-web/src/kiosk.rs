//! Kiosk lockdown listeners

use std::cell::RefCell;
use std::rc::Rc;

use babymode_core::kiosk::{engage, FocusLoss};
use babymode_core::{KeyChord, KeyFilter, KioskConfig, KioskLock, Support, TouchGuard};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, KeyboardEvent, TouchEvent, Window};

use crate::capabilities::BrowserCapabilities;
use crate::events::{ListenOptions, Subscriptions};
use crate::timer::defer;
use crate::util::{log, now_ms};

/// Owns the kiosk lock and every lockdown listener
pub struct KioskController {
    lock: Rc<RefCell<KioskLock>>,
    provider: BrowserCapabilities,
    subscriptions: Subscriptions,
}

impl KioskController {
    pub fn new(config: KioskConfig) -> Self {
        Self {
            lock: Rc::new(RefCell::new(KioskLock::new(config))),
            provider: BrowserCapabilities,
            subscriptions: Subscriptions::new(),
        }
    }

    /// Shared lock state
    pub fn lock(&self) -> Rc<RefCell<KioskLock>> {
        self.lock.clone()
    }

    pub fn is_locked(&self) -> bool {
        self.lock.borrow().is_locked()
    }

    /// Install every lockdown listener
    pub fn attach(&mut self, window: &Window, doc: &Document) -> Result<(), JsValue> {
        self.trap_history(window)?;
        self.block_keys(doc)?;
        self.block_gestures(doc)?;
        self.retain_focus(window, doc)?;
        log("[kiosk] lockdown listeners installed");
        Ok(())
    }

    /// Request fullscreen and the orientation lock in the background
    pub fn engage(&self) {
        let lock = self.lock.clone();
        let provider = self.provider;
        wasm_bindgen_futures::spawn_local(async move {
            let report = engage(&lock, &provider).await;
            match report.fullscreen {
                Support::Available(Ok(())) => log("[kiosk] fullscreen engaged"),
                Support::Available(Err(e)) => log(&format!("[kiosk] fullscreen not available: {}", e)),
                Support::Unavailable => log("[kiosk] fullscreen not supported"),
            }
            match report.orientation {
                Support::Available(Ok(())) => log("[kiosk] orientation locked"),
                Support::Available(Err(e)) => log(&format!("[kiosk] orientation lock failed: {}", e)),
                Support::Unavailable => log("[kiosk] orientation lock not supported"),
            }
        });
    }

    /// Leave fullscreen and clear the lock flag
    pub fn disable(&self) {
        self.lock.borrow_mut().disable(&self.provider);
        log("[kiosk] disabled");
    }

    /// Remove every listener
    pub fn detach(&mut self) {
        self.subscriptions.clear();
    }

    /// Push a history entry and re-push it whenever the user goes back
    fn trap_history(&mut self, window: &Window) -> Result<(), JsValue> {
        push_current_url(window)?;
        let win = window.clone();
        let target: &EventTarget = window.as_ref();
        self.subscriptions.listen(target, "popstate", move |_e: Event| {
            let _ = push_current_url(&win);
        })
    }

    fn block_keys(&mut self, doc: &Document) -> Result<(), JsValue> {
        let target: &EventTarget = doc.as_ref();
        self.subscriptions.listen(target, "keydown", move |e: Event| {
            let Some(key) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let chord = KeyChord {
                key: key.key(),
                ctrl: key.ctrl_key(),
                alt: key.alt_key(),
                meta: key.meta_key(),
                shift: key.shift_key(),
            };
            if KeyFilter.should_block(&chord).is_some() {
                e.prevent_default();
                e.stop_propagation();
            }
        })
    }

    fn block_gestures(&mut self, doc: &Document) -> Result<(), JsValue> {
        let target: &EventTarget = doc.as_ref();

        for kind in ["contextmenu", "selectstart", "dragstart"] {
            self.subscriptions.listen(target, kind, |e: Event| e.prevent_default())?;
        }

        let window_ms = self.lock.borrow().config().double_tap_window_ms;
        let guard = Rc::new(RefCell::new(TouchGuard::new(window_ms)));

        let g = guard.clone();
        self.subscriptions
            .listen_with(target, "touchstart", ListenOptions::ACTIVE, move |e: Event| {
                if g.borrow().on_touch_start(touch_count(&e)) {
                    e.prevent_default();
                }
            })?;

        let g = guard.clone();
        self.subscriptions
            .listen_with(target, "touchmove", ListenOptions::ACTIVE, move |e: Event| {
                if g.borrow().on_touch_move(touch_count(&e)) {
                    e.prevent_default();
                }
            })?;

        self.subscriptions
            .listen_with(target, "touchend", ListenOptions::ACTIVE, move |e: Event| {
                if guard.borrow_mut().on_touch_end(touch_count(&e), now_ms()) {
                    e.prevent_default();
                }
            })
    }

    fn retain_focus(&mut self, window: &Window, doc: &Document) -> Result<(), JsValue> {
        let lock = self.lock.clone();
        let target: &EventTarget = window.as_ref();
        self.subscriptions.listen(target, "blur", move |_e: Event| {
            if lock.borrow().should_refocus(FocusLoss::Blur) {
                refocus_next_tick();
            }
        })?;

        let lock = self.lock.clone();
        let document = doc.clone();
        let target: &EventTarget = doc.as_ref();
        self.subscriptions.listen(target, "visibilitychange", move |_e: Event| {
            if document.hidden() && lock.borrow().should_refocus(FocusLoss::Hidden) {
                refocus_next_tick();
            }
        })
    }
}

fn push_current_url(window: &Window) -> Result<(), JsValue> {
    let href = window.location().href()?;
    window
        .history()?
        .push_state_with_url(&JsValue::NULL, "", Some(&href))
}

fn refocus_next_tick() {
    defer(0.0, || {
        if let Some(window) = web_sys::window() {
            let _ = window.focus();
        }
    });
}

/// `touches.length` of a touch event, 0 for anything else
fn touch_count(e: &Event) -> usize {
    e.dyn_ref::<TouchEvent>()
        .map_or(0, |t| t.touches().length() as usize)
}
