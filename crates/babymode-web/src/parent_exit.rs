//! Corner-tap parent exit

use std::cell::RefCell;
use std::rc::Rc;

use babymode_core::{ExitConfig, ExitDecision, ExitDetector, ExitEvent, KioskLock};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, TouchEvent, Window};

use crate::capabilities::BrowserCapabilities;
use crate::dom::EXIT_INDICATOR_ID;
use crate::events::{ListenOptions, Subscriptions};
use crate::navigator::first_touch;
use crate::timer::{defer, Timeout};
use crate::util::{log, now_ms, viewport};

/// State shared by the touch listener and the inactivity timer
struct ExitState {
    detector: RefCell<ExitDetector>,
    timer: RefCell<Option<Timeout>>,
    indicator: Option<Element>,
    lock: Rc<RefCell<KioskLock>>,
    prompt: String,
    flash_ms: f64,
}

impl ExitState {
    fn flash(&self) {
        let Some(indicator) = self.indicator.clone() else {
            return;
        };
        let _ = indicator.class_list().add_1("active");
        defer(self.flash_ms, move || {
            let _ = indicator.class_list().remove_1("active");
        });
    }

    /// Restart the inactivity timer
    fn rearm(self: &Rc<Self>) {
        let timeout_ms = self.detector.borrow().timeout_ms();
        let state = Rc::downgrade(self);
        let timer = Timeout::new(timeout_ms, move || {
            if let Some(state) = state.upgrade() {
                state.detector.borrow_mut().clear();
            }
        });
        match timer {
            Ok(timer) => *self.timer.borrow_mut() = Some(timer),
            Err(e) => log(&format!("[parent-exit] failed to arm timeout: {:?}", e)),
        }
    }

    fn disarm(&self) {
        self.timer.borrow_mut().take();
    }

    /// Ask for confirmation; on accept release the kiosk and leave the page
    fn confirm_exit(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let accepted = window.confirm_with_message(&self.prompt).unwrap_or(false);
        let decision = self.detector.borrow_mut().resolve_prompt(
            accepted,
            &mut self.lock.borrow_mut(),
            &BrowserCapabilities,
        );
        match decision {
            ExitDecision::Stay => log("[parent-exit] exit declined"),
            ExitDecision::Leave { url } => {
                log("[parent-exit] exit confirmed");
                if let Err(e) = window.location().set_href(&url) {
                    log(&format!("[parent-exit] navigation failed: {:?}", e));
                }
            }
        }
    }

    fn on_touch(self: &Rc<Self>, event: &TouchEvent) {
        let Some((x, y)) = first_touch(event) else {
            return;
        };
        let touches = event.touches().length() as usize;
        let outcome = self
            .detector
            .borrow_mut()
            .on_touch(touches, x, y, viewport(), now_ms());

        if outcome.is_corner_touch() {
            self.flash();
        }
        match outcome {
            ExitEvent::Ignored => {}
            ExitEvent::Recorded { .. } => self.rearm(),
            ExitEvent::Mismatch => self.disarm(),
            ExitEvent::Matched => {
                self.disarm();
                self.confirm_exit();
            }
        }
    }
}

/// Watches single-finger corner taps on the whole document
pub struct ParentExit {
    state: Rc<ExitState>,
    subscriptions: Subscriptions,
}

impl ParentExit {
    pub fn new(doc: &Document, config: ExitConfig, lock: Rc<RefCell<KioskLock>>) -> Self {
        let indicator = doc.get_element_by_id(EXIT_INDICATOR_ID);
        if indicator.is_none() {
            log("[parent-exit] no #parentExit indicator in the page");
        }
        let state = ExitState {
            prompt: config.prompt.clone(),
            flash_ms: config.indicator_flash_ms,
            detector: RefCell::new(ExitDetector::new(config)),
            timer: RefCell::new(None),
            indicator,
            lock,
        };
        Self {
            state: Rc::new(state),
            subscriptions: Subscriptions::new(),
        }
    }

    pub fn attach(&mut self, window: &Window) -> Result<(), JsValue> {
        let doc = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let target: &EventTarget = doc.as_ref();
        let state = self.state.clone();
        self.subscriptions
            .listen_with(target, "touchstart", ListenOptions::PASSIVE, move |e: Event| {
                if let Some(touch) = e.dyn_ref::<TouchEvent>() {
                    state.on_touch(touch);
                }
            })
    }

    pub fn detach(&mut self) {
        self.subscriptions.clear();
        self.state.disarm();
        self.state.detector.borrow_mut().clear();
    }
}
