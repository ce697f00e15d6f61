//! Swipe navigation between screens

use std::cell::RefCell;
use std::rc::Rc;

use babymode_core::{NavResult, ScreenNavigator, ScreenSet, SwipeConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, TouchEvent};

use crate::dom::{self, CONTAINER_SELECTOR, SCREEN_SELECTOR, THEME_META_SELECTOR};
use crate::events::{ListenOptions, Subscriptions};
use crate::util::{log, now_ms, viewport};

/// Container transition used when a swipe settles
pub const SETTLE_TRANSITION: &str = "transform 0.3s cubic-bezier(0.25, 0.46, 0.45, 0.94)";

/// First touch point of a touch event in client coordinates
pub(crate) fn first_touch(event: &TouchEvent) -> Option<(f64, f64)> {
    event
        .touches()
        .get(0)
        .map(|t| (t.client_x() as f64, t.client_y() as f64))
}

/// The elements the navigator moves
struct ScreenView {
    container: HtmlElement,
    screens: Vec<HtmlElement>,
    theme_meta: Option<Element>,
    set: ScreenSet,
}

impl ScreenView {
    fn set_transition(&self, value: &str) {
        let _ = dom::set_style(&self.container, "transition", value);
    }

    fn translate(&self, offset_percent: f64) {
        let _ = dom::set_style(
            &self.container,
            "transform",
            &format!("translateX({}%)", offset_percent),
        );
    }

    /// Move to the resting position of `index` and mark it active
    fn settle(&self, index: usize, offset_percent: f64) {
        self.set_transition(SETTLE_TRANSITION);
        self.translate(offset_percent);

        for (i, screen) in self.screens.iter().enumerate() {
            let _ = screen.class_list().toggle_with_force("active", i == index);
        }
        if let (Some(meta), Some(color)) = (&self.theme_meta, self.set.theme_color(index)) {
            let _ = meta.set_attribute("content", color);
        }
    }
}

/// Owns the navigator state and its document touch listeners
pub struct NavigatorController {
    state: Rc<RefCell<ScreenNavigator>>,
    view: Rc<ScreenView>,
    subscriptions: Subscriptions,
}

impl NavigatorController {
    /// Find the container and screens and render screen 0
    pub fn new(doc: &Document, set: ScreenSet, config: SwipeConfig) -> Result<Self, JsValue> {
        let view = ScreenView {
            container: dom::require(doc, CONTAINER_SELECTOR)?,
            screens: dom::query_all(doc, SCREEN_SELECTOR)?,
            theme_meta: doc.query_selector(THEME_META_SELECTOR)?,
            set,
        };
        if view.screens.len() != view.set.len() {
            log(&format!(
                "[navigator] {} screens in the page, {} configured",
                view.screens.len(),
                view.set.len()
            ));
        }

        let navigator = ScreenNavigator::new(view.set.len(), config);
        view.settle(navigator.current_screen(), navigator.offset());

        Ok(Self {
            state: Rc::new(RefCell::new(navigator)),
            view: Rc::new(view),
            subscriptions: Subscriptions::new(),
        })
    }

    /// Register touch listeners on the document
    pub fn attach(&mut self, doc: &Document) -> Result<(), JsValue> {
        let target: &EventTarget = doc.as_ref();

        let state = self.state.clone();
        let view = self.view.clone();
        self.subscriptions
            .listen_with(target, "touchstart", ListenOptions::PASSIVE, move |e: Event| {
                let Some((x, y)) = e.dyn_ref::<TouchEvent>().and_then(first_touch) else {
                    return;
                };
                if state.borrow_mut().begin_drag(x, y, now_ms()) == NavResult::Armed {
                    view.set_transition("none");
                }
            })?;

        let state = self.state.clone();
        let view = self.view.clone();
        self.subscriptions
            .listen_with(target, "touchmove", ListenOptions::ACTIVE, move |e: Event| {
                let Some((x, y)) = e.dyn_ref::<TouchEvent>().and_then(first_touch) else {
                    return;
                };
                // One screen is one viewport wide
                let width = viewport().width;
                let result = state.borrow_mut().update_drag(x, y, width, now_ms());
                if let NavResult::Drag { offset } = result {
                    e.prevent_default();
                    view.translate(offset);
                }
            })?;

        let state = self.state.clone();
        let view = self.view.clone();
        self.subscriptions
            .listen_with(target, "touchend", ListenOptions::PASSIVE, move |_e: Event| {
                let result = state.borrow_mut().end_drag(now_ms());
                if let NavResult::Settle { index, changed, offset } = result {
                    if changed {
                        log(&format!("[navigator] screen {}", index));
                    }
                    view.settle(index, offset);
                } else {
                    view.set_transition(SETTLE_TRANSITION);
                }
            })?;

        let state = self.state.clone();
        let view = self.view.clone();
        self.subscriptions
            .listen_with(target, "touchcancel", ListenOptions::PASSIVE, move |_e: Event| {
                let mut nav = state.borrow_mut();
                nav.cancel_drag();
                view.set_transition(SETTLE_TRANSITION);
                view.translate(nav.offset());
            })?;

        Ok(())
    }

    /// Active screen index
    pub fn current_screen(&self) -> usize {
        self.state.borrow().current_screen()
    }

    /// Jump to `index`. Returns false if it was out of range or a transition
    /// was still running.
    pub fn go_to_screen(&self, index: usize) -> bool {
        let result = self.state.borrow_mut().go_to_screen(index, now_ms());
        match result {
            Some(NavResult::Settle { index, offset, .. }) => {
                self.view.settle(index, offset);
                true
            }
            _ => false,
        }
    }

    /// Screens in display order
    pub fn screens(&self) -> &[HtmlElement] {
        &self.view.screens
    }

    /// Remove every listener
    pub fn detach(&mut self) {
        self.subscriptions.clear();
    }
}
