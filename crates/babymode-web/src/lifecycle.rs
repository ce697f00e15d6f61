//! Visibility, power saving, reduced motion, accessibility and the welcome
//! animation

use std::cell::RefCell;
use std::rc::Rc;

use babymode_core::lifecycle::{
    welcome_delay_ms, HIGH_CONTRAST_CLASS, POWER_SAVING_CLASS, REDUCE_MOTION_CLASS,
    REDUCE_MOTION_CSS, WELCOME_TRANSITION,
};
use babymode_core::{InteractionAnimator, PlayState, PowerConfig, PowerMode, Support, ScreenSet};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement, Window};

use crate::capabilities::BrowserCapabilities;
use crate::dom;
use crate::events::Subscriptions;
use crate::timer::defer;
use crate::util::{log, warn};

/// Page-level presentation policy
pub struct LifecycleController {
    config: PowerConfig,
    elements: Rc<Vec<HtmlElement>>,
    animator: Rc<RefCell<InteractionAnimator>>,
    subscriptions: Rc<RefCell<Subscriptions>>,
    power: Rc<RefCell<Option<PowerMode>>>,
}

impl LifecycleController {
    pub fn new(
        config: PowerConfig,
        elements: Vec<HtmlElement>,
        animator: Rc<RefCell<InteractionAnimator>>,
    ) -> Self {
        Self {
            config,
            elements: Rc::new(elements),
            animator,
            subscriptions: Rc::new(RefCell::new(Subscriptions::new())),
            power: Rc::new(RefCell::new(None)),
        }
    }

    /// Current power mode, once the battery has been read
    pub fn power_mode(&self) -> Option<PowerMode> {
        *self.power.borrow()
    }

    /// Pause the float animations while hidden or unfocused
    pub fn watch_visibility(&self, window: &Window, doc: &Document) -> Result<(), JsValue> {
        let mut subs = self.subscriptions.borrow_mut();

        let elements = self.elements.clone();
        let document = doc.clone();
        let target: &EventTarget = doc.as_ref();
        subs.listen(target, "visibilitychange", move |_e: Event| {
            set_play_state(&elements, PlayState::from_hidden(document.hidden()));
        })?;

        let target: &EventTarget = window.as_ref();
        let elements = self.elements.clone();
        subs.listen(target, "focus", move |_e: Event| {
            set_play_state(&elements, PlayState::Running);
        })?;
        let elements = self.elements.clone();
        subs.listen(target, "blur", move |_e: Event| {
            set_play_state(&elements, PlayState::Paused);
        })
    }

    /// Slow the animations down on low battery, tracking level and charging
    /// changes
    pub fn watch_battery(&self) {
        let config = self.config.clone();
        let elements = self.elements.clone();
        let animator = self.animator.clone();
        let subscriptions = self.subscriptions.clone();
        let power = self.power.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let manager = match BrowserCapabilities.battery_manager().await {
                Support::Available(Ok(manager)) => manager,
                Support::Available(Err(e)) => {
                    warn(&format!("[power] battery unavailable: {}", e));
                    return;
                }
                Support::Unavailable => return,
            };

            let apply = {
                let manager = manager.clone();
                move || {
                    let status = BrowserCapabilities::read_battery(&manager);
                    let mode = PowerMode::from_battery(status, &config);
                    if *power.borrow() != Some(mode) {
                        log(&format!("[power] {:?} (level {:.2})", mode, status.level));
                    }
                    *power.borrow_mut() = Some(mode);
                    apply_power_mode(mode, &config, &elements, &animator);
                }
            };
            apply();

            let Ok(target) = manager.dyn_into::<EventTarget>() else {
                return;
            };
            let apply = Rc::new(apply);
            let mut subs = subscriptions.borrow_mut();
            for kind in ["levelchange", "chargingchange"] {
                let apply = apply.clone();
                if let Err(e) = subs.listen(&target, kind, move |_e: Event| apply()) {
                    warn(&format!("[power] could not watch {}: {:?}", kind, e));
                }
            }
        });
    }

    /// Honour `prefers-reduced-motion` and `prefers-contrast`
    pub fn apply_preferences(&self) -> Result<(), JsValue> {
        if dom::media_matches("(prefers-reduced-motion: reduce)") {
            dom::toggle_body_class(REDUCE_MOTION_CLASS, true)?;
            dom::inject_style(REDUCE_MOTION_CSS)?;
        }
        if dom::media_matches("(prefers-contrast: high)") {
            dom::toggle_body_class(HIGH_CONTRAST_CLASS, true)?;
        }
        Ok(())
    }

    /// Fade each screen in, staggered
    pub fn welcome(&self, screens: &[HtmlElement]) {
        for (index, screen) in screens.iter().enumerate() {
            let _ = dom::set_style(screen, "opacity", "0");
            let _ = dom::set_style(screen, "transform", "scale(0.8)");

            let screen = screen.clone();
            defer(welcome_delay_ms(index, &self.config), move || {
                let _ = dom::set_style(&screen, "transition", WELCOME_TRANSITION);
                let _ = dom::set_style(&screen, "opacity", "1");
                let _ = dom::set_style(&screen, "transform", "scale(1)");
            });
        }
    }

    pub fn detach(&self) {
        self.subscriptions.borrow_mut().clear();
    }
}

/// Give each screen a role, a label and a tab stop
pub fn label_screens(screens: &[HtmlElement], set: &ScreenSet) -> Result<(), JsValue> {
    for (el, screen) in screens.iter().zip(set.iter()) {
        el.set_attribute("role", "button")?;
        el.set_attribute("aria-label", &screen.aria_label())?;
        el.set_attribute("tabindex", "0")?;
    }
    Ok(())
}

fn set_play_state(elements: &[HtmlElement], state: PlayState) {
    dom::set_style_all(elements, "animation-play-state", state.as_css());
}

fn apply_power_mode(
    mode: PowerMode,
    config: &PowerConfig,
    elements: &[HtmlElement],
    animator: &RefCell<InteractionAnimator>,
) {
    if let Err(e) = dom::toggle_body_class(POWER_SAVING_CLASS, mode.is_saving()) {
        warn(&format!("[power] {:?}", e));
    }
    dom::set_style_all(elements, "animation-duration", &mode.animation_duration(config));
    animator.borrow_mut().set_animation_secs(mode.animation_secs(config));
}
