//! Tap feedback on the interactive shapes

use std::cell::RefCell;
use std::rc::Rc;

use babymode_core::{AnimatorConfig, InteractionAnimator, Size};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

use crate::dom::{self, INTERACTIVE_SELECTOR};
use crate::events::{ListenOptions, Subscriptions};
use crate::timer::defer;
use crate::util::{document, random_unit};

const RIPPLE_KEYFRAMES: &str = "
@keyframes ripple {
    to {
        transform: scale(4);
        opacity: 0;
    }
}
";

const RIPPLE_CSS: &str = "position: absolute; border-radius: 50%; \
background: rgba(255, 255, 255, 0.6); transform: scale(0); \
animation: ripple 0.6s linear; pointer-events: none; top: 50%; left: 50%; \
width: 20px; height: 20px; margin-top: -10px; margin-left: -10px;";

/// Bounce, ripple and relocate an element on every tap
pub struct AnimatorController {
    animator: Rc<RefCell<InteractionAnimator>>,
    elements: Vec<HtmlElement>,
    subscriptions: Subscriptions,
    keyframes: Option<Element>,
}

impl AnimatorController {
    pub fn new(doc: &Document, config: AnimatorConfig) -> Result<Self, JsValue> {
        Ok(Self {
            animator: Rc::new(RefCell::new(InteractionAnimator::new(config))),
            elements: dom::query_all(doc, INTERACTIVE_SELECTOR)?,
            subscriptions: Subscriptions::new(),
            keyframes: None,
        })
    }

    /// Inject the ripple keyframes and listen for taps and clicks
    pub fn attach(&mut self) -> Result<(), JsValue> {
        if self.keyframes.is_none() {
            self.keyframes = Some(dom::inject_style(RIPPLE_KEYFRAMES)?);
        }

        for element in &self.elements {
            let target: &EventTarget = element.as_ref();
            for (kind, options) in [
                ("touchstart", ListenOptions::PASSIVE),
                ("click", ListenOptions::default()),
            ] {
                let animator = self.animator.clone();
                let el = element.clone();
                self.subscriptions.listen_with(target, kind, options, move |e: Event| {
                    // Keep taps away from the swipe and exit listeners
                    e.stop_propagation();
                    animate(&animator.borrow(), &el);
                })?;
            }
        }
        Ok(())
    }

    /// Shared planner, so power saving can change the float period
    pub fn handle(&self) -> Rc<RefCell<InteractionAnimator>> {
        self.animator.clone()
    }

    /// The animated elements
    pub fn elements(&self) -> &[HtmlElement] {
        &self.elements
    }

    /// Remove listeners and the injected keyframes
    pub fn detach(&mut self) {
        self.subscriptions.clear();
        if let Some(style) = self.keyframes.take() {
            style.remove();
        }
    }
}

/// Apply a tap plan to `element`
pub fn animate(animator: &InteractionAnimator, element: &HtmlElement) {
    let parent = element
        .parent_element()
        .map(|p| dom::element_size(&p))
        .unwrap_or(Size::ZERO);
    let mut rng = random_unit;
    let plan = animator.plan_tap(parent, &mut rng);

    // Bounce
    let _ = dom::set_style(element, "animation", "none");
    let _ = dom::set_style(element, "transform", &format!("scale({})", plan.bounce_scale));
    let el = element.clone();
    let resume = plan.resume_animation.clone();
    defer(plan.bounce_ms, move || {
        let _ = dom::set_style(&el, "transform", "scale(1)");
        let _ = dom::set_style(&el, "animation", &resume);
    });

    // Ripple
    if let Some(ripple) = spawn_ripple(element) {
        defer(plan.ripple_ms, move || ripple.remove());
    }

    // Relocate
    let _ = dom::set_style(element, "transition", &plan.move_transition);
    let _ = dom::set_style(element, "left", &format!("{}px", plan.target.x));
    let _ = dom::set_style(element, "top", &format!("{}px", plan.target.y));
    let el = element.clone();
    let settle = plan.settle_transition;
    defer(plan.move_ms, move || {
        let _ = dom::set_style(&el, "transition", &settle);
    });
}

fn spawn_ripple(element: &HtmlElement) -> Option<Element> {
    let ripple = document().ok()?.create_element("div").ok()?;
    let ripple: HtmlElement = ripple.dyn_into().ok()?;
    ripple.style().set_css_text(RIPPLE_CSS);
    element.append_child(&ripple).ok()?;
    Some(ripple.into())
}
