//! Event listener ownership
//!
//! Each component keeps its listeners in a [`Subscriptions`] list. The
//! closures live as long as the list; dropping it removes every listener from
//! its target.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// How a listener is registered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenOptions {
    pub passive: Option<bool>,
    pub capture: bool,
}

impl ListenOptions {
    /// `{ passive: true }`
    pub const PASSIVE: ListenOptions = ListenOptions {
        passive: Some(true),
        capture: false,
    };

    /// `{ passive: false }`, required to call `preventDefault()` on touch events
    pub const ACTIVE: ListenOptions = ListenOptions {
        passive: Some(false),
        capture: false,
    };
}

/// One registered listener
struct Listener {
    target: EventTarget,
    kind: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.closure.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

/// Listeners owned by one component
#[derive(Default)]
pub struct Subscriptions {
    listeners: Vec<Listener>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind` events on `target` with default options
    pub fn listen<F>(&mut self, target: &EventTarget, kind: &'static str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        self.listen_with(target, kind, ListenOptions::default(), handler)
    }

    /// Register `handler` for `kind` events on `target`
    pub fn listen_with<F>(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        options: ListenOptions,
        handler: F,
    ) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);

        let opts = AddEventListenerOptions::new();
        opts.set_capture(options.capture);
        if let Some(passive) = options.passive {
            opts.set_passive(passive);
        }
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &opts,
        )?;

        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            capture: options.capture,
            closure,
        });
        Ok(())
    }

    /// Number of live listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener now
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
