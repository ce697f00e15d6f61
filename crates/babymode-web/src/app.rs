//! The `BabyModeApp` export

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use babymode_core::{AppConfig, ScreenSet};
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

use crate::animator::AnimatorController;
use crate::events::Subscriptions;
use crate::globals::PageGlobals;
use crate::kiosk::KioskController;
use crate::lifecycle::{label_screens, LifecycleController};
use crate::navigator::NavigatorController;
use crate::parent_exit::ParentExit;
use crate::util::{document, error, log, window};

const EMERGENCY_EXIT_MESSAGE: &str = "Emergency exit activated. Baby Mode disabled.";

/// Components that exist once the DOM is ready
struct Runtime {
    kiosk: KioskController,
    parent_exit: ParentExit,
    navigator: NavigatorController,
    animator: AnimatorController,
    lifecycle: LifecycleController,
}

impl Runtime {
    fn start(config: &AppConfig) -> Result<Self, JsValue> {
        let window = window()?;
        let doc = document()?;
        let set = ScreenSet::from_config(&config.screens);

        let mut kiosk = KioskController::new(config.kiosk.clone());
        kiosk.attach(&window, &doc)?;
        let mut parent_exit = ParentExit::new(&doc, config.exit.clone(), kiosk.lock());
        parent_exit.attach(&window)?;
        kiosk.engage();

        let mut navigator = NavigatorController::new(&doc, set.clone(), config.swipe.clone())?;
        navigator.attach(&doc)?;
        let mut animator = AnimatorController::new(&doc, config.animator.clone())?;
        animator.attach()?;

        let lifecycle = LifecycleController::new(
            config.power.clone(),
            animator.elements().to_vec(),
            animator.handle(),
        );
        lifecycle.watch_visibility(&window, &doc)?;
        lifecycle.watch_battery();
        lifecycle.apply_preferences()?;
        label_screens(navigator.screens(), &set)?;

        Ok(Self {
            kiosk,
            parent_exit,
            navigator,
            animator,
            lifecycle,
        })
    }

    fn stop(&mut self) {
        self.parent_exit.detach();
        self.navigator.detach();
        self.animator.detach();
        self.lifecycle.detach();
        self.kiosk.detach();
    }
}

struct AppInner {
    config: AppConfig,
    runtime: RefCell<Option<Runtime>>,
    globals: RefCell<Option<PageGlobals>>,
    ready: Cell<bool>,
    dom_ready: RefCell<Subscriptions>,
}

impl AppInner {
    fn start(&self) {
        if self.runtime.borrow().is_some() {
            return;
        }
        match Runtime::start(&self.config) {
            Ok(runtime) => {
                runtime.lifecycle.welcome(runtime.navigator.screens());
                *self.runtime.borrow_mut() = Some(runtime);
                self.ready.set(true);
                log("[app] Baby Mode initialized");
            }
            Err(e) => error(&format!("[app] failed to start: {:?}", e)),
        }
    }
}

/// Baby Mode page application
///
/// Starts as soon as the DOM is ready. Dropping the last handle does not stop
/// it; call [`BabyModeApp::dispose`] to remove every listener.
#[wasm_bindgen]
pub struct BabyModeApp {
    inner: Rc<AppInner>,
}

impl BabyModeApp {
    fn launch(config: AppConfig) -> Result<Self, JsValue> {
        let window = window()?;
        let doc = document()?;

        let inner = Rc::new(AppInner {
            config,
            runtime: RefCell::new(None),
            globals: RefCell::new(Some(PageGlobals::install(&window)?)),
            ready: Cell::new(false),
            dom_ready: RefCell::new(Subscriptions::new()),
        });

        if doc.ready_state() == "loading" {
            let weak = Rc::downgrade(&inner);
            let target: &EventTarget = doc.as_ref();
            inner
                .dom_ready
                .borrow_mut()
                .listen(target, "DOMContentLoaded", move |_e: Event| {
                    if let Some(inner) = weak.upgrade() {
                        inner.start();
                    }
                })?;
        } else {
            inner.start();
        }

        Ok(Self { inner })
    }
}

#[wasm_bindgen]
impl BabyModeApp {
    /// Active screen index (0 before startup)
    #[wasm_bindgen(js_name = currentScreen)]
    pub fn current_screen(&self) -> usize {
        self.inner
            .runtime
            .borrow()
            .as_ref()
            .map_or(0, |rt| rt.navigator.current_screen())
    }

    /// Jump to a screen; ignored when out of range or mid-transition
    #[wasm_bindgen(js_name = goToScreen)]
    pub fn go_to_screen(&self, index: usize) -> bool {
        self.inner
            .runtime
            .borrow()
            .as_ref()
            .is_some_and(|rt| rt.navigator.go_to_screen(index))
    }

    /// Effective configuration as JSON
    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Screen list (index and theme color) as JSON
    #[wasm_bindgen(js_name = screensJson)]
    pub fn screens_json(&self) -> Result<String, JsValue> {
        let set = ScreenSet::from_config(&self.inner.config.screens);
        serde_json::to_string(&set).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.inner.ready.get()
    }

    /// Check whether the kiosk lock is held
    #[wasm_bindgen(js_name = isLocked)]
    pub fn is_locked(&self) -> bool {
        self.inner
            .runtime
            .borrow()
            .as_ref()
            .is_some_and(|rt| rt.kiosk.is_locked())
    }

    /// Release the kiosk lock without the corner sequence
    #[wasm_bindgen(js_name = emergencyExit)]
    pub fn emergency_exit(&self) {
        if let Some(rt) = self.inner.runtime.borrow().as_ref() {
            rt.kiosk.disable();
        }
        if let Ok(window) = window() {
            let _ = window.alert_with_message(EMERGENCY_EXIT_MESSAGE);
        }
    }

    /// Check whether the browser offered installation
    #[wasm_bindgen(js_name = installAvailable)]
    pub fn install_available(&self) -> bool {
        self.inner
            .globals
            .borrow()
            .as_ref()
            .is_some_and(|g| g.install_available())
    }

    /// Check whether low battery has slowed the animations down
    #[wasm_bindgen(js_name = isPowerSaving)]
    pub fn is_power_saving(&self) -> bool {
        self.inner
            .runtime
            .borrow()
            .as_ref()
            .and_then(|rt| rt.lifecycle.power_mode())
            .is_some_and(|mode| mode.is_saving())
    }

    /// Show the deferred install prompt. Returns false if none is pending.
    #[wasm_bindgen(js_name = promptInstall)]
    pub fn prompt_install(&self) -> bool {
        self.inner
            .globals
            .borrow()
            .as_ref()
            .is_some_and(|g| g.prompt_install())
    }

    /// Remove every listener and release the kiosk lock
    pub fn dispose(&self) {
        if let Some(mut rt) = self.inner.runtime.borrow_mut().take() {
            rt.stop();
            rt.kiosk.disable();
        }
        if let Some(mut globals) = self.inner.globals.borrow_mut().take() {
            globals.detach();
        }
        self.inner.dom_ready.borrow_mut().clear();
        self.inner.ready.set(false);
        log("[app] disposed");
    }
}

/// Start Baby Mode with an optional JSON configuration override
#[wasm_bindgen]
pub fn boot(config_json: Option<String>) -> Result<BabyModeApp, JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let config = match config_json.as_deref() {
        Some(json) => AppConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => AppConfig::default(),
    };
    BabyModeApp::launch(config)
}
