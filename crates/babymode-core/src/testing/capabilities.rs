//! Scripted capability provider for testing.

use std::cell::{Cell, RefCell};

use crate::kiosk::{BatteryStatus, CapabilityProvider, Orientation, Support};

/// Returns preset results and records calls.
pub struct ScriptedCapabilities {
    fullscreen: Support<()>,
    orientation: Support<()>,
    battery: Support<BatteryStatus>,
    orientation_requests: RefCell<Vec<Orientation>>,
    exit_calls: Cell<usize>,
}

impl ScriptedCapabilities {
    /// Every API present and succeeding, battery full and charging
    pub fn supported() -> Self {
        Self {
            fullscreen: Support::ok(()),
            orientation: Support::ok(()),
            battery: Support::ok(BatteryStatus {
                level: 1.0,
                charging: true,
            }),
            orientation_requests: RefCell::new(Vec::new()),
            exit_calls: Cell::new(0),
        }
    }

    /// No optional API at all
    pub fn unsupported() -> Self {
        Self {
            fullscreen: Support::Unavailable,
            orientation: Support::Unavailable,
            battery: Support::Unavailable,
            ..Self::supported()
        }
    }

    pub fn with_fullscreen(mut self, outcome: Support<()>) -> Self {
        self.fullscreen = outcome;
        self
    }

    pub fn with_orientation(mut self, outcome: Support<()>) -> Self {
        self.orientation = outcome;
        self
    }

    pub fn with_battery(mut self, outcome: Support<BatteryStatus>) -> Self {
        self.battery = outcome;
        self
    }

    pub fn orientation_requests(&self) -> Vec<Orientation> {
        self.orientation_requests.borrow().clone()
    }

    pub fn exit_calls(&self) -> usize {
        self.exit_calls.get()
    }
}

impl CapabilityProvider for ScriptedCapabilities {
    async fn request_fullscreen(&self) -> Support<()> {
        self.fullscreen.clone()
    }

    async fn lock_orientation(&self, orientation: Orientation) -> Support<()> {
        self.orientation_requests.borrow_mut().push(orientation);
        self.orientation.clone()
    }

    async fn battery(&self) -> Support<BatteryStatus> {
        self.battery.clone()
    }

    fn exit_fullscreen(&self) {
        self.exit_calls.set(self.exit_calls.get() + 1);
    }
}
