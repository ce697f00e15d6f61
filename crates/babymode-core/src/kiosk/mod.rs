//! Kiosk lockdown
//!
//! Pure policy for the page's lockdown listeners: which keys and touches to
//! swallow, and the fullscreen/orientation lock state driven through a
//! [`CapabilityProvider`].

mod capability;
mod keys;
mod lock;
mod touch_guard;

pub use capability::{BatteryStatus, CapabilityProvider, Orientation, Support};
pub use keys::{BlockReason, KeyChord, KeyFilter};
pub use lock::{engage, EngageReport, FocusLoss, KioskLock};
pub use touch_guard::TouchGuard;
