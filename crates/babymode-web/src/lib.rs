//! Baby Mode page runtime
//!
//! Binds the state machines from `babymode-core` to the document: swipe
//! navigation, tap animation, kiosk lockdown, the corner-tap parent exit and
//! battery/visibility handling. JavaScript calls [`boot`] once and keeps the
//! returned [`BabyModeApp`].

mod animator;
mod app;
mod capabilities;
mod dom;
mod events;
mod globals;
mod kiosk;
mod lifecycle;
mod navigator;
mod parent_exit;
mod timer;
mod util;

pub use app::{boot, BabyModeApp};
pub use capabilities::BrowserCapabilities;
pub use events::{ListenOptions, Subscriptions};
pub use globals::{register_service_worker, PageGlobals, SERVICE_WORKER_URL};
pub use navigator::SETTLE_TRANSITION;
pub use timer::Timeout;
