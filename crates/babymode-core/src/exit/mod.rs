//! Parent exit sequence
//!
//! A parent leaves kiosk mode by tapping the four screen corners in a fixed
//! order within a few seconds. The detector never prompts itself; it reports
//! [`ExitEvent::Matched`] and the page asks for confirmation.

mod corner;
mod detector;

pub use corner::Corner;
pub use detector::{ExitDecision, ExitDetector, ExitEvent};
