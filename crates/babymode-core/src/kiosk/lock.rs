//! Fullscreen and orientation lock state

use std::cell::RefCell;

use super::{CapabilityProvider, Orientation, Support};
use crate::config::KioskConfig;

/// What made the window lose focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusLoss {
    /// `blur` on the window
    Blur,
    /// `visibilitychange` with the document hidden
    Hidden,
}

/// Outcome of [`engage`], for logging
#[derive(Clone, Debug, PartialEq)]
pub struct EngageReport {
    pub fullscreen: Support<()>,
    pub orientation: Support<()>,
}

/// Kiosk lock flags
///
/// `locked` follows the fullscreen request: it is set unless the request was
/// attempted and rejected, and cleared by [`KioskLock::disable`].
#[derive(Clone, Debug)]
pub struct KioskLock {
    config: KioskConfig,
    locked: bool,
    orientation_locked: bool,
}

impl KioskLock {
    pub fn new(config: KioskConfig) -> Self {
        Self {
            config,
            locked: false,
            orientation_locked: false,
        }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn is_orientation_locked(&self) -> bool {
        self.orientation_locked
    }

    #[inline]
    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    /// Apply the outcome of a fullscreen request.
    ///
    /// A platform without any fullscreen API still counts as locked; only a
    /// rejected request leaves the lock released.
    pub fn record_fullscreen(&mut self, outcome: &Support<()>) {
        self.locked = !matches!(outcome, Support::Available(Err(_)));
    }

    pub fn record_orientation(&mut self, outcome: &Support<()>) {
        self.orientation_locked = outcome.succeeded();
    }

    /// Leave fullscreen and clear the lock flag
    pub fn disable<P: CapabilityProvider + ?Sized>(&mut self, provider: &P) {
        provider.exit_fullscreen();
        self.locked = false;
        self.orientation_locked = false;
    }

    /// Check whether the window should grab focus back after `loss`
    pub fn should_refocus(&self, loss: FocusLoss) -> bool {
        if !self.config.retain_focus {
            return false;
        }
        match loss {
            FocusLoss::Blur => true,
            FocusLoss::Hidden => self.locked,
        }
    }
}

impl Default for KioskLock {
    fn default() -> Self {
        Self::new(KioskConfig::default())
    }
}

/// Request fullscreen, then the portrait orientation lock, recording both.
///
/// The `RefCell` is only borrowed between the awaits, so other handlers may
/// read the lock while a request is pending.
pub async fn engage<P: CapabilityProvider + ?Sized>(
    lock: &RefCell<KioskLock>,
    provider: &P,
) -> EngageReport {
    let fullscreen = provider.request_fullscreen().await;
    lock.borrow_mut().record_fullscreen(&fullscreen);

    let orientation = provider.lock_orientation(Orientation::Portrait).await;
    lock.borrow_mut().record_orientation(&orientation);

    EngageReport {
        fullscreen,
        orientation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapabilityError;
    use crate::testing::ScriptedCapabilities;

    #[test]
    fn test_engage_success() {
        let lock = RefCell::new(KioskLock::default());
        let provider = ScriptedCapabilities::supported();

        let report = pollster::block_on(engage(&lock, &provider));

        assert!(report.fullscreen.succeeded());
        assert!(report.orientation.succeeded());
        assert!(lock.borrow().is_locked());
        assert!(lock.borrow().is_orientation_locked());
        assert_eq!(provider.orientation_requests(), vec![Orientation::Portrait]);
    }

    #[test]
    fn test_engage_denied_fullscreen_is_not_fatal() {
        let lock = RefCell::new(KioskLock::default());
        let provider = ScriptedCapabilities::supported()
            .with_fullscreen(Support::failed(CapabilityError::Denied("no gesture".into())));

        let report = pollster::block_on(engage(&lock, &provider));

        assert!(!report.fullscreen.succeeded());
        assert!(!lock.borrow().is_locked());
        // Orientation is still attempted
        assert!(lock.borrow().is_orientation_locked());
    }

    #[test]
    fn test_engage_without_apis() {
        let lock = RefCell::new(KioskLock::default());
        let provider = ScriptedCapabilities::unsupported();

        let report = pollster::block_on(engage(&lock, &provider));

        assert_eq!(report.fullscreen, Support::Unavailable);
        assert!(lock.borrow().is_locked());
        assert!(!lock.borrow().is_orientation_locked());
    }

    #[test]
    fn test_disable_releases_lock() {
        let provider = ScriptedCapabilities::supported();
        let mut lock = KioskLock::default();
        lock.record_fullscreen(&Support::ok(()));

        lock.disable(&provider);

        assert!(!lock.is_locked());
        assert_eq!(provider.exit_calls(), 1);
    }

    #[test]
    fn test_refocus_rules() {
        let mut lock = KioskLock::default();
        assert!(lock.should_refocus(FocusLoss::Blur));
        assert!(!lock.should_refocus(FocusLoss::Hidden));

        lock.record_fullscreen(&Support::ok(()));
        assert!(lock.should_refocus(FocusLoss::Hidden));

        let mut relaxed = KioskLock::new(KioskConfig {
            retain_focus: false,
            ..KioskConfig::default()
        });
        relaxed.record_fullscreen(&Support::ok(()));
        assert!(!relaxed.should_refocus(FocusLoss::Blur));
        assert!(!relaxed.should_refocus(FocusLoss::Hidden));
    }
}
