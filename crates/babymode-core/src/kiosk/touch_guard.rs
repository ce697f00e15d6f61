//! Multi-touch and double-tap zoom suppression

use crate::config::DOUBLE_TAP_WINDOW_MS;

/// Decides which touch events must have their default action prevented
///
/// Every method returns `true` when the caller should call `preventDefault()`.
#[derive(Clone, Debug)]
pub struct TouchGuard {
    window_ms: f64,
    last_touch_end_ms: Option<f64>,
}

impl TouchGuard {
    pub fn new(double_tap_window_ms: f64) -> Self {
        Self {
            window_ms: double_tap_window_ms,
            last_touch_end_ms: None,
        }
    }

    /// Pinch and long-press gestures start with more than one finger
    #[inline]
    pub fn on_touch_start(&self, touches: usize) -> bool {
        touches > 1
    }

    #[inline]
    pub fn on_touch_move(&self, touches: usize) -> bool {
        touches > 1
    }

    /// `remaining` is the number of fingers still down after this touch-end.
    pub fn on_touch_end(&mut self, remaining: usize, now_ms: f64) -> bool {
        let double_tap = self
            .last_touch_end_ms
            .is_some_and(|last| now_ms - last <= self.window_ms);
        self.last_touch_end_ms = Some(now_ms);
        remaining > 0 || double_tap
    }
}

impl Default for TouchGuard {
    fn default() -> Self {
        Self::new(DOUBLE_TAP_WINDOW_MS)
    }
}
