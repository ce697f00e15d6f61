//! Corner-tap sequence state machine

use super::Corner;
use crate::config::ExitConfig;
use crate::kiosk::{CapabilityProvider, KioskLock};
use crate::math::Size;

/// Outcome of feeding one touch to the detector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitEvent {
    /// Not a single-finger corner touch
    Ignored,
    /// Corner appended; `len` entries are now buffered
    Recorded { corner: Corner, len: usize },
    /// The buffer filled up with the wrong order and was cleared
    Mismatch,
    /// The buffer matched the required order and was cleared; ask the parent
    Matched,
}

impl ExitEvent {
    /// Check whether the touch landed in a corner (and should flash the indicator)
    #[inline]
    pub fn is_corner_touch(&self) -> bool {
        !matches!(self, ExitEvent::Ignored)
    }
}

/// What to do after the parent answered the confirmation prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExitDecision {
    /// Kiosk released; navigate to `url`
    Leave { url: String },
    /// Declined; stay locked and wait for a fresh sequence
    Stay,
}

/// Buffers corner taps and compares them against the required pattern
///
/// The inactivity timeout is modelled as a deadline: every append re-arms it,
/// and the buffer is discarded once `now_ms` reaches it. The page also runs a
/// real timer that calls [`ExitDetector::clear`] so the buffer empties even if
/// no further touch arrives.
#[derive(Clone, Debug)]
pub struct ExitDetector {
    config: ExitConfig,
    buffer: Vec<Corner>,
    deadline_ms: Option<f64>,
}

impl ExitDetector {
    pub fn new(config: ExitConfig) -> Self {
        let capacity = config.pattern.len();
        Self {
            config,
            buffer: Vec::with_capacity(capacity),
            deadline_ms: None,
        }
    }

    /// Corners tapped so far
    #[inline]
    pub fn sequence(&self) -> &[Corner] {
        &self.buffer
    }

    /// When the buffered sequence expires, if anything is buffered
    #[inline]
    pub fn deadline_ms(&self) -> Option<f64> {
        self.deadline_ms
    }

    /// Inactivity timeout
    #[inline]
    pub fn timeout_ms(&self) -> f64 {
        self.config.timeout_ms
    }

    /// Feed a touch-start with `touches` fingers down, the first at `(x, y)`.
    pub fn on_touch(
        &mut self,
        touches: usize,
        x: f64,
        y: f64,
        viewport: Size,
        now_ms: f64,
    ) -> ExitEvent {
        self.expire(now_ms);
        if touches != 1 {
            return ExitEvent::Ignored;
        }
        match Corner::at(x, y, viewport, self.config.corner_zone_px) {
            Some(corner) => self.record(corner, now_ms),
            None => ExitEvent::Ignored,
        }
    }

    /// Append a corner and evaluate the sequence once it is full.
    pub fn record(&mut self, corner: Corner, now_ms: f64) -> ExitEvent {
        self.expire(now_ms);
        self.buffer.push(corner);

        if self.buffer.len() < self.config.pattern.len() {
            self.deadline_ms = Some(now_ms + self.config.timeout_ms);
            return ExitEvent::Recorded {
                corner,
                len: self.buffer.len(),
            };
        }

        let matched = self.buffer == self.config.pattern;
        self.clear();
        if matched {
            ExitEvent::Matched
        } else {
            ExitEvent::Mismatch
        }
    }

    /// Discard the buffer if its deadline has passed. Returns true if it did.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Apply the parent's answer to the confirmation prompt.
    ///
    /// Accepting releases the kiosk lock. Declining leaves the lock engaged
    /// and empties the buffer so the next sequence starts from scratch.
    pub fn resolve_prompt<P: CapabilityProvider + ?Sized>(
        &mut self,
        accepted: bool,
        lock: &mut KioskLock,
        provider: &P,
    ) -> ExitDecision {
        self.clear();
        if !accepted {
            return ExitDecision::Stay;
        }
        lock.disable(provider);
        ExitDecision::Leave {
            url: self.config.exit_url.clone(),
        }
    }

    /// Drop everything buffered and disarm the deadline
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.deadline_ms = None;
    }
}

impl Default for ExitDetector {
    fn default() -> Self {
        Self::new(ExitConfig::default())
    }
}
