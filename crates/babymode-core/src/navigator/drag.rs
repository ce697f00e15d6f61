//! Drag session captured between touch-start and touch-end

use crate::math::Vec2;

/// Ephemeral state of one touch gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Touch position at touch-start
    pub start: Vec2,
    /// Latest horizontal position
    pub current_x: f64,
    /// Timestamp of touch-start (ms)
    pub start_ms: f64,
    /// Set once horizontal travel passed the drag threshold
    pub dragging: bool,
}

impl DragSession {
    /// Start a session at `(x, y)`
    pub fn new(x: f64, y: f64, start_ms: f64) -> Self {
        Self {
            start: Vec2::new(x, y),
            current_x: x,
            start_ms,
            dragging: false,
        }
    }

    /// Horizontal travel so far (negative = towards the next screen)
    #[inline]
    pub fn delta_x(&self) -> f64 {
        self.current_x - self.start.x
    }

    /// Travel from touch-start to the latest x and the given y
    #[inline]
    pub fn travel(&self, y: f64) -> Vec2 {
        Vec2::new(self.current_x, y) - self.start
    }

    /// Time since touch-start
    #[inline]
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.start_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_not_dragging() {
        let session = DragSession::new(200.0, 300.0, 1000.0);
        assert!(!session.dragging);
        assert_eq!(session.delta_x(), 0.0);
    }

    #[test]
    fn test_delta_and_elapsed() {
        let mut session = DragSession::new(200.0, 300.0, 1000.0);
        session.current_x = 120.0;
        assert!((session.delta_x() + 80.0).abs() < 1e-9);
        assert!((session.elapsed_ms(1200.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_travel_reports_both_axes() {
        let mut session = DragSession::new(200.0, 300.0, 0.0);
        session.current_x = 150.0;
        let travel = session.travel(320.0);
        assert!((travel.x + 50.0).abs() < 1e-9);
        assert!((travel.y - 20.0).abs() < 1e-9);
        assert!(travel.is_horizontal());
    }
}
