//! Swipe navigation between screens
//!
//! Provides the drag state machine that turns raw touch coordinates into a
//! container offset and, on release, into a screen change.
//!
//! Offsets are percentages of the screen container, which is `N * 100%` of the
//! viewport wide, so one screen spans `100 / N` percent.

mod drag;
mod result;
mod state;

pub use drag::DragSession;
pub use result::NavResult;
pub use state::ScreenNavigator;

/// Width of one screen as a percentage of the container
#[inline]
pub fn screen_unit_percent(screen_count: usize) -> f64 {
    100.0 / screen_count.max(1) as f64
}

/// Resting offset of `index`
#[inline]
pub fn resting_offset(index: usize, screen_count: usize) -> f64 {
    -(index as f64) * screen_unit_percent(screen_count)
}

/// Damp an offset that has been dragged past either end of the strip.
///
/// `last_offset` is the resting offset of the final screen (a negative
/// number, or zero for a single screen). Inside `[last_offset, 0]` the offset
/// is returned unchanged.
pub fn apply_edge_resistance(offset: f64, last_offset: f64, resistance: f64) -> f64 {
    if offset > 0.0 {
        offset * resistance
    } else if offset < last_offset {
        last_offset + (offset - last_offset) * resistance
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_for_five_screens() {
        assert!((screen_unit_percent(5) - 20.0).abs() < 1e-9);
        assert!((resting_offset(3, 5) + 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_never_divides_by_zero() {
        assert!((screen_unit_percent(0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_resistance_before_first_screen() {
        let damped = apply_edge_resistance(10.0, -80.0, 0.3);
        assert!((damped - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_resistance_past_last_screen() {
        let damped = apply_edge_resistance(-90.0, -80.0, 0.3);
        assert!((damped + 83.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_resistance_inside_strip() {
        let offset = apply_edge_resistance(-35.0, -80.0, 0.3);
        assert!((offset + 35.0).abs() < 1e-9);
    }
}
