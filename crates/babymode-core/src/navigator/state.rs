//! Screen navigator state machine

use super::{apply_edge_resistance, resting_offset, screen_unit_percent, DragSession, NavResult};
use crate::config::SwipeConfig;

/// Tracks the active screen and the touch gesture in progress
///
/// ```text
///   idle ──begin_drag──▶ armed ──update (|dx| > |dy|, |dx| > 10)──▶ dragging
///     ▲                    │                                          │
///     └────── end_drag ────┴─────────────── end_drag (settle) ◀───────┘
/// ```
///
/// Every settle holds a transition lock for `transition_lock_ms`; touches and
/// [`ScreenNavigator::go_to_screen`] are ignored until it lapses.
#[derive(Clone, Debug)]
pub struct ScreenNavigator {
    config: SwipeConfig,
    screen_count: usize,
    current: usize,
    drag: Option<DragSession>,
    locked_until_ms: f64,
}

impl ScreenNavigator {
    /// Create a navigator over `screen_count` screens, starting at screen 0
    pub fn new(screen_count: usize, config: SwipeConfig) -> Self {
        Self {
            config,
            screen_count: screen_count.max(1),
            current: 0,
            drag: None,
            locked_until_ms: f64::NEG_INFINITY,
        }
    }

    /// Active screen index
    #[inline]
    pub fn current_screen(&self) -> usize {
        self.current
    }

    /// Number of screens
    #[inline]
    pub fn screen_count(&self) -> usize {
        self.screen_count
    }

    /// Current drag session, if a touch is down
    #[inline]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Check if the transition lock is held at `now_ms`
    #[inline]
    pub fn is_transitioning(&self, now_ms: f64) -> bool {
        now_ms < self.locked_until_ms
    }

    /// Resting offset of the active screen
    #[inline]
    pub fn offset(&self) -> f64 {
        resting_offset(self.current, self.screen_count)
    }

    /// Candidate container offset for a drag of `delta_x` px.
    ///
    /// Moves one screen-width per full container width of travel and damps
    /// travel past the first or last screen.
    pub fn drag_offset(&self, delta_x: f64, container_width: f64) -> f64 {
        let unit = screen_unit_percent(self.screen_count);
        let drag = if container_width > 0.0 {
            delta_x / container_width * unit
        } else {
            0.0
        };
        let last = resting_offset(self.screen_count - 1, self.screen_count);
        apply_edge_resistance(self.offset() + drag, last, self.config.edge_resistance)
    }

    /// Capture a touch-start
    pub fn begin_drag(&mut self, x: f64, y: f64, now_ms: f64) -> NavResult {
        if self.is_transitioning(now_ms) {
            return NavResult::Ignored;
        }
        self.drag = Some(DragSession::new(x, y, now_ms));
        NavResult::Armed
    }

    /// Track a touch-move.
    ///
    /// Returns [`NavResult::Drag`] only for horizontal-dominant movement past
    /// the drag threshold; vertical-dominant movement is left to the page.
    pub fn update_drag(&mut self, x: f64, y: f64, container_width: f64, now_ms: f64) -> NavResult {
        if self.is_transitioning(now_ms) {
            return NavResult::Ignored;
        }
        let drag_start_px = self.config.drag_start_px;
        let session = match self.drag.as_mut() {
            Some(session) => session,
            None => return NavResult::Ignored,
        };

        session.current_x = x;
        let travel = session.travel(y);

        if travel.is_horizontal() && travel.x.abs() > drag_start_px {
            session.dragging = true;
            NavResult::Drag {
                offset: self.drag_offset(travel.x, container_width),
            }
        } else {
            NavResult::Ignored
        }
    }

    /// Finish the gesture started by [`ScreenNavigator::begin_drag`].
    ///
    /// The session is discarded in every case. Touches that never became a
    /// horizontal drag are ignored.
    pub fn end_drag(&mut self, now_ms: f64) -> NavResult {
        let session = match self.drag.take() {
            Some(session) => session,
            None => return NavResult::Ignored,
        };
        if self.is_transitioning(now_ms) || !session.dragging {
            return NavResult::Ignored;
        }
        self.release(session.delta_x(), session.elapsed_ms(now_ms), now_ms)
    }

    /// Drop the current session without settling (touch-cancel)
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Decide where a released drag settles.
    ///
    /// A swipe commits when `|delta_x|` exceeds the distance threshold or the
    /// velocity `|delta_x| / elapsed_ms` exceeds the velocity threshold.
    /// Negative travel advances, positive travel retreats, bounded to the set.
    pub fn release(&mut self, delta_x: f64, elapsed_ms: f64, now_ms: f64) -> NavResult {
        let distance = delta_x.abs();
        let velocity = if elapsed_ms > 0.0 {
            distance / elapsed_ms
        } else if distance > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let previous = self.current;
        let commit = distance > self.config.min_distance_px || velocity > self.config.min_velocity;
        if commit {
            if delta_x > 0.0 && self.current > 0 {
                self.current -= 1;
            } else if delta_x < 0.0 && self.current + 1 < self.screen_count {
                self.current += 1;
            }
        }

        self.settle(previous, now_ms)
    }

    /// Jump to `index` unless it is out of range or a transition is running.
    ///
    /// Returns the settle result, or `None` if the request was ignored.
    pub fn go_to_screen(&mut self, index: usize, now_ms: f64) -> Option<NavResult> {
        if index >= self.screen_count || self.is_transitioning(now_ms) {
            return None;
        }
        let previous = self.current;
        self.current = index;
        Some(self.settle(previous, now_ms))
    }

    /// Lock transitions and report the resting position
    fn settle(&mut self, previous: usize, now_ms: f64) -> NavResult {
        self.locked_until_ms = now_ms + self.config.transition_lock_ms;
        NavResult::Settle {
            index: self.current,
            changed: previous != self.current,
            offset: self.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TRANSITION_LOCK_MS;

    fn navigator() -> ScreenNavigator {
        ScreenNavigator::new(5, SwipeConfig::default())
    }

    /// Run a complete horizontal gesture from x=300 to x=300+dx
    fn swipe(nav: &mut ScreenNavigator, dx: f64, duration_ms: f64, start_ms: f64) -> NavResult {
        nav.begin_drag(300.0, 400.0, start_ms);
        nav.update_drag(300.0 + dx, 400.0, 1000.0, start_ms + duration_ms / 2.0);
        nav.end_drag(start_ms + duration_ms)
    }

    #[test]
    fn test_long_left_swipe_advances() {
        let mut nav = navigator();
        let result = swipe(&mut nav, -80.0, 200.0, 0.0);

        assert_eq!(nav.current_screen(), 1);
        assert_eq!(
            result,
            NavResult::Settle {
                index: 1,
                changed: true,
                offset: -20.0
            }
        );
    }

    #[test]
    fn test_short_slow_swipe_snaps_back() {
        let mut nav = navigator();
        let result = swipe(&mut nav, -20.0, 200.0, 0.0);

        assert_eq!(nav.current_screen(), 0);
        assert_eq!(result.settled_index(), Some(0));
        assert!(matches!(result, NavResult::Settle { changed: false, .. }));
    }

    #[test]
    fn test_fast_flick_commits() {
        let mut nav = navigator();
        // 40px in 100ms = 0.4 px/ms
        swipe(&mut nav, -40.0, 100.0, 0.0);
        assert_eq!(nav.current_screen(), 1);
    }

    #[test]
    fn test_right_swipe_retreats() {
        let mut nav = navigator();
        nav.go_to_screen(3, 0.0);
        swipe(&mut nav, 120.0, 300.0, 1000.0);
        assert_eq!(nav.current_screen(), 2);
    }

    #[test]
    fn test_bounded_at_first_screen() {
        let mut nav = navigator();
        swipe(&mut nav, 200.0, 100.0, 0.0);
        assert_eq!(nav.current_screen(), 0);
    }

    #[test]
    fn test_bounded_at_last_screen() {
        let mut nav = navigator();
        nav.go_to_screen(4, 0.0);
        swipe(&mut nav, -200.0, 100.0, 1000.0);
        assert_eq!(nav.current_screen(), 4);
    }

    #[test]
    fn test_vertical_gesture_is_ignored() {
        let mut nav = navigator();
        nav.begin_drag(300.0, 400.0, 0.0);
        let moved = nav.update_drag(240.0, 600.0, 1000.0, 50.0);
        assert_eq!(moved, NavResult::Ignored);

        let released = nav.end_drag(100.0);
        assert_eq!(released, NavResult::Ignored);
        assert_eq!(nav.current_screen(), 0);
        assert!(nav.drag_session().is_none());
    }

    #[test]
    fn test_small_jitter_does_not_start_drag() {
        let mut nav = navigator();
        nav.begin_drag(300.0, 400.0, 0.0);
        assert_eq!(nav.update_drag(292.0, 401.0, 1000.0, 20.0), NavResult::Ignored);
        assert_eq!(nav.end_drag(40.0), NavResult::Ignored);
    }

    #[test]
    fn test_drag_offset_follows_finger() {
        let mut nav = navigator();
        nav.go_to_screen(2, 0.0);
        // Half a container width of travel = half a screen unit
        let offset = nav.drag_offset(-500.0, 1000.0);
        assert!((offset + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_offset_resisted_at_edges() {
        let nav = navigator();
        // +100px on a 1000px container = +2%, damped to 0.6%
        let offset = nav.drag_offset(100.0, 1000.0);
        assert!((offset - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_drag_offset_zero_width_container() {
        let nav = navigator();
        assert_eq!(nav.drag_offset(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_transition_lock_blocks_touches() {
        let mut nav = navigator();
        swipe(&mut nav, -80.0, 200.0, 0.0);
        assert!(nav.is_transitioning(250.0));

        assert_eq!(nav.begin_drag(300.0, 400.0, 250.0), NavResult::Ignored);
        assert!(!nav.is_transitioning(200.0 + TRANSITION_LOCK_MS));
        assert_eq!(nav.begin_drag(300.0, 400.0, 200.0 + TRANSITION_LOCK_MS), NavResult::Armed);
    }

    #[test]
    fn test_go_to_screen() {
        let mut nav = navigator();
        let result = nav.go_to_screen(3, 0.0).unwrap();
        assert_eq!(result.settled_index(), Some(3));
        assert_eq!(nav.current_screen(), 3);

        // Locked
        assert!(nav.go_to_screen(1, 100.0).is_none());
        assert_eq!(nav.current_screen(), 3);

        // Out of range
        assert!(nav.go_to_screen(5, 1000.0).is_none());
        assert_eq!(nav.current_screen(), 3);
    }

    #[test]
    fn test_release_with_zero_elapsed() {
        let mut nav = navigator();
        nav.release(-5.0, 0.0, 0.0);
        assert_eq!(nav.current_screen(), 1);

        let mut nav = navigator();
        nav.release(0.0, 0.0, 0.0);
        assert_eq!(nav.current_screen(), 0);
    }

    #[test]
    fn test_cancel_drag_discards_session() {
        let mut nav = navigator();
        nav.begin_drag(300.0, 400.0, 0.0);
        nav.update_drag(100.0, 400.0, 1000.0, 50.0);
        nav.cancel_drag();
        assert_eq!(nav.end_drag(100.0), NavResult::Ignored);
        assert_eq!(nav.current_screen(), 0);
    }
}
