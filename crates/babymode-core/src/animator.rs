//! Tap animation planning
//!
//! The browser side owns the element; this module decides what a tap does to
//! it: how long the bounce holds, when the ripple goes away and where the
//! element moves next.

use crate::config::{AnimatorConfig, NORMAL_ANIMATION_SECS};
use crate::math::{Size, Vec2};

/// Source of uniform samples in `[0, 1)`
pub trait UnitRandom {
    fn next_unit(&mut self) -> f64;
}

impl<F: FnMut() -> f64> UnitRandom for F {
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Everything the view needs to animate one tap
#[derive(Clone, Debug, PartialEq)]
pub struct TapPlan {
    /// Scale applied immediately
    pub bounce_scale: f64,
    /// Delay before returning to scale 1 and resuming the float animation
    pub bounce_ms: f64,
    /// `animation` shorthand restored after the bounce
    pub resume_animation: String,
    /// Ripple element lifetime
    pub ripple_ms: f64,
    /// New top-left position inside the parent
    pub target: Vec2,
    /// `transition` used while moving to `target`
    pub move_transition: String,
    /// Delay before `settle_transition` replaces `move_transition`
    pub move_ms: f64,
    /// `transition` restored once the move finishes
    pub settle_transition: String,
}

/// Stateless planner for tap feedback
#[derive(Clone, Debug)]
pub struct InteractionAnimator {
    config: AnimatorConfig,
    animation_secs: f64,
}

impl InteractionAnimator {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            animation_secs: NORMAL_ANIMATION_SECS,
        }
    }

    /// Float animation period resumed after each bounce
    pub fn set_animation_secs(&mut self, secs: f64) {
        self.animation_secs = secs;
    }

    /// `animation` shorthand for the continuous float
    pub fn float_animation(&self) -> String {
        format!("float {}s ease-in-out infinite", self.animation_secs)
    }

    /// Plan the response to a tap on an element whose parent is `parent`.
    pub fn plan_tap<R: UnitRandom + ?Sized>(&self, parent: Size, rng: &mut R) -> TapPlan {
        TapPlan {
            bounce_scale: self.config.bounce_scale,
            bounce_ms: self.config.bounce_ms,
            resume_animation: self.float_animation(),
            ripple_ms: self.config.ripple_ms,
            target: random_position(parent, self.config.margin_px, rng),
            move_transition: format!("all {}s ease-out", self.config.move_transition_ms / 1000.0),
            move_ms: self.config.move_transition_ms,
            settle_transition: "all 0.3s ease".to_string(),
        }
    }
}

impl Default for InteractionAnimator {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}

/// Uniform position in `[0, width - margin) x [0, height - margin)`.
///
/// A parent smaller than the margin pins that axis to 0.
pub fn random_position<R: UnitRandom + ?Sized>(parent: Size, margin: f64, rng: &mut R) -> Vec2 {
    let room = parent.shrink(margin);
    let x = rng.next_unit().clamp(0.0, 1.0) * room.width;
    let y = rng.next_unit().clamp(0.0, 1.0) * room.height;
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SequenceRandom;

    #[test]
    fn test_position_scales_with_room() {
        let mut rng = SequenceRandom::new(vec![0.5, 0.25]);
        let p = random_position(Size::new(500.0, 900.0), 100.0, &mut rng);
        assert!((p.x - 200.0).abs() < 1e-9);
        assert!((p.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_stays_inside_parent() {
        let mut rng = SequenceRandom::new(vec![0.0, 0.999_999, 0.3, 0.7]);
        let parent = Size::new(375.0, 667.0);
        for _ in 0..4 {
            let p = random_position(parent, 100.0, &mut rng);
            assert!(p.x >= 0.0 && p.x <= 275.0);
            assert!(p.y >= 0.0 && p.y <= 567.0);
        }
    }

    #[test]
    fn test_tiny_parent_pins_to_origin() {
        let mut rng = SequenceRandom::new(vec![0.9]);
        let p = random_position(Size::new(60.0, 60.0), 100.0, &mut rng);
        assert_eq!(p, Vec2::ZERO);
    }

    #[test]
    fn test_closure_as_random_source() {
        let mut calls = 0;
        let mut rng = || {
            calls += 1;
            0.5
        };
        let p = random_position(Size::new(300.0, 300.0), 100.0, &mut rng);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_plan_uses_config_timings() {
        let animator = InteractionAnimator::default();
        let mut rng = SequenceRandom::new(vec![0.1]);
        let plan = animator.plan_tap(Size::new(400.0, 400.0), &mut rng);

        assert!((plan.bounce_scale - 1.2).abs() < 1e-9);
        assert!((plan.bounce_ms - 150.0).abs() < 1e-9);
        assert!((plan.ripple_ms - 600.0).abs() < 1e-9);
        assert_eq!(plan.resume_animation, "float 4s ease-in-out infinite");
        assert_eq!(plan.move_transition, "all 1s ease-out");
        assert_eq!(plan.settle_transition, "all 0.3s ease");
    }

    #[test]
    fn test_power_saving_slows_float() {
        let mut animator = InteractionAnimator::default();
        animator.set_animation_secs(8.0);
        assert_eq!(animator.float_animation(), "float 8s ease-in-out infinite");
    }
}
