//! Page lifecycle policy: visibility, battery-aware pacing, reduced motion and
//! the welcome animation.

use serde::Serialize;

use crate::config::PowerConfig;
use crate::kiosk::BatteryStatus;

/// Body class added while battery is low
pub const POWER_SAVING_CLASS: &str = "power-saving";

/// Body class added when the user prefers reduced motion
pub const REDUCE_MOTION_CLASS: &str = "reduce-motion";

/// Body class added when the user prefers high contrast
pub const HIGH_CONTRAST_CLASS: &str = "high-contrast";

/// Stylesheet injected alongside [`REDUCE_MOTION_CLASS`]
pub const REDUCE_MOTION_CSS: &str = "
.reduce-motion .interactive-element {
    animation: none !important;
}
.reduce-motion .screen-container {
    transition: none !important;
}
";

/// Transition used when a screen fades in on startup
pub const WELCOME_TRANSITION: &str = "opacity 0.5s ease, transform 0.5s ease";

/// Whether the float animations should be running
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    Running,
    Paused,
}

impl PlayState {
    /// Play state for a `visibilitychange` with `document.hidden == hidden`
    pub fn from_hidden(hidden: bool) -> Self {
        if hidden {
            PlayState::Paused
        } else {
            PlayState::Running
        }
    }

    /// `animation-play-state` value
    pub fn as_css(&self) -> &'static str {
        match self {
            PlayState::Running => "running",
            PlayState::Paused => "paused",
        }
    }
}

/// Animation pacing chosen from the battery state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerMode {
    Normal,
    Saving,
}

impl PowerMode {
    /// Saving when the level is below the threshold and the device is unplugged
    pub fn from_battery(status: BatteryStatus, config: &PowerConfig) -> Self {
        if status.level < config.low_battery_level && !status.charging {
            PowerMode::Saving
        } else {
            PowerMode::Normal
        }
    }

    /// Float animation period for this mode
    pub fn animation_secs(&self, config: &PowerConfig) -> f64 {
        match self {
            PowerMode::Normal => config.normal_animation_secs,
            PowerMode::Saving => config.power_saving_animation_secs,
        }
    }

    /// `animation-duration` value for this mode
    pub fn animation_duration(&self, config: &PowerConfig) -> String {
        format!("{}s", self.animation_secs(config))
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        matches!(self, PowerMode::Saving)
    }
}

/// Delay before screen `index` starts its welcome fade-in
pub fn welcome_delay_ms(index: usize, config: &PowerConfig) -> f64 {
    index as f64 * config.welcome_stagger_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery(level: f64, charging: bool) -> BatteryStatus {
        BatteryStatus { level, charging }
    }

    #[test]
    fn test_play_state_follows_visibility() {
        assert_eq!(PlayState::from_hidden(true), PlayState::Paused);
        assert_eq!(PlayState::from_hidden(false), PlayState::Running);
        assert_eq!(PlayState::Paused.as_css(), "paused");
    }

    #[test]
    fn test_low_unplugged_battery_saves_power() {
        let config = PowerConfig::default();
        let mode = PowerMode::from_battery(battery(0.15, false), &config);
        assert!(mode.is_saving());
        assert_eq!(mode.animation_duration(&config), "8s");
    }

    #[test]
    fn test_charging_keeps_normal_pace() {
        let config = PowerConfig::default();
        let mode = PowerMode::from_battery(battery(0.05, true), &config);
        assert_eq!(mode, PowerMode::Normal);
        assert_eq!(mode.animation_duration(&config), "4s");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let config = PowerConfig::default();
        assert_eq!(PowerMode::from_battery(battery(0.2, false), &config), PowerMode::Normal);
    }

    #[test]
    fn test_welcome_stagger() {
        let config = PowerConfig::default();
        assert_eq!(welcome_delay_ms(0, &config), 0.0);
        assert_eq!(welcome_delay_ms(4, &config), 400.0);
    }
}
