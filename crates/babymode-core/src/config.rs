//! Tuning values for gestures, the exit sequence, kiosk behavior and power
//! saving.
//!
//! Defaults reproduce the values the app was tuned with. A partial JSON object
//! can override any subset of them:
//!
//! ```
//! use babymode_core::AppConfig;
//!
//! let config = AppConfig::from_json(r#"{ "swipe": { "minDistancePx": 80 } }"#).unwrap();
//! assert_eq!(config.swipe.min_distance_px, 80.0);
//! assert_eq!(config.exit.timeout_ms, 3000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::exit::Corner;

// =============================================================================
// Defaults
// =============================================================================

/// Damping applied to a drag past the first or last screen
pub const EDGE_RESISTANCE: f64 = 0.3;

/// Horizontal travel that commits a swipe regardless of speed
pub const MIN_SWIPE_DISTANCE_PX: f64 = 50.0;

/// Release velocity (px/ms) that commits a swipe regardless of distance
pub const MIN_SWIPE_VELOCITY: f64 = 0.3;

/// Horizontal travel before a touch counts as a drag
pub const DRAG_START_THRESHOLD_PX: f64 = 10.0;

/// How long navigation stays locked after the screen changes
pub const TRANSITION_LOCK_MS: f64 = 300.0;

/// Inactivity after which a partial exit sequence is discarded
pub const EXIT_SEQUENCE_TIMEOUT_MS: f64 = 3000.0;

/// Side length of each corner hit zone
pub const CORNER_ZONE_PX: f64 = 50.0;

/// How long the exit indicator flashes per corner tap
pub const INDICATOR_FLASH_MS: f64 = 200.0;

/// Two touch-ends closer than this are treated as a double-tap zoom
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

/// Scale-up hold before the bounce returns to rest
pub const BOUNCE_MS: f64 = 150.0;

/// Lifetime of the tap ripple element
pub const RIPPLE_LIFETIME_MS: f64 = 600.0;

/// Duration of the random relocation transition
pub const MOVE_TRANSITION_MS: f64 = 1000.0;

/// Space kept free at the right/bottom of the parent when relocating
pub const PLACEMENT_MARGIN_PX: f64 = 100.0;

/// Battery level below which power saving kicks in (when not charging)
pub const LOW_BATTERY_LEVEL: f64 = 0.2;

/// Float animation period in normal mode
pub const NORMAL_ANIMATION_SECS: f64 = 4.0;

/// Float animation period in power-saving mode
pub const POWER_SAVING_ANIMATION_SECS: f64 = 8.0;

/// Delay between consecutive screens in the welcome animation
pub const WELCOME_STAGGER_MS: f64 = 100.0;

/// Theme colors of the five default screens
pub const DEFAULT_THEME_COLORS: [&str; 5] = ["#ff6b6b", "#4ecdc4", "#ffd93d", "#6bcf7f", "#a8edea"];

// =============================================================================
// Sections
// =============================================================================

/// The fixed screen set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreensConfig {
    /// One theme color per screen; its length is the screen count
    pub theme_colors: Vec<String>,
}

impl Default for ScreensConfig {
    fn default() -> Self {
        Self {
            theme_colors: DEFAULT_THEME_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Swipe recognition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwipeConfig {
    pub edge_resistance: f64,
    pub min_distance_px: f64,
    /// px/ms
    pub min_velocity: f64,
    pub drag_start_px: f64,
    pub transition_lock_ms: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            edge_resistance: EDGE_RESISTANCE,
            min_distance_px: MIN_SWIPE_DISTANCE_PX,
            min_velocity: MIN_SWIPE_VELOCITY,
            drag_start_px: DRAG_START_THRESHOLD_PX,
            transition_lock_ms: TRANSITION_LOCK_MS,
        }
    }
}

/// Parent exit sequence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExitConfig {
    pub corner_zone_px: f64,
    pub timeout_ms: f64,
    pub indicator_flash_ms: f64,
    /// Required corner order
    pub pattern: Vec<Corner>,
    /// Confirmation prompt shown on a complete match
    pub prompt: String,
    /// Where the page goes once the parent confirms
    pub exit_url: String,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self {
            corner_zone_px: CORNER_ZONE_PX,
            timeout_ms: EXIT_SEQUENCE_TIMEOUT_MS,
            indicator_flash_ms: INDICATOR_FLASH_MS,
            pattern: Corner::DEFAULT_PATTERN.to_vec(),
            prompt: "Exit Baby Mode? This will close the app.".to_string(),
            exit_url: "about:blank".to_string(),
        }
    }
}

/// Tap animation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimatorConfig {
    pub bounce_scale: f64,
    pub bounce_ms: f64,
    pub ripple_ms: f64,
    pub move_transition_ms: f64,
    pub margin_px: f64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            bounce_scale: 1.2,
            bounce_ms: BOUNCE_MS,
            ripple_ms: RIPPLE_LIFETIME_MS,
            move_transition_ms: MOVE_TRANSITION_MS,
            margin_px: PLACEMENT_MARGIN_PX,
        }
    }
}

/// Kiosk lockdown
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KioskConfig {
    pub double_tap_window_ms: f64,
    /// Refocus the window when it loses focus while locked
    pub retain_focus: bool,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            retain_focus: true,
        }
    }
}

/// Battery-aware animation pacing and the welcome animation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PowerConfig {
    pub low_battery_level: f64,
    pub normal_animation_secs: f64,
    pub power_saving_animation_secs: f64,
    pub welcome_stagger_ms: f64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            low_battery_level: LOW_BATTERY_LEVEL,
            normal_animation_secs: NORMAL_ANIMATION_SECS,
            power_saving_animation_secs: POWER_SAVING_ANIMATION_SECS,
            welcome_stagger_ms: WELCOME_STAGGER_MS,
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete app configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub screens: ScreensConfig,
    pub swipe: SwipeConfig,
    pub exit: ExitConfig,
    pub animator: AnimatorConfig,
    pub kiosk: KioskConfig,
    pub power: PowerConfig,
}

impl AppConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of screens in the set
    pub fn screen_count(&self) -> usize {
        self.screens.theme_colors.len()
    }

    /// Reject values the state machines cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screens.theme_colors.is_empty() {
            return Err(ConfigError::NoScreens);
        }

        let swipe = &self.swipe;
        if !(swipe.edge_resistance > 0.0 && swipe.edge_resistance <= 1.0) {
            return Err(ConfigError::ResistanceOutOfRange(swipe.edge_resistance));
        }
        ConfigError::require_positive("swipe.minDistancePx", swipe.min_distance_px)?;
        ConfigError::require_positive("swipe.minVelocity", swipe.min_velocity)?;
        ConfigError::require_positive("swipe.dragStartPx", swipe.drag_start_px)?;
        ConfigError::require_positive("swipe.transitionLockMs", swipe.transition_lock_ms)?;

        let exit = &self.exit;
        if exit.pattern.is_empty() {
            return Err(ConfigError::EmptyExitPattern);
        }
        ConfigError::require_positive("exit.cornerZonePx", exit.corner_zone_px)?;
        ConfigError::require_positive("exit.timeoutMs", exit.timeout_ms)?;

        let animator = &self.animator;
        ConfigError::require_positive("animator.bounceScale", animator.bounce_scale)?;
        ConfigError::require_positive("animator.rippleMs", animator.ripple_ms)?;

        let power = &self.power;
        ConfigError::require_ratio("power.lowBatteryLevel", power.low_battery_level)?;
        ConfigError::require_positive("power.normalAnimationSecs", power.normal_animation_secs)?;
        ConfigError::require_positive(
            "power.powerSavingAnimationSecs",
            power.power_saving_animation_secs,
        )?;

        Ok(())
    }
}
