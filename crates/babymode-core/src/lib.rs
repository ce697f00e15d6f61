//! Baby Mode core
//!
//! Platform-independent state machines behind the Baby Mode kiosk app. Nothing
//! in this crate touches the DOM or reads a clock: every time-dependent
//! operation takes `now_ms`, randomness comes through [`animator::UnitRandom`],
//! and optional browser features come through [`kiosk::CapabilityProvider`].
//!
//! ## Modules
//!
//! - `navigator` - swipe state machine over the fixed screen set
//! - `animator` - tap animation plans and random relocation
//! - `exit` - corner-tap parent exit sequence
//! - `kiosk` - keyboard/touch lockdown policy and fullscreen lock state
//! - `lifecycle` - visibility, power saving and welcome animation policy
//! - `cache` - offline app-shell worker logic (install, activate, fetch)
//! - `testing` - in-memory doubles for the traits above
//!
//! The browser crates (`babymode-web`, `babymode-worker`) wire these to real
//! events.

pub mod animator;
pub mod cache;
pub mod config;
pub mod error;
pub mod exit;
pub mod kiosk;
pub mod lifecycle;
pub mod math;
pub mod navigator;
pub mod screens;
pub mod testing;

pub use animator::{InteractionAnimator, TapPlan, UnitRandom};
pub use cache::{
    CacheBackend, CacheManifest, CacheWorker, CachedResponse, ClickTarget, FetchOutcome,
    FetchRequest, Network, NotificationSpec, PushPayload, RequestMode, ResponseKind, SyncTask,
    WorkerMessage, WorkerScope,
};
pub use config::{
    AnimatorConfig, AppConfig, ExitConfig, KioskConfig, PowerConfig, ScreensConfig, SwipeConfig,
};
pub use error::{CacheError, CapabilityError, ConfigError};
pub use exit::{Corner, ExitDecision, ExitDetector, ExitEvent};
pub use kiosk::{
    BatteryStatus, BlockReason, CapabilityProvider, EngageReport, FocusLoss, KeyChord, KeyFilter,
    KioskLock, Orientation, Support, TouchGuard,
};
pub use lifecycle::{PlayState, PowerMode};
pub use math::{Size, Vec2};
pub use navigator::{DragSession, NavResult, ScreenNavigator};
pub use screens::{Screen, ScreenSet};
