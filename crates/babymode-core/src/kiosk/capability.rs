//! Optional browser capabilities
//!
//! Fullscreen, orientation lock and the battery API are missing on plenty of
//! devices. A provider reports each one as [`Support::Unavailable`] when the API
//! does not exist, or [`Support::Available`] with the outcome of the call.

use serde::{Deserialize, Serialize};

use crate::error::CapabilityError;

/// Availability of an optional API plus the result of using it
#[derive(Clone, Debug, PartialEq)]
pub enum Support<T> {
    Unavailable,
    Available(Result<T, CapabilityError>),
}

impl<T> Support<T> {
    /// Shorthand for a successful call
    pub fn ok(value: T) -> Self {
        Support::Available(Ok(value))
    }

    /// Shorthand for a call that was attempted and failed
    pub fn failed(error: CapabilityError) -> Self {
        Support::Available(Err(error))
    }

    /// Check whether the call was attempted and succeeded
    pub fn succeeded(&self) -> bool {
        matches!(self, Support::Available(Ok(_)))
    }

    /// The successful value, if any
    pub fn value(self) -> Option<T> {
        match self {
            Support::Available(Ok(value)) => Some(value),
            _ => None,
        }
    }
}

/// Screen orientation to lock to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// `OrientationLockType` string
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Snapshot of the battery manager
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// 0.0 to 1.0
    pub level: f64,
    pub charging: bool,
}

/// Browser features the kiosk and power-saving logic depend on
///
/// Implementations must not hold borrows of shared page state across their
/// own `.await` points.
#[allow(async_fn_in_trait)]
pub trait CapabilityProvider {
    /// Request fullscreen on the document element (standard, then prefixed)
    async fn request_fullscreen(&self) -> Support<()>;

    /// Lock the screen orientation
    async fn lock_orientation(&self, orientation: Orientation) -> Support<()>;

    /// Read the current battery state
    async fn battery(&self) -> Support<BatteryStatus>;

    /// Leave fullscreen (standard, then prefixed). Fire and forget.
    fn exit_fullscreen(&self);
}
