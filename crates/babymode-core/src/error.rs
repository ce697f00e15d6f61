//! Error types for configuration, browser capabilities and the offline cache.

/// Errors raised while loading or validating [`crate::AppConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON override could not be parsed.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The screen palette is empty.
    #[error("at least one screen is required")]
    NoScreens,

    /// A threshold or duration that must be positive was not.
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    /// Edge resistance must damp, never amplify or invert.
    #[error("edge resistance must be in (0, 1], got {0}")]
    ResistanceOutOfRange(f64),

    /// A ratio (battery level and similar) fell outside [0, 1].
    #[error("{name} must be within [0, 1], got {value}")]
    RatioOutOfRange { name: &'static str, value: f64 },

    /// The parent exit pattern has no steps.
    #[error("exit pattern must contain at least one corner")]
    EmptyExitPattern,
}

impl ConfigError {
    /// Check a value that must be strictly positive.
    pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
        if value > 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::NotPositive { name, value })
        }
    }

    /// Check a value that must lie within [0, 1].
    pub(crate) fn require_ratio(name: &'static str, value: f64) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::RatioOutOfRange { name, value })
        }
    }
}

/// Failure of a capability the platform does expose.
///
/// Absence of the capability is not an error; see [`crate::Support::Unavailable`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    /// The user agent refused the request (no user gesture, policy, etc).
    #[error("request denied: {0}")]
    Denied(String),

    /// The call threw or its promise rejected for another reason.
    #[error("request failed: {0}")]
    Failed(String),
}

/// Errors from cache storage, the network, or the worker scope.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// A named cache could not be opened.
    #[error("failed to open cache '{cache}': {reason}")]
    Open { cache: String, reason: String },

    /// Precaching one or more URLs failed.
    #[error("failed to precache into '{cache}': {reason}")]
    AddAll { cache: String, reason: String },

    /// Writing a response back into the cache failed.
    #[error("failed to store '{url}': {reason}")]
    Put { url: String, reason: String },

    /// Deleting a cache failed.
    #[error("failed to delete cache '{cache}': {reason}")]
    Delete { cache: String, reason: String },

    /// Listing cache names failed.
    #[error("failed to list caches: {0}")]
    Keys(String),

    /// Matching a request against the caches failed.
    #[error("cache lookup for '{url}' failed: {reason}")]
    Lookup { url: String, reason: String },

    /// The network request failed outright (offline, DNS, CORS).
    #[error("network request for '{url}' failed: {reason}")]
    Network { url: String, reason: String },

    /// A response body could not be duplicated for write-back.
    #[error("response for '{url}' could not be cloned")]
    Clone { url: String },

    /// `skipWaiting`, `clients.claim` or a similar scope call failed.
    #[error("worker scope call failed: {0}")]
    Scope(String),
}

impl CacheError {
    /// Build a network error.
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Check whether this failure came from the network rather than storage.
    pub fn is_network(&self) -> bool {
        matches!(self, CacheError::Network { .. })
    }
}
