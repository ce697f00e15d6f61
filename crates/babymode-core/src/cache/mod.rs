//! Offline app-shell caching
//!
//! Install, activate and fetch handling for the service worker, written
//! against [`CacheBackend`], [`Network`] and [`WorkerScope`] so it runs the
//! same over browser `CacheStorage` and the in-memory doubles in
//! [`crate::testing`].

mod backend;
mod manifest;
mod message;
mod request;
mod worker;

pub use backend::{CacheBackend, CachedResponse, Network, WorkerScope};
pub use manifest::{CacheManifest, WORKER_SCRIPT, WORKER_WASM};
pub use message::{
    ClickTarget, NotificationSpec, PushPayload, SyncTask, WorkerMessage, CLIENT_URL_MARKER,
    NOTIFICATION_BODY, NOTIFICATION_TAG, NOTIFICATION_TITLE, OPEN_URL,
};
pub use request::{is_cacheable, FetchRequest, RequestMode, ResponseKind};
pub use worker::{CacheWorker, FetchOutcome};
