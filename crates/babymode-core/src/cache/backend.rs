//! Seams between the caching policy and the platform

use super::{FetchRequest, ResponseKind};
use crate::error::CacheError;

/// A response that can be inspected and duplicated
///
/// Bodies are streams: once a response is handed to the cache or to the page
/// it is consumed, so storing and returning the same response needs a
/// duplicate.
pub trait CachedResponse: Sized {
    fn status(&self) -> u16;

    fn kind(&self) -> ResponseKind;

    /// `Response.clone()`
    fn duplicate(&self) -> Result<Self, CacheError>;
}

/// Named caches (`CacheStorage`)
#[allow(async_fn_in_trait)]
pub trait CacheBackend {
    type Response: CachedResponse;

    /// Open `cache` and store every URL in `urls`, failing if any fetch fails
    async fn add_all(&self, cache: &str, urls: &[&str]) -> Result<(), CacheError>;

    /// Names of every cache in storage
    async fn cache_names(&self) -> Result<Vec<String>, CacheError>;

    /// Delete a cache. Returns false if it did not exist.
    async fn delete_cache(&self, cache: &str) -> Result<bool, CacheError>;

    /// Look `request` up across all caches
    async fn lookup(&self, request: &FetchRequest) -> Result<Option<Self::Response>, CacheError>;

    /// Store `response` under `request` in `cache`
    async fn put(
        &self,
        cache: &str,
        request: &FetchRequest,
        response: Self::Response,
    ) -> Result<(), CacheError>;
}

/// Outbound fetch
#[allow(async_fn_in_trait)]
pub trait Network {
    type Response;

    /// Fetch `request`. A response with an error status is still `Ok`; only
    /// a failure to get any response is an error.
    async fn fetch(&self, request: &FetchRequest) -> Result<Self::Response, CacheError>;
}

/// Service worker lifecycle controls
#[allow(async_fn_in_trait)]
pub trait WorkerScope {
    /// Activate without waiting for old clients to close
    async fn skip_waiting(&self) -> Result<(), CacheError>;

    /// Take control of already-open clients
    async fn claim_clients(&self) -> Result<(), CacheError>;
}
