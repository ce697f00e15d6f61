//! In-memory cache storage for testing.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::cache::{CacheBackend, CachedResponse, FetchRequest, ResponseKind};
use crate::error::CacheError;

/// Canned response with a text body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryResponse {
    pub status: u16,
    pub kind: ResponseKind,
    pub body: String,
}

impl MemoryResponse {
    /// 200, same-origin
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            kind: ResponseKind::Basic,
            body: body.into(),
        }
    }

    /// Same-origin response with an empty body
    pub fn status(status: u16) -> Self {
        Self {
            status,
            kind: ResponseKind::Basic,
            body: String::new(),
        }
    }

    pub fn with_kind(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }
}

impl CachedResponse for MemoryResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn kind(&self) -> ResponseKind {
        self.kind
    }

    fn duplicate(&self) -> Result<Self, CacheError> {
        Ok(self.clone())
    }
}

/// Named caches kept in nested maps (cache name -> url -> response).
#[derive(Default)]
pub struct MemoryCaches {
    caches: RefCell<BTreeMap<String, BTreeMap<String, MemoryResponse>>>,
    fail_add_all: bool,
    fail_put: bool,
}

impl MemoryCaches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `add_all` fail, as if a shell URL 404'd
    pub fn failing_add_all(mut self) -> Self {
        self.fail_add_all = true;
        self
    }

    /// Make every `put` fail, as if storage quota ran out
    pub fn failing_put(mut self) -> Self {
        self.fail_put = true;
        self
    }

    /// Seed an entry, creating the cache if needed.
    pub fn insert(&self, cache: &str, url: &str, response: MemoryResponse) {
        self.caches
            .borrow_mut()
            .entry(cache.to_string())
            .or_default()
            .insert(url.to_string(), response);
    }

    pub fn contains(&self, cache: &str, url: &str) -> bool {
        self.caches
            .borrow()
            .get(cache)
            .is_some_and(|entries| entries.contains_key(url))
    }

    /// Cache names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.caches.borrow().keys().cloned().collect()
    }

    /// Number of entries in `cache`.
    pub fn len(&self, cache: &str) -> usize {
        self.caches.borrow().get(cache).map_or(0, BTreeMap::len)
    }
}

impl CacheBackend for MemoryCaches {
    type Response = MemoryResponse;

    async fn add_all(&self, cache: &str, urls: &[&str]) -> Result<(), CacheError> {
        if self.fail_add_all {
            return Err(CacheError::AddAll {
                cache: cache.to_string(),
                reason: "request failed".to_string(),
            });
        }
        let mut caches = self.caches.borrow_mut();
        let entries = caches.entry(cache.to_string()).or_default();
        for url in urls {
            entries.insert(url.to_string(), MemoryResponse::ok(*url));
        }
        Ok(())
    }

    async fn cache_names(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.names())
    }

    async fn delete_cache(&self, cache: &str) -> Result<bool, CacheError> {
        Ok(self.caches.borrow_mut().remove(cache).is_some())
    }

    async fn lookup(&self, request: &FetchRequest) -> Result<Option<MemoryResponse>, CacheError> {
        // Like `Cache.match`, entries are keyed by GET requests
        if !request.is_get() {
            return Ok(None);
        }
        let caches = self.caches.borrow();
        Ok(caches
            .values()
            .find_map(|entries| entries.get(&request.url))
            .cloned())
    }

    async fn put(
        &self,
        cache: &str,
        request: &FetchRequest,
        response: MemoryResponse,
    ) -> Result<(), CacheError> {
        if self.fail_put {
            return Err(CacheError::Put {
                url: request.url.clone(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.insert(cache, &request.url, response);
        Ok(())
    }
}
