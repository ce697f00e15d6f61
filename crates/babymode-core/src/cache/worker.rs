//! Cache-first worker policy

use super::{
    is_cacheable, CacheBackend, CacheManifest, CachedResponse, FetchRequest, Network, WorkerScope,
};
use crate::error::CacheError;

/// How a fetch was answered
#[derive(Debug)]
pub enum FetchOutcome<R> {
    /// Served from cache
    Cached(R),
    /// Served from the network; `stored` is true if a copy was cached
    Network { response: R, stored: bool },
    /// Network failed on a navigation; served the cached shell document
    Fallback(R),
    /// Nothing to serve
    Unavailable(CacheError),
}

impl<R> FetchOutcome<R> {
    /// The response to hand to `respondWith`, if any
    pub fn into_response(self) -> Option<R> {
        match self {
            FetchOutcome::Cached(r)
            | FetchOutcome::Network { response: r, .. }
            | FetchOutcome::Fallback(r) => Some(r),
            FetchOutcome::Unavailable(_) => None,
        }
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Cached(_) => "cache",
            FetchOutcome::Network { stored: true, .. } => "network (stored)",
            FetchOutcome::Network { stored: false, .. } => "network",
            FetchOutcome::Fallback(_) => "fallback",
            FetchOutcome::Unavailable(_) => "unavailable",
        }
    }
}

/// App-shell caching for one manifest version
#[derive(Clone, Copy, Debug, Default)]
pub struct CacheWorker {
    manifest: CacheManifest,
}

impl CacheWorker {
    pub fn new(manifest: CacheManifest) -> Self {
        Self { manifest }
    }

    #[inline]
    pub fn manifest(&self) -> &CacheManifest {
        &self.manifest
    }

    /// Populate the shell cache, then skip waiting.
    pub async fn install<C, S>(&self, caches: &C, scope: &S) -> Result<(), CacheError>
    where
        C: CacheBackend + ?Sized,
        S: WorkerScope + ?Sized,
    {
        caches.add_all(self.manifest.name, self.manifest.shell).await?;
        scope.skip_waiting().await
    }

    /// Delete every other cache version, then claim clients.
    ///
    /// Returns the names that were deleted.
    pub async fn activate<C, S>(&self, caches: &C, scope: &S) -> Result<Vec<String>, CacheError>
    where
        C: CacheBackend + ?Sized,
        S: WorkerScope + ?Sized,
    {
        let names = caches.cache_names().await?;
        let mut deleted = Vec::new();
        for name in self.manifest.stale(&names) {
            if caches.delete_cache(name).await? {
                deleted.push(name.to_string());
            }
        }
        scope.claim_clients().await?;
        Ok(deleted)
    }

    /// Answer an intercepted fetch: cache first, then network, then the
    /// cached shell document for navigations.
    ///
    /// Only GET requests are looked up or stored. A failed cache lookup is
    /// treated as a miss. A failed write-back still returns the network
    /// response.
    pub async fn respond<C, N>(
        &self,
        request: &FetchRequest,
        caches: &C,
        network: &N,
    ) -> FetchOutcome<C::Response>
    where
        C: CacheBackend + ?Sized,
        N: Network<Response = C::Response> + ?Sized,
    {
        if request.is_get() {
            if let Ok(Some(hit)) = caches.lookup(request).await {
                return FetchOutcome::Cached(hit);
            }
        }

        match network.fetch(request).await {
            Ok(response) => {
                if !request.is_get() || !is_cacheable(response.status(), response.kind()) {
                    return FetchOutcome::Network {
                        response,
                        stored: false,
                    };
                }
                let stored = self.write_back(request, &response, caches).await.is_ok();
                FetchOutcome::Network { response, stored }
            }
            Err(error) if request.is_navigation() => {
                let shell = FetchRequest::get(self.manifest.fallback);
                match caches.lookup(&shell).await {
                    Ok(Some(document)) => FetchOutcome::Fallback(document),
                    _ => FetchOutcome::Unavailable(error),
                }
            }
            Err(error) => FetchOutcome::Unavailable(error),
        }
    }

    async fn write_back<C>(
        &self,
        request: &FetchRequest,
        response: &C::Response,
        caches: &C,
    ) -> Result<(), CacheError>
    where
        C: CacheBackend + ?Sized,
    {
        let copy = response.duplicate()?;
        caches.put(self.manifest.name, request, copy).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{RequestMode, ResponseKind};
    use crate::testing::{MemoryCaches, MemoryNetwork, MemoryResponse, RecordingScope};
    use pollster::block_on;

    fn worker() -> CacheWorker {
        CacheWorker::default()
    }

    #[test]
    fn test_install_caches_shell_and_skips_waiting() {
        let caches = MemoryCaches::new();
        let scope = RecordingScope::new();

        block_on(worker().install(&caches, &scope)).unwrap();

        for url in CacheManifest::DEFAULT.shell {
            assert!(caches.contains("baby-mode-v1", url), "{url} not cached");
        }
        assert_eq!(caches.len("baby-mode-v1"), CacheManifest::DEFAULT.shell.len());
        assert_eq!(scope.skip_waiting_calls(), 1);
    }

    #[test]
    fn test_install_failure_does_not_skip_waiting() {
        let caches = MemoryCaches::new().failing_add_all();
        let scope = RecordingScope::new();

        let result = block_on(worker().install(&caches, &scope));

        assert!(matches!(result, Err(CacheError::AddAll { .. })));
        assert_eq!(scope.skip_waiting_calls(), 0);
    }

    #[test]
    fn test_activate_removes_other_versions() {
        let caches = MemoryCaches::new();
        caches.insert("baby-mode-v0", "/", MemoryResponse::ok("old"));
        caches.insert("baby-mode-v1", "/", MemoryResponse::ok("new"));
        caches.insert("thumbnails", "/a.png", MemoryResponse::ok("png"));
        let scope = RecordingScope::new();

        let mut deleted = block_on(worker().activate(&caches, &scope)).unwrap();
        deleted.sort();

        assert_eq!(deleted, vec!["baby-mode-v0", "thumbnails"]);
        assert_eq!(caches.names(), vec!["baby-mode-v1"]);
        assert_eq!(scope.claim_calls(), 1);
    }

    #[test]
    fn test_cache_hit_skips_network() {
        let caches = MemoryCaches::new();
        caches.insert("baby-mode-v1", "/index.html", MemoryResponse::ok("shell"));
        let network = MemoryNetwork::new();

        let outcome = block_on(worker().respond(&FetchRequest::get("/index.html"), &caches, &network));

        assert!(matches!(outcome, FetchOutcome::Cached(ref r) if r.body == "shell"));
        assert!(network.requests().is_empty());
    }

    #[test]
    fn test_post_to_cached_url_goes_to_network() {
        let caches = MemoryCaches::new();
        caches.insert("baby-mode-v1", "/index.html", MemoryResponse::ok("shell"));
        let network = MemoryNetwork::new().serving("/index.html", MemoryResponse::ok("posted"));

        let request = FetchRequest::new("/index.html", "POST", RequestMode::Cors);
        let outcome = block_on(worker().respond(&request, &caches, &network));

        assert!(matches!(
            outcome,
            FetchOutcome::Network { ref response, stored: false } if response.body == "posted"
        ));
        assert_eq!(network.requests().len(), 1);
        let cached = block_on(caches.lookup(&FetchRequest::get("/index.html"))).unwrap();
        assert_eq!(cached.map(|r| r.body), Some("shell".to_string()));
    }

    #[test]
    fn test_miss_fetches_and_stores() {
        let caches = MemoryCaches::new();
        let network = MemoryNetwork::new().serving("/img.png", MemoryResponse::ok("png"));

        let outcome = block_on(worker().respond(&FetchRequest::get("/img.png"), &caches, &network));

        assert_eq!(outcome.label(), "network (stored)");
        assert!(caches.contains("baby-mode-v1", "/img.png"));
    }

    #[test]
    fn test_non_basic_response_not_stored() {
        let caches = MemoryCaches::new();
        let network = MemoryNetwork::new().serving(
            "https://cdn.example/font.woff2",
            MemoryResponse::ok("font").with_kind(ResponseKind::Cors),
        );

        let request = FetchRequest::get("https://cdn.example/font.woff2");
        let outcome = block_on(worker().respond(&request, &caches, &network));

        assert!(matches!(outcome, FetchOutcome::Network { stored: false, .. }));
        assert!(caches.names().is_empty());
    }

    #[test]
    fn test_error_status_passed_through_uncached() {
        let caches = MemoryCaches::new();
        let network = MemoryNetwork::new().serving("/missing", MemoryResponse::status(404));

        let outcome = block_on(worker().respond(&FetchRequest::get("/missing"), &caches, &network));

        let response = outcome.into_response().unwrap();
        assert_eq!(response.status, 404);
        assert!(!caches.contains("baby-mode-v1", "/missing"));
    }

    #[test]
    fn test_offline_navigation_falls_back_to_shell() {
        let caches = MemoryCaches::new();
        caches.insert("baby-mode-v1", "/index.html", MemoryResponse::ok("shell"));
        let network = MemoryNetwork::offline();

        let outcome =
            block_on(worker().respond(&FetchRequest::navigate("/play"), &caches, &network));

        assert!(matches!(outcome, FetchOutcome::Fallback(ref r) if r.body == "shell"));
    }

    #[test]
    fn test_offline_subresource_is_unavailable() {
        let caches = MemoryCaches::new();
        caches.insert("baby-mode-v1", "/index.html", MemoryResponse::ok("shell"));
        let network = MemoryNetwork::offline();

        let outcome = block_on(worker().respond(&FetchRequest::get("/new.css"), &caches, &network));

        assert!(matches!(outcome, FetchOutcome::Unavailable(ref e) if e.is_network()));
    }

    #[test]
    fn test_failed_write_back_still_serves() {
        let caches = MemoryCaches::new().failing_put();
        let network = MemoryNetwork::new().serving("/a.js", MemoryResponse::ok("js"));

        let outcome = block_on(worker().respond(&FetchRequest::get("/a.js"), &caches, &network));

        assert!(matches!(outcome, FetchOutcome::Network { stored: false, .. }));
    }
}
