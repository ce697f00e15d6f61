//! `CacheStorage`, `fetch` and the worker lifecycle behind the core traits

use babymode_core::{
    CacheBackend, CacheError, CachedResponse, FetchRequest, Network, RequestMode, ResponseKind,
    WorkerScope,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Cache, CacheStorage, Request, Response, ResponseType};

use crate::util::{describe, resolve, scope};

/// A browser `Response`
#[derive(Clone, Debug)]
pub struct NetResponse(pub Response);

impl CachedResponse for NetResponse {
    fn status(&self) -> u16 {
        self.0.status()
    }

    fn kind(&self) -> ResponseKind {
        match self.0.type_() {
            ResponseType::Basic => ResponseKind::Basic,
            ResponseType::Cors => ResponseKind::Cors,
            ResponseType::Default => ResponseKind::Default,
            ResponseType::Error => ResponseKind::Error,
            ResponseType::Opaque => ResponseKind::Opaque,
            ResponseType::Opaqueredirect => ResponseKind::OpaqueRedirect,
            _ => ResponseKind::Default,
        }
    }

    fn duplicate(&self) -> Result<Self, CacheError> {
        self.0
            .clone()
            .map(NetResponse)
            .map_err(|_| CacheError::Clone { url: self.0.url() })
    }
}

/// Describe an intercepted request for the caching policy
pub fn describe_request(request: &Request) -> FetchRequest {
    let mode = match request.mode() {
        web_sys::RequestMode::Navigate => RequestMode::Navigate,
        web_sys::RequestMode::SameOrigin => RequestMode::SameOrigin,
        web_sys::RequestMode::NoCors => RequestMode::NoCors,
        _ => RequestMode::Cors,
    };
    FetchRequest::new(request.url(), request.method(), mode)
}

/// The worker's `caches`
pub struct BrowserCaches {
    storage: CacheStorage,
}

impl BrowserCaches {
    pub fn new() -> Result<Self, CacheError> {
        let storage = scope()
            .caches()
            .map_err(|e| CacheError::Scope(describe(&e)))?;
        Ok(Self { storage })
    }

    async fn open(&self, name: &str) -> Result<Cache, CacheError> {
        let open_err = |e: JsValue| CacheError::Open {
            cache: name.to_string(),
            reason: describe(&e),
        };
        let cache = resolve(Ok(self.storage.open(name))).await.map_err(open_err)?;
        cache.dyn_into::<Cache>().map_err(open_err)
    }
}

impl CacheBackend for BrowserCaches {
    type Response = NetResponse;

    async fn add_all(&self, cache: &str, urls: &[&str]) -> Result<(), CacheError> {
        let handle = self.open(cache).await?;
        let list = urls
            .iter()
            .map(|url| JsValue::from_str(url))
            .collect::<js_sys::Array>();
        resolve(Ok(handle.add_all_with_str_sequence(&list)))
            .await
            .map(|_| ())
            .map_err(|e| CacheError::AddAll {
                cache: cache.to_string(),
                reason: describe(&e),
            })
    }

    async fn cache_names(&self) -> Result<Vec<String>, CacheError> {
        let keys = resolve(Ok(self.storage.keys()))
            .await
            .map_err(|e| CacheError::Keys(describe(&e)))?;
        Ok(js_sys::Array::from(&keys)
            .iter()
            .filter_map(|name| name.as_string())
            .collect())
    }

    async fn delete_cache(&self, cache: &str) -> Result<bool, CacheError> {
        resolve(Ok(self.storage.delete(cache)))
            .await
            .map(|deleted| deleted.as_bool().unwrap_or(false))
            .map_err(|e| CacheError::Delete {
                cache: cache.to_string(),
                reason: describe(&e),
            })
    }

    async fn lookup(&self, request: &FetchRequest) -> Result<Option<NetResponse>, CacheError> {
        // Matching by URL string builds a GET request
        if !request.is_get() {
            return Ok(None);
        }
        let found = resolve(Ok(self.storage.match_with_str(&request.url)))
            .await
            .map_err(|e| CacheError::Lookup {
                url: request.url.clone(),
                reason: describe(&e),
            })?;
        Ok(found.dyn_into::<Response>().ok().map(NetResponse))
    }

    async fn put(
        &self,
        cache: &str,
        request: &FetchRequest,
        response: NetResponse,
    ) -> Result<(), CacheError> {
        let handle = self.open(cache).await?;
        resolve(Ok(handle.put_with_str(&request.url, &response.0)))
            .await
            .map(|_| ())
            .map_err(|e| CacheError::Put {
                url: request.url.clone(),
                reason: describe(&e),
            })
    }
}

/// Fetches the original intercepted request
pub struct EventNetwork {
    request: Request,
}

impl EventNetwork {
    pub fn new(request: Request) -> Self {
        Self { request }
    }
}

impl Network for EventNetwork {
    type Response = NetResponse;

    async fn fetch(&self, request: &FetchRequest) -> Result<NetResponse, CacheError> {
        // Request bodies are streams; fetch a copy
        let copy = self
            .request
            .clone()
            .map_err(|e| CacheError::network(&request.url, describe(&e)))?;
        let response = resolve(Ok(scope().fetch_with_request(&copy)))
            .await
            .map_err(|e| CacheError::network(&request.url, describe(&e)))?;
        response
            .dyn_into::<Response>()
            .map(NetResponse)
            .map_err(|_| CacheError::network(&request.url, "fetch resolved to a non-Response"))
    }
}

/// `skipWaiting()` and `clients.claim()` on the worker global
pub struct GlobalScope;

impl WorkerScope for GlobalScope {
    async fn skip_waiting(&self) -> Result<(), CacheError> {
        resolve(scope().skip_waiting())
            .await
            .map(|_| ())
            .map_err(|e| CacheError::Scope(describe(&e)))
    }

    async fn claim_clients(&self) -> Result<(), CacheError> {
        resolve(Ok(scope().clients().claim()))
            .await
            .map(|_| ())
            .map_err(|e| CacheError::Scope(describe(&e)))
    }
}
