//! Scripted network and worker scope for testing.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::MemoryResponse;
use crate::cache::{FetchRequest, Network, WorkerScope};
use crate::error::CacheError;

/// Serves registered routes, 404 for everything else, or fails every request
/// when offline.
#[derive(Default)]
pub struct MemoryNetwork {
    routes: BTreeMap<String, MemoryResponse>,
    offline: bool,
    requests: RefCell<Vec<FetchRequest>>,
}

impl MemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// A network where every fetch fails
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn serving(mut self, url: &str, response: MemoryResponse) -> Self {
        self.routes.insert(url.to_string(), response);
        self
    }

    /// Every request seen, in order
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.borrow().clone()
    }
}

impl Network for MemoryNetwork {
    type Response = MemoryResponse;

    async fn fetch(&self, request: &FetchRequest) -> Result<MemoryResponse, CacheError> {
        self.requests.borrow_mut().push(request.clone());
        if self.offline {
            return Err(CacheError::network(&request.url, "offline"));
        }
        Ok(self
            .routes
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| MemoryResponse::status(404)))
    }
}

/// Counts lifecycle calls.
#[derive(Default)]
pub struct RecordingScope {
    skip_waiting: Cell<usize>,
    claims: Cell<usize>,
}

impl RecordingScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_waiting_calls(&self) -> usize {
        self.skip_waiting.get()
    }

    pub fn claim_calls(&self) -> usize {
        self.claims.get()
    }
}

impl WorkerScope for RecordingScope {
    async fn skip_waiting(&self) -> Result<(), CacheError> {
        self.skip_waiting.set(self.skip_waiting.get() + 1);
        Ok(())
    }

    async fn claim_clients(&self) -> Result<(), CacheError> {
        self.claims.set(self.claims.get() + 1);
        Ok(())
    }
}
