//! Request and response descriptors shared by the worker and its backends

use serde::{Deserialize, Serialize};

/// `Request.mode`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    Navigate,
    SameOrigin,
    NoCors,
    #[default]
    Cors,
}

impl RequestMode {
    /// Parse the DOM string; unknown values map to `Cors`
    pub fn parse(mode: &str) -> Self {
        match mode {
            "navigate" => RequestMode::Navigate,
            "same-origin" => RequestMode::SameOrigin,
            "no-cors" => RequestMode::NoCors,
            _ => RequestMode::Cors,
        }
    }
}

/// `Response.type`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Basic,
    Cors,
    Default,
    Error,
    Opaque,
    OpaqueRedirect,
}

/// The parts of an intercepted request the caching policy looks at
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub method: String,
    pub mode: RequestMode,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, method: impl Into<String>, mode: RequestMode) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            mode,
        }
    }

    /// Plain subresource GET
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, "GET", RequestMode::Cors)
    }

    /// Top-level document navigation
    pub fn navigate(url: impl Into<String>) -> Self {
        Self::new(url, "GET", RequestMode::Navigate)
    }

    #[inline]
    pub fn is_navigation(&self) -> bool {
        self.mode == RequestMode::Navigate
    }

    /// Cache storage only accepts GET entries
    #[inline]
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}

/// Only complete same-origin responses are written back to the cache
pub fn is_cacheable(status: u16, kind: ResponseKind) -> bool {
    status == 200 && kind == ResponseKind::Basic
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cacheable_responses() {
        assert!(is_cacheable(200, ResponseKind::Basic));
        assert!(!is_cacheable(200, ResponseKind::Cors));
        assert!(!is_cacheable(200, ResponseKind::Opaque));
        assert!(!is_cacheable(404, ResponseKind::Basic));
        assert!(!is_cacheable(206, ResponseKind::Basic));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(RequestMode::parse("navigate"), RequestMode::Navigate);
        assert_eq!(RequestMode::parse("same-origin"), RequestMode::SameOrigin);
        assert_eq!(RequestMode::parse("websocket"), RequestMode::Cors);
    }

    #[test]
    fn test_request_helpers() {
        assert!(FetchRequest::navigate("/").is_navigation());
        assert!(!FetchRequest::get("/app.css").is_navigation());
        assert!(FetchRequest::new("/x", "get", RequestMode::Cors).is_get());
        assert!(!FetchRequest::new("/x", "POST", RequestMode::Cors).is_get());
    }
}
