#![cfg(target_arch = "wasm32")]

use babymode_core::{CachedResponse, RequestMode, ResponseKind};
use babymode_worker::{describe_request, NetResponse};
use wasm_bindgen_test::*;
use web_sys::{Request, Response};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn constructed_response_is_default_kind() {
    let response = NetResponse(Response::new().unwrap());
    assert_eq!(response.status(), 200);
    assert_eq!(response.kind(), ResponseKind::Default);
}

#[wasm_bindgen_test]
fn duplicate_keeps_status() {
    let response = NetResponse(Response::error());
    let copy = response.duplicate().unwrap();
    assert_eq!(copy.status(), 0);
    assert_eq!(copy.kind(), ResponseKind::Error);
}

#[wasm_bindgen_test]
fn describes_plain_request() {
    let request = Request::new_with_str("https://example.com/css/styles.css").unwrap();
    let descriptor = describe_request(&request);
    assert_eq!(descriptor.url, "https://example.com/css/styles.css");
    assert_eq!(descriptor.method, "GET");
    assert_eq!(descriptor.mode, RequestMode::Cors);
}
