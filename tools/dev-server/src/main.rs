//! Development Server for Baby Mode
//!
//! Serves `web/` with the MIME types wasm and the manifest need, and the
//! headers that let `sw.js` control the whole origin without being cached.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
    routing::get_service,
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

/// Path of the service worker script
const SERVICE_WORKER_PATH: &str = "/sw.js";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let root = std::env::var("WEB_ROOT").unwrap_or_else(|_| "web".to_string());

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let serve_dir = ServeDir::new(&root).append_index_html_on_directories(true);

    let app = Router::new()
        .fallback_service(get_service(serve_dir).handle_error(|_| async {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(add_headers)));

    println!("╔═══════════════════════════════════════════════════╗");
    println!("║           Baby Mode Development Server            ║");
    println!("╠═══════════════════════════════════════════════════╣");
    println!("║  URL:  http://localhost:{:<26}║", port);
    println!("║  Root: {:<43}║", root);
    println!("║  Press Ctrl+C to stop                             ║");
    println!("╚═══════════════════════════════════════════════════╝");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// MIME type for a request path, if the default guess needs overriding
fn content_type(path: &str) -> Option<&'static str> {
    let ext = path.rsplit_once('.').map(|(_, ext)| ext)?;
    let mime = match ext {
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "wasm" => "application/wasm",
        "css" => "text/css; charset=utf-8",
        "html" => "text/html; charset=utf-8",
        "json" if path.ends_with("manifest.json") => "application/manifest+json",
        "json" => "application/json; charset=utf-8",
        _ => return None,
    };
    Some(mime)
}

/// Fix MIME types and add service worker headers
async fn add_headers(request: Request<Body>, next: axum::middleware::Next) -> Response<Body> {
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    if let Some(mime) = content_type(&path) {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
    }

    if path == SERVICE_WORKER_PATH {
        headers.insert("Service-Worker-Allowed", HeaderValue::from_static("/"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    }

    response
}
