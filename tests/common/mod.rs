//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use docproxy::config::ProxyConfig;
use docproxy::HttpServer;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Serve `app` as a mock upstream on an ephemeral local port.
#[allow(dead_code)]
pub async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Proxy configuration pointing the reader and PDF services at local mocks.
#[allow(dead_code)]
pub fn config_for(reader: SocketAddr, pdf: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstreams.reader_base_url = format!("http://{reader}/");
    config.upstreams.pdf_extract_url = format!("http://{pdf}/extract-pdf");
    config.timeouts.upstream_secs = 5;
    config.timeouts.request_secs = 10;
    config
}

/// Drive one request through the proxy in-process.
#[allow(dead_code)]
pub async fn send(
    server: &HttpServer,
    method: Method,
    uri: &str,
) -> (StatusCode, HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = server.router().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

/// Assert the four CORS headers carry their fixed values.
#[allow(dead_code)]
pub fn assert_cors(headers: &HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET, OPTIONS");
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
}
