//! Tests that run the proxy on a real socket.

use std::time::Duration;

use axum::http::StatusCode;
use docproxy::config::ProxyConfig;
use docproxy::{HttpServer, Shutdown};
use tokio::net::TcpListener;

mod common;

#[tokio::test]
async fn test_serves_and_shuts_down_gracefully() {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    assert_eq!(server.config().timeouts.request_secs, 30);

    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/not-a-route"))
        .header("x-request-id", "caller-supplied-id")
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    common::assert_cors(res.headers());
    assert_eq!(res.headers()["x-request-id"], "caller-supplied-id");
    assert_eq!(res.text().await.unwrap(), "Not Found");

    let res = client
        .request(reqwest::Method::OPTIONS, format!("http://{addr}/api/example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    common::assert_cors(res.headers());

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
}
