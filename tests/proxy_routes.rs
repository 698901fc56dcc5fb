//! End-to-end routing tests against mock upstreams.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::RawQuery;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use docproxy::HttpServer;

mod common;

use common::{assert_cors, config_for, send, spawn_upstream};

type Recorded = Arc<Mutex<Vec<String>>>;

/// PDF text service that records each `url` it is asked for.
async fn pdf_service(text: &'static str) -> (std::net::SocketAddr, Recorded) {
    let recorded: Recorded = Arc::default();
    let seen = recorded.clone();

    let app = Router::new().route(
        "/extract-pdf",
        get(move |RawQuery(query): RawQuery| {
            let seen = seen.clone();
            async move {
                let url = query
                    .and_then(|q| {
                        url::form_urlencoded::parse(q.as_bytes())
                            .find(|(k, _)| k == "url")
                            .map(|(_, v)| v.into_owned())
                    })
                    .unwrap_or_default();
                seen.lock().unwrap().push(url);
                Json(serde_json::json!({ "text": text }))
            }
        }),
    );

    (spawn_upstream(app).await, recorded)
}

/// Origin server with one route per content type.
async fn origin() -> std::net::SocketAddr {
    let app = Router::new()
        .route(
            "/page",
            get(|| async { ([(header::CONTENT_TYPE, "text/html")], "<p>hi</p>") }),
        )
        .route(
            "/file.pdf",
            get(|| async { ([(header::CONTENT_TYPE, "application/pdf")], "%PDF-1.4") }),
        )
        .route(
            "/image.png",
            get(|| async { ([(header::CONTENT_TYPE, "image/png")], "png") }),
        )
        .route(
            "/bare",
            get(|| async { Response::new(Body::from("no content type")) }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(700)).await;
                ([(header::CONTENT_TYPE, "text/html")], "<p>slow</p>")
            }),
        )
        .route(
            "/stalled",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                ([(header::CONTENT_TYPE, "text/html")], "<p>late</p>")
            }),
        )
        .route(
            "/search",
            get(|RawQuery(query): RawQuery| async move {
                (
                    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    query.unwrap_or_default(),
                )
            }),
        );

    spawn_upstream(app).await
}

async fn unused_upstream() -> std::net::SocketAddr {
    spawn_upstream(Router::new()).await
}

#[tokio::test]
async fn test_unknown_path_is_404_with_cors() {
    let addr = unused_upstream().await;
    let server = HttpServer::new(config_for(addr, addr)).unwrap();

    for path in ["/", "/favicon.ico", "/api", "/jina", "/other/api/x"] {
        let (status, headers, body) = send(&server, Method::GET, path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body, "Not Found");
        assert_cors(&headers);
    }
}

#[tokio::test]
async fn test_preflight_is_answered_locally() {
    let addr = unused_upstream().await;
    let server = HttpServer::new(config_for(addr, addr)).unwrap();

    let (status, headers, body) = send(&server, Method::OPTIONS, "/jina/https://example.com").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert_cors(&headers);
}

#[tokio::test]
async fn test_every_response_carries_request_id() {
    let addr = unused_upstream().await;
    let server = HttpServer::new(config_for(addr, addr)).unwrap();

    let (_, headers, _) = send(&server, Method::GET, "/nowhere").await;
    let id = headers["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_api_returns_html_verbatim() {
    let origin = origin().await;
    let addr = unused_upstream().await;
    let server = HttpServer::new(config_for(addr, addr)).unwrap();

    let (status, headers, body) = send(&server, Method::GET, &format!("/api/{origin}/page")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html");
    assert_eq!(body, "<p>hi</p>");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_api_accepts_explicit_scheme() {
    let origin = origin().await;
    let addr = unused_upstream().await;
    let server = HttpServer::new(config_for(addr, addr)).unwrap();

    let (status, _, body) =
        send(&server, Method::GET, &format!("/api/http://{origin}/page")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<p>hi</p>");
}

#[tokio::test]
async fn test_api_forwards_query_string() {
    let origin = origin().await;
    let addr = unused_upstream().await;
    let server = HttpServer::new(config_for(addr, addr)).unwrap();

    let (status, _, body) = send(
        &server,
        Method::GET,
        &format!("/api/{origin}/search?q=two%20words&lang=en"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "q=two+words&lang=en");
}

#[tokio::test]
async fn test_api_delegates_pdf_to_extraction() {
    let origin = origin().await;
    let (pdf, recorded) = pdf_service("Hello").await;
    let server = HttpServer::new(config_for(pdf, pdf)).unwrap();

    let (status, headers, body) =
        send(&server, Method::GET, &format!("/api/{origin}/file.pdf")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html");
    assert!(body.contains("<pre>Hello</pre>"));
    assert_cors(&headers);

    let seen = recorded.lock().unwrap().clone();
    assert_eq!(seen, vec![format!("http://{origin}/file.pdf")]);
}

#[tokio::test]
async fn test_api_unsupported_content_type() {
    let origin = origin().await;
    let addr = unused_upstream().await;
    let server = HttpServer::new(config_for(addr, addr)).unwrap();

    let (status, headers, body) =
        send(&server, Method::GET, &format!("/api/{origin}/image.png")).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body, "<h1>Unsupported content type</h1>");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_api_missing_content_type_is_unsupported() {
    let origin = origin().await;
    let addr = unused_upstream().await;
    let server = HttpServer::new(config_for(addr, addr)).unwrap();

    let (status, _, body) = send(&server, Method::GET, &format!("/api/{origin}/bare")).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body, "<h1>Unsupported content type</h1>");
}

#[tokio::test]
async fn test_api_unreachable_target_is_500() {
    let addr = unused_upstream().await;
    let server = HttpServer::new(config_for(addr, addr)).unwrap();

    let (status, headers, body) = send(&server, Method::GET, "/api/127.0.0.1:1/page").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "<h1>Error processing URL</h1>");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_api_slow_origin_times_out_with_504() {
    let origin = origin().await;
    let addr = unused_upstream().await;
    let mut config = config_for(addr, addr);
    config.timeouts.upstream_secs = 1;
    let server = HttpServer::new(config).unwrap();

    let (status, headers, body) =
        send(&server, Method::GET, &format!("/api/{origin}/stalled")).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, "<h1>Error processing URL</h1>");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_api_chained_calls_past_request_deadline_are_504() {
    // HEAD and GET each take 700 ms: both fit the upstream deadline, the
    // pair does not fit the request deadline.
    let origin = origin().await;
    let addr = unused_upstream().await;
    let mut config = config_for(addr, addr);
    config.timeouts.upstream_secs = 1;
    config.timeouts.request_secs = 1;
    let server = HttpServer::new(config).unwrap();

    let (status, headers, body) = send(&server, Method::GET, &format!("/api/{origin}/slow")).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html");
    assert_eq!(body, "<h1>Error processing URL</h1>");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_api_oversized_body_is_500() {
    let origin = origin().await;
    let addr = unused_upstream().await;
    let mut config = config_for(addr, addr);
    config.upstreams.max_body_bytes = 4;
    let server = HttpServer::new(config).unwrap();

    let (status, headers, body) = send(&server, Method::GET, &format!("/api/{origin}/page")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "<h1>Error processing URL</h1>");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_extract_pdf_requires_url() {
    let addr = unused_upstream().await;
    let server = HttpServer::new(config_for(addr, addr)).unwrap();

    for uri in ["/extract-pdf", "/extract-pdf?url=", "/extract-pdf?other=1"] {
        let (status, headers, body) = send(&server, Method::GET, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, "Error: No PDF URL provided");
        assert_cors(&headers);
    }
}

#[tokio::test]
async fn test_extract_pdf_renders_text() {
    let (pdf, recorded) = pdf_service("Hello").await;
    let server = HttpServer::new(config_for(pdf, pdf)).unwrap();

    let (status, headers, body) =
        send(&server, Method::GET, "/extract-pdf?url=http://x/doc.pdf").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html");
    assert!(body.contains("<pre>Hello</pre>"));
    assert_cors(&headers);
    assert_eq!(recorded.lock().unwrap().clone(), vec!["http://x/doc.pdf".to_string()]);
}

#[tokio::test]
async fn test_extract_pdf_escapes_markup() {
    let (pdf, _) = pdf_service("<b>bold</b> & co").await;
    let server = HttpServer::new(config_for(pdf, pdf)).unwrap();

    let (status, _, body) =
        send(&server, Method::GET, "/extract-pdf?url=http%3A%2F%2Fx%2Fdoc.pdf").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<pre>&lt;b&gt;bold&lt;/b&gt; &amp; co</pre>"));
}

#[tokio::test]
async fn test_extract_pdf_upstream_failure_is_500() {
    let failing = spawn_upstream(Router::new().route(
        "/extract-pdf",
        get(|| async { (StatusCode::BAD_GATEWAY, "down") }),
    ))
    .await;
    let server = HttpServer::new(config_for(failing, failing)).unwrap();

    let (status, headers, body) =
        send(&server, Method::GET, "/extract-pdf?url=http://x/doc.pdf").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error processing PDF text.");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_extract_pdf_malformed_json_is_500() {
    let broken = spawn_upstream(Router::new().route(
        "/extract-pdf",
        get(|| async { "this is not json" }),
    ))
    .await;
    let server = HttpServer::new(config_for(broken, broken)).unwrap();

    let (status, _, body) = send(&server, Method::GET, "/extract-pdf?url=http://x/doc.pdf").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error processing PDF text.");
}

#[tokio::test]
async fn test_extract_pdf_missing_text_field_is_500() {
    let odd = spawn_upstream(Router::new().route(
        "/extract-pdf",
        get(|| async { Json(serde_json::json!({ "content": "x" })) }),
    ))
    .await;
    let server = HttpServer::new(config_for(odd, odd)).unwrap();

    let (status, headers, body) =
        send(&server, Method::GET, "/extract-pdf?url=http://x/doc.pdf").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error processing PDF text.");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_reader_converts_markdown() {
    let seen: Recorded = Arc::default();
    let record = seen.clone();
    let reader = spawn_upstream(Router::new().fallback(move |uri: Uri, headers: HeaderMap| {
        let record = record.clone();
        async move {
            let accept = headers[header::ACCEPT].to_str().unwrap().to_string();
            let agent = headers[header::USER_AGENT].to_str().unwrap().to_string();
            record
                .lock()
                .unwrap()
                .extend([uri.path().to_string(), accept, agent]);
            "# Title\n\nSome *text*."
        }
    }))
    .await;
    let server = HttpServer::new(config_for(reader, reader)).unwrap();

    let (status, headers, body) =
        send(&server, Method::GET, "/jina/https://example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html");
    assert!(body.contains("<h1>Title</h1>"));
    assert!(body.contains("<em>text</em>"));
    assert_cors(&headers);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen[0], "/https://example.com");
    assert_eq!(seen[1], "text/markdown, text/html");
    assert!(seen[2].starts_with("docproxy/"));
}

#[tokio::test]
async fn test_reader_passes_through_upstream_status() {
    let reader = spawn_upstream(
        Router::new().fallback(|| async { (StatusCode::NOT_FOUND, "missing").into_response() }),
    )
    .await;
    let server = HttpServer::new(config_for(reader, reader)).unwrap();

    let (status, headers, body) =
        send(&server, Method::GET, "/jina/https://example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Error fetching reader content");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_reader_unreachable_is_500() {
    let addr = unused_upstream().await;
    let mut config = config_for(addr, addr);
    config.upstreams.reader_base_url = "http://127.0.0.1:1/".into();
    let server = HttpServer::new(config).unwrap();

    let (status, headers, body) =
        send(&server, Method::GET, "/jina/https://example.com").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error processing reader request");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_slow_reader_times_out_with_504() {
    let reader = spawn_upstream(Router::new().fallback(|| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        "# Late"
    }))
    .await;
    let mut config = config_for(reader, reader);
    config.timeouts.upstream_secs = 1;
    let server = HttpServer::new(config).unwrap();

    let (status, headers, body) =
        send(&server, Method::GET, "/jina/https://example.com").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, "Error processing reader request");
    assert_cors(&headers);
}

#[tokio::test]
async fn test_request_deadline_uses_branch_error_body() {
    let reader = spawn_upstream(Router::new().fallback(|| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        "# Late"
    }))
    .await;
    let mut config = config_for(reader, reader);
    config.timeouts.request_secs = 1;
    config.timeouts.upstream_secs = 5;
    let server = HttpServer::new(config).unwrap();

    let (status, headers, body) = send(&server, Method::GET, "/jina/https://example.com").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, "Error processing reader request");
    assert_cors(&headers);
}
