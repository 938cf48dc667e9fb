// src/api/tests.rs

use super::router;
use crate::app::AppState;
use crate::config::Config;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration whose upstreams all point at `upstream`.
fn config(upstream: &MockServer, api_key: Option<&str>) -> Config {
    Config {
        bind: "127.0.0.1:0".parse().unwrap(),
        google_api_key: api_key.map(str::to_string),
        pagespeed_api: Url::parse(&format!("{}/runPagespeed", upstream.uri())).unwrap(),
        tls_observatory_api: Url::parse(&upstream.uri()).unwrap(),
        user_agent: "web-check-rs-test".to_string(),
    }
}

async fn get(config: Config, uri: &str) -> (StatusCode, Value) {
    let state = Arc::new(AppState::new(config).unwrap());
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn assert_no_upstream_calls(server: &MockServer) {
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_ok() {
    let server = MockServer::start().await;
    let (status, body) = get(config(&server, None), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn every_check_rejects_missing_url() {
    let server = MockServer::start().await;
    for route in ["/check-quality", "/tls", "/tech-stack", "/firewall"] {
        for uri in [route.to_string(), format!("{}?url=", route)] {
            let (status, body) = get(config(&server, Some("test-api-key")), &uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body, json!({ "error": "missing URL parameter" }), "{}", uri);
        }
    }
    assert_no_upstream_calls(&server).await;
}

#[tokio::test]
async fn unparseable_url_is_a_client_error() {
    let server = MockServer::start().await;
    let (status, body) = get(config(&server, None), "/firewall?url=ftp://example.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "invalid URL parameter" }));
    assert_no_upstream_calls(&server).await;
}

#[tokio::test]
async fn malformed_query_string_gets_json_error() {
    let server = MockServer::start().await;
    let (status, body) = get(config(&server, None), "/firewall?url=a.com&url=b.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "invalid URL parameter" }));
    assert_no_upstream_calls(&server).await;
}

// --- /check-quality ---

#[tokio::test]
async fn quality_without_api_key_names_the_variable() {
    let server = MockServer::start().await;
    let (status, body) = get(config(&server, None), "/check-quality?url=http://example.com").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "missing Google API key. You need to set the `GOOGLE_CLOUD_API_KEY` environment variable" })
    );
    assert_no_upstream_calls(&server).await;
}

#[tokio::test]
async fn quality_missing_url_wins_over_missing_key() {
    let server = MockServer::start().await;
    let (status, body) = get(config(&server, None), "/check-quality").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "missing URL parameter" }));
}

#[tokio::test]
async fn quality_projects_scores() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/runPagespeed"))
        .and(query_param("key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lighthouseResult": {
                "finalUrl": "http://example.com/",
                "categories": {
                    "performance": { "score": 0.5 },
                    "accessibility": { "score": 0.75 },
                    "best-practices": { "score": 1.0 },
                    "seo": { "score": 0.25 }
                }
            }
        })))
        .mount(&server)
        .await;

    let (status, body) = get(config(&server, Some("test-api-key")), "/check-quality?url=http://example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "url": "http://example.com/",
            "scores": { "performance": 0.5, "accessibility": 0.75, "best-practices": 1.0, "seo": 0.25 }
        })
    );
}

#[tokio::test]
async fn quality_unreachable_pagespeed_is_a_server_error() {
    let server = MockServer::start().await;
    let mut config = config(&server, Some("test-api-key"));
    // Nothing listens on port 1.
    config.pagespeed_api = Url::parse("http://127.0.0.1:1/runPagespeed").unwrap();

    let (status, body) = get(config, "/check-quality?url=http://example.com").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("failed to fetch the PageSpeed data"), "{}", message);
    assert!(!message.contains("test-api-key"), "{}", message);
}

#[tokio::test]
async fn quality_upstream_failure_is_a_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/runPagespeed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = get(config(&server, Some("test-api-key")), "/check-quality?url=http://example.com").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("failed to fetch the PageSpeed data"), "{}", message);
    assert!(!message.contains("test-api-key"), "{}", message);
}

// --- /tls ---

#[tokio::test]
async fn tls_zero_scan_id_is_a_server_error_without_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"scan_id": 0}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"grade": "F"}"#))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = get(config(&server, None), "/tls?url=http://invalid-url").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "failed to get scan_id from TLS Observatory" }));
}

#[tokio::test]
async fn tls_returns_grade_for_scan_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"scan_id": 12345}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .and(query_param("id", "12345"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"grade": "A+"}"#))
        .mount(&server)
        .await;

    let (status, body) = get(config(&server, None), "/tls?url=http://example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "grade": "A+" }));
}

#[tokio::test]
async fn tls_undecodable_submit_body_names_submit_step() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = get(config(&server, None), "/tls?url=example.com").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("failed to submit scan to TLS Observatory")
    );
}

#[tokio::test]
async fn tls_results_failure_names_fetch_step() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"scan_id": 3}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (status, body) = get(config(&server, None), "/tls?url=example.com").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("failed to fetch scan results from TLS Observatory")
    );
}

// --- /tech-stack ---

#[tokio::test]
async fn tech_stack_lists_sorted_names_and_is_repeatable() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("server", "nginx/1.25.3")
                .set_body_string(r#"<html><head><script src="/_next/static/chunk.js"></script></head></html>"#),
        )
        .mount(&site)
        .await;

    let uri = format!("/tech-stack?url={}/some/page", site.uri());
    let (status, first) = get(config(&site, None), &uri).await;
    let (_, second) = get(config(&site, None), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, json!({ "tech-stack": ["Next.js", "Nginx"] }));
    assert_eq!(first, second);
}

#[tokio::test]
async fn tech_stack_unreachable_site_is_a_server_error() {
    let server = MockServer::start().await;
    // Nothing listens on port 1.
    let (status, body) = get(config(&server, None), "/tech-stack?url=http://127.0.0.1:1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("failed to fetch target site"));
}

// --- /firewall ---

#[tokio::test]
async fn firewall_valid_host_is_ok() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&site)
        .await;

    let (status, body) = get(config(&site, None), &format!("/firewall?url={}", site.uri())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "hasWaf": false }));
}

#[tokio::test]
async fn firewall_unreachable_host_is_ok_without_waf() {
    let server = MockServer::start().await;
    // Nothing listens on port 1.
    let (status, body) = get(config(&server, None), "/firewall?url=http://127.0.0.1:1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "hasWaf": false }));
}

#[tokio::test]
async fn firewall_detects_cloudflare_even_on_error_page() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).insert_header("server", "cloudflare"))
        .mount(&site)
        .await;

    let (status, body) = get(config(&site, None), &format!("/firewall?url={}", site.uri())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "hasWaf": true, "waf": "Cloudflare" }));
}
