use std::path::Path;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Catalog, Route};
use tower::ServiceExt;

fn catalog() -> Catalog {
    Catalog::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures")).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authorized(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, "bearer test-access-token")
        .body(String::new())
        .unwrap()
}

// --- info ---

#[tokio::test]
async fn info_replays_fixture() {
    let resp = app(catalog())
        .oneshot(authorized("GET", "/v2/info"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json"
    );
    let info = body_json(resp).await;
    assert_eq!(info["api_version"], "2.44.0");
    assert_eq!(info["logging_endpoint"], "ws://loggregator.vcap.me:80");
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401() {
    let resp = app(catalog())
        .oneshot(Request::builder().uri("/v2/info").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error_code"], "CF-InvalidAuthToken");
}

// --- routing ---

#[tokio::test]
async fn unknown_route_returns_platform_404() {
    let resp = app(catalog())
        .oneshot(authorized("GET", "/v2/apps"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error_code"], "CF-NotFound");
}

#[tokio::test]
async fn query_string_must_match_exactly() {
    let resp = app(catalog())
        .oneshot(authorized("GET", "/v3/tasks?page=2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app(catalog())
        .oneshot(authorized("GET", "/v3/tasks?page=1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_json(resp).await;
    assert_eq!(page["resources"].as_array().unwrap().len(), 2);
}

// --- delete ---

#[tokio::test]
async fn synchronous_delete_has_no_body() {
    let resp = app(catalog())
        .oneshot(authorized("DELETE", "/v2/services/test-service-id?purge=true"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn asynchronous_delete_returns_job() {
    let resp = app(catalog())
        .oneshot(authorized("DELETE", "/v2/services/test-service-id?async=true"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let job = body_json(resp).await;
    assert_eq!(job["entity"]["status"], "queued");
}

// --- headers ---

#[tokio::test]
async fn scripted_headers_are_sent() {
    let resp = app(catalog())
        .oneshot(authorized("POST", "/v2/shared_domains"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers()[http::header::LOCATION],
        "/v2/shared_domains/d6c7d452-70bb-4edd-bbf1-a925dd51732c"
    );
}

#[test]
fn bad_scripted_header_fails_catalog_load() {
    let dir = std::env::temp_dir().join(format!("mock-server-bad-header-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("routes.json"),
        r#"[{"method": "GET", "path": "/v2/info", "status": 200, "headers": {"bad header": "x"}}]"#,
    )
    .unwrap();

    let err = Catalog::load(&dir).unwrap_err();
    std::fs::remove_dir_all(&dir).unwrap();
    assert!(matches!(err, mock_server::CatalogError::Route { .. }));
}

#[tokio::test]
async fn hand_built_catalog() {
    let catalog = Catalog::new(vec![Route {
        method: http::Method::PUT,
        path: "/v3/tasks/t-1/cancel".to_string(),
        status: StatusCode::ACCEPTED,
        headers: http::HeaderMap::new(),
        body: Some(r#"{"guid":"t-1","state":"CANCELING"}"#.to_string()),
    }]);

    let resp = app(catalog)
        .oneshot(authorized("PUT", "/v3/tasks/t-1/cancel"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert_eq!(body_json(resp).await["state"], "CANCELING");
}
