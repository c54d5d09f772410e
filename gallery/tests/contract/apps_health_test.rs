//! Contract Test: GET /api/apps/health
//!
//! 結果はアプリIDをキーとするマップで、`X-Cache` でキャッシュ利用を示す。

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::support::{
    gallery::{body_json, create_test_gallery, x_cache},
    http::refused_url,
};

#[tokio::test]
async fn test_health_map_shape_and_cache_hit() {
    let imaging = MockServer::start().await;
    let targets = MockServer::start().await;
    Mock::given(path("/up"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&targets)
        .await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&targets)
        .await;

    let gallery = create_test_gallery(&imaging).await;
    gallery
        .seed("Up", &format!("{}/up", targets.uri()))
        .await;
    gallery
        .seed("Broken", &format!("{}/broken", targets.uri()))
        .await;
    gallery.seed("Gone", &refused_url().await).await;

    let expected = json!({
        "1": { "status": 200, "ok": true },
        "2": { "status": 500, "ok": false },
        "3": { "status": 0, "ok": false },
    });

    let first = gallery.get("/api/apps/health").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(x_cache(&first), "MISS");
    assert_eq!(body_json(first).await, expected);

    // 2回目はプローブせずにキャッシュを返す（各ターゲットへのアクセスは1回のみ）
    let second = gallery.get("/api/apps/health").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(x_cache(&second), "HIT");
    assert_eq!(body_json(second).await, expected);
}

#[tokio::test]
async fn test_refresh_true_reprobes() {
    let imaging = MockServer::start().await;
    let targets = MockServer::start().await;
    Mock::given(path("/up"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&targets)
        .await;

    let gallery = create_test_gallery(&imaging).await;
    gallery
        .seed("Up", &format!("{}/up", targets.uri()))
        .await;

    let first = gallery.get("/api/apps/health").await;
    assert_eq!(x_cache(&first), "MISS");

    let cached = gallery.get("/api/apps/health?refresh=false").await;
    assert_eq!(x_cache(&cached), "HIT");

    let refreshed = gallery.get("/api/apps/health?refresh=true").await;
    assert_eq!(refreshed.status(), StatusCode::OK);
    assert_eq!(x_cache(&refreshed), "MISS");
    assert_eq!(
        body_json(refreshed).await,
        json!({ "1": { "status": 200, "ok": true } })
    );

    let after = gallery.get("/api/apps/health").await;
    assert_eq!(x_cache(&after), "HIT");
}

#[tokio::test]
async fn test_slow_app_reported_unreachable() {
    let imaging = MockServer::start().await;
    let targets = MockServer::start().await;
    Mock::given(path("/fast"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&targets)
        .await;
    Mock::given(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&targets)
        .await;

    let gallery = create_test_gallery(&imaging).await;
    gallery
        .seed("Fast", &format!("{}/fast", targets.uri()))
        .await;
    gallery
        .seed("Slow", &format!("{}/slow", targets.uri()))
        .await;

    let response = gallery.get("/api/apps/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "1": { "status": 204, "ok": true },
            "2": { "status": 0, "ok": false },
        })
    );
}

#[tokio::test]
async fn test_head_not_allowed_falls_back_to_get() {
    let imaging = MockServer::start().await;
    let targets = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/app"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&targets)
        .await;
    Mock::given(method("GET"))
        .and(path("/app"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&targets)
        .await;

    let gallery = create_test_gallery(&imaging).await;
    gallery
        .seed("HeadShy", &format!("{}/app", targets.uri()))
        .await;

    let response = gallery.get("/api/apps/health").await;
    assert_eq!(
        body_json(response).await,
        json!({ "1": { "status": 200, "ok": true } })
    );
}

#[tokio::test]
async fn test_empty_store_returns_empty_map() {
    let imaging = MockServer::start().await;
    let gallery = create_test_gallery(&imaging).await;

    let response = gallery.get("/api/apps/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(x_cache(&response), "MISS");
    assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn test_store_failure_is_500() {
    let imaging = MockServer::start().await;
    let gallery = create_test_gallery(&imaging).await;
    gallery.pool().close().await;

    let response = gallery.get("/api/apps/health").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
