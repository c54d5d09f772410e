//! 容量上限と有効期限をHTTP経由で確認する

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use gallery::{
    api,
    clock::ManualClock,
    screenshot::{ScreenshotCache, ThumbnailFetcher},
    AppState,
};
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

use crate::support::gallery::{create_test_gallery, x_cache, TestGallery};

const MINUTE: Duration = Duration::from_secs(60);

async fn mount_shot(imaging: &MockServer, host: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path_regex(format!(r"{}$", regex_escape(host))))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(host.as_bytes().to_vec(), "image/png"),
        )
        .expect(expected_calls)
        .mount(imaging)
        .await;
}

fn regex_escape(value: &str) -> String {
    value.replace('.', r"\.")
}

/// 容量と時計を差し替えたルーターを返す
fn with_cache(
    gallery: &TestGallery,
    imaging: &MockServer,
    capacity: usize,
    clock: Arc<ManualClock>,
) -> axum::Router {
    let fetcher =
        ThumbnailFetcher::new(format!("{}/shot/", imaging.uri()), Duration::from_secs(2))
            .expect("failed to build fetcher");
    let state = AppState {
        screenshots: ScreenshotCache::new(Arc::new(fetcher), clock, 60 * MINUTE, capacity),
        ..gallery.state.clone()
    };
    api::create_app(state)
}

async fn get(router: &axum::Router, id: i64) -> axum::http::Response<axum::body::Body> {
    use tower::ServiceExt;

    router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri(format!("/api/apps/{}/screenshot", id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_oldest_stored_entry_evicted_at_capacity() {
    let imaging = MockServer::start().await;
    mount_shot(&imaging, "one.example", 2).await;
    mount_shot(&imaging, "two.example", 1).await;
    mount_shot(&imaging, "three.example", 1).await;

    let gallery = create_test_gallery(&imaging).await;
    let one = gallery.seed("One", "https://one.example").await;
    let two = gallery.seed("Two", "https://two.example").await;
    let three = gallery.seed("Three", "https://three.example").await;

    let clock = Arc::new(ManualClock::default());
    let router = with_cache(&gallery, &imaging, 2, clock.clone());

    assert_eq!(x_cache(&get(&router, one.id).await), "MISS");
    clock.advance(MINUTE);
    assert_eq!(x_cache(&get(&router, two.id).await), "MISS");
    clock.advance(MINUTE);

    // 読み出しは格納順を変えない
    assert_eq!(x_cache(&get(&router, one.id).await), "HIT");

    // 3件目の格納で最も古い one が追い出される
    assert_eq!(x_cache(&get(&router, three.id).await), "MISS");
    assert_eq!(x_cache(&get(&router, two.id).await), "HIT");
    assert_eq!(x_cache(&get(&router, one.id).await), "MISS");
}

#[tokio::test]
async fn test_expired_entry_refetched() {
    let imaging = MockServer::start().await;
    mount_shot(&imaging, "one.example", 2).await;

    let gallery = create_test_gallery(&imaging).await;
    let one = gallery.seed("One", "https://one.example").await;

    let clock = Arc::new(ManualClock::default());
    let router = with_cache(&gallery, &imaging, 60, clock.clone());

    assert_eq!(x_cache(&get(&router, one.id).await), "MISS");
    clock.advance(59 * MINUTE);
    assert_eq!(x_cache(&get(&router, one.id).await), "HIT");
    clock.advance(MINUTE);

    let response = get(&router, one.id).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(x_cache(&response), "MISS");
}
