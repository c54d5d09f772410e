use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use gallery::{
    api,
    config::{HealthConfig, ScreenshotConfig},
    db::{self, traits::AppRepository, traits::SqliteAppRepository},
    types::{App, NewApp},
    AppState,
};
use sqlx::SqlitePool;
use tower::ServiceExt;
use wiremock::MockServer;

/// テスト用のプローブタイムアウト
pub const TEST_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// テスト用のギャラリー
#[allow(dead_code)]
pub struct TestGallery {
    pub router: Router,
    pub state: AppState,
    pub repository: Arc<SqliteAppRepository>,
}

#[allow(dead_code)]
impl TestGallery {
    /// アプリを登録する
    pub async fn seed(&self, name: &str, url: &str) -> App {
        self.repository
            .create_app(&NewApp::new(name, url))
            .await
            .expect("failed to seed app")
    }

    /// 内部のプール
    pub fn pool(&self) -> &SqlitePool {
        self.repository.pool()
    }

    /// GETリクエストを `.oneshot()` で送る
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

/// 画像サービスを `imaging` に向けたギャラリーを作成する
pub async fn create_test_gallery(imaging: &MockServer) -> TestGallery {
    let pool = db::create_in_memory_pool()
        .await
        .expect("failed to create test database");
    let repository = Arc::new(SqliteAppRepository::new(pool));

    let health_config = HealthConfig {
        probe_timeout: TEST_PROBE_TIMEOUT,
        ..HealthConfig::default()
    };
    let screenshot_config = ScreenshotConfig {
        endpoint: format!("{}/shot/", imaging.uri()),
        fetch_timeout: Duration::from_secs(2),
        ..ScreenshotConfig::default()
    };

    let state = AppState::from_config(repository.clone(), &health_config, &screenshot_config)
        .expect("failed to build app state");

    TestGallery {
        router: api::create_app(state.clone()),
        state,
        repository,
    }
}

/// レスポンスボディをJSONとして読む
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// X-Cacheヘッダーの値
#[allow(dead_code)]
pub fn x_cache(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("x-cache")
        .expect("missing X-Cache header")
        .to_str()
        .unwrap()
}
