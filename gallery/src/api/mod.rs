//! REST APIハンドラー

pub mod apps;
pub mod error;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/apps", get(apps::list_apps))
        .route("/api/apps/health", get(apps::get_health))
        .route("/api/apps/:id/screenshot", get(apps::get_screenshot))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
