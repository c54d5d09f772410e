//! アプリ一覧API
//!
//! - `GET /api/apps`: 一覧
//! - `GET /api/apps/health`: 全アプリのヘルス状態（`refresh=true` でキャッシュを無視）
//! - `GET /api/apps/:id/screenshot`: プレビュー画像

use axum::{
    extract::{Path, Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderName,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::api::error::AppError;
use crate::common::error::GalleryError;
use crate::config::is_truthy;
use crate::types::App;
use crate::AppState;

/// キャッシュヒット/ミスを示すレスポンスヘッダー
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// スクリーンショットに付与するCache-Control
pub const SCREENSHOT_CACHE_CONTROL: &str = "public, max-age=3600";

/// GET /api/apps
pub async fn list_apps(State(state): State<AppState>) -> Result<Json<Vec<App>>, AppError> {
    let apps = state.repository.list_apps().await?;
    Ok(Json(apps))
}

/// ヘルスチェックのクエリ
#[derive(Debug, Deserialize)]
pub struct HealthQuery {
    /// `true/1/yes/on` でキャッシュを無視して再計算
    pub refresh: Option<String>,
}

/// GET /api/apps/health
pub async fn get_health(
    State(state): State<AppState>,
    Query(query): Query<HealthQuery>,
) -> Result<Response, AppError> {
    let force_refresh = query.refresh.as_deref().is_some_and(is_truthy);
    let report = state.health.get_health(force_refresh).await?;

    Ok((
        [(X_CACHE, report.source.as_str())],
        Json(&*report.results),
    )
        .into_response())
}

/// GET /api/apps/:id/screenshot
///
/// IDが数値でなければ400、存在しなければ404を返し、画像サービスには問い合わせない。
pub async fn get_screenshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let app_id: i64 = id
        .parse()
        .map_err(|_| GalleryError::InvalidAppId(id.clone()))?;

    let app = state
        .repository
        .get_app(app_id)
        .await?
        .ok_or(GalleryError::AppNotFound(app_id))?;

    let screenshot = state.screenshots.get(app.id, &app.url).await?;

    Ok((
        [
            (CONTENT_TYPE, screenshot.content_type),
            (CACHE_CONTROL, SCREENSHOT_CACHE_CONTROL.to_string()),
            (X_CACHE, screenshot.source.as_str().to_string()),
        ],
        screenshot.bytes,
    )
        .into_response())
}
