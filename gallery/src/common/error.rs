//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `GalleryError`は`external_message()`と`status_code()`メソッドを提供し、
//! 内部情報を漏らさないHTTPエラーレスポンスを生成できます。

use axum::http::StatusCode;
use thiserror::Error;

/// gallery error type
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// App id in the request path is not a number
    #[error("Invalid app id: {0}")]
    InvalidAppId(String),

    /// App not found
    #[error("App not found: {0}")]
    AppNotFound(i64),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Screenshot service returned an error or could not be reached
    #[error("Screenshot unavailable: {0}")]
    ScreenshotUnavailable(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GalleryError {
    /// Returns a safe error message for external clients.
    ///
    /// Upstream URLs and database details stay in the `Display` output,
    /// which is only written to server logs.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Server misconfigured",
            Self::InvalidAppId(_) => "Invalid app id",
            Self::AppNotFound(_) => "App not found",
            Self::Database(_) => "Database error",
            Self::ScreenshotUnavailable(_) => "Screenshot service unavailable",
            Self::Http(_) => "Backend service unavailable",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidAppId(_) => StatusCode::BAD_REQUEST,
            Self::AppNotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ScreenshotUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for GalleryError {
    fn from(err: sqlx::Error) -> Self {
        GalleryError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for GalleryError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        GalleryError::Database(err.to_string())
    }
}

impl From<reqwest::Error> for GalleryError {
    fn from(err: reqwest::Error) -> Self {
        GalleryError::Http(err.to_string())
    }
}

/// Result alias for gallery operations
pub type GalleryResult<T> = Result<T, GalleryError>;
