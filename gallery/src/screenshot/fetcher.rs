//! 外部画像サービスからのスクリーンショット取得

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use tracing::debug;

use crate::common::error::{GalleryError, GalleryResult};

/// 画像サービスに名乗るUser-Agent
pub const SCREENSHOT_USER_AGENT: &str = concat!("app-gallery/", env!("CARGO_PKG_VERSION"));

/// 上流がContent-Typeを返さない場合の既定値
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// 受け付ける画像サイズの既定上限
pub const DEFAULT_MAX_BYTES: usize = crate::config::ScreenshotConfig::DEFAULT_MAX_BYTES;

/// 取得した画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// 画像データ
    pub bytes: Bytes,
    /// MIMEタイプ
    pub content_type: String,
}

/// プレビュー画像の取得元
#[async_trait]
pub trait ScreenshotFetcher: Send + Sync {
    /// 対象URLのプレビュー画像を取得する
    ///
    /// 上流の非2xx応答や通信失敗は `GalleryError::ScreenshotUnavailable` になる。
    async fn fetch(&self, url: &str) -> GalleryResult<FetchedImage>;
}

/// サムネイルサービス経由の取得
#[derive(Debug, Clone)]
pub struct ThumbnailFetcher {
    client: Client,
    endpoint: String,
    max_bytes: usize,
}

impl ThumbnailFetcher {
    /// 新しいフェッチャーを作成
    ///
    /// `endpoint` の末尾にURLエンコードした対象URLを連結してリクエストする。
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> GalleryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(SCREENSHOT_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            max_bytes: DEFAULT_MAX_BYTES,
        })
    }

    /// 画像サイズの上限を変更する。超えた応答は取得失敗として扱う。
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// 対象URLに対するリクエストURL
    pub fn request_url(&self, target: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
        format!("{}{}", self.endpoint, encoded)
    }
}

#[async_trait]
impl ScreenshotFetcher for ThumbnailFetcher {
    async fn fetch(&self, url: &str) -> GalleryResult<FetchedImage> {
        let request_url = self.request_url(url);
        debug!(target_url = %url, "Fetching screenshot");

        let mut response = self
            .client
            .get(&request_url)
            .send()
            .await
            .map_err(|e| GalleryError::ScreenshotUnavailable(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::ScreenshotUnavailable(format!(
                "{}: HTTP {}",
                url, status
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        if let Some(length) = response.content_length() {
            if length > self.max_bytes as u64 {
                return Err(too_large(url, self.max_bytes));
            }
        }

        // Content-Lengthが無い応答もあるため、読みながら上限を確認する
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| GalleryError::ScreenshotUnavailable(format!("{}: {}", url, e)))?
        {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large(url, self.max_bytes));
            }
            body.extend_from_slice(&chunk);
        }
        let bytes = Bytes::from(body);

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}

fn too_large(url: &str, max_bytes: usize) -> GalleryError {
    GalleryError::ScreenshotUnavailable(format!(
        "{}: image exceeds {} bytes",
        url, max_bytes
    ))
}
