//! スクリーンショットキャッシュ
//!
//! アプリIDごとにプレビュー画像を保持する容量上限付きキャッシュ。
//! 期限切れのエントリは物理的に残っていてもミスとして扱い、次の取得成功時に置き換える。
//! 容量超過時は格納時刻が最も古いエントリを1件だけ追い出す（アクセス順ではない）。

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::fetcher::{ScreenshotFetcher, ThumbnailFetcher};
use crate::clock::{is_within, Clock, SystemClock};
use crate::common::error::GalleryResult;
use crate::config::ScreenshotConfig;
use crate::types::CacheSource;

#[derive(Debug, Clone)]
struct CachedScreenshot {
    bytes: Bytes,
    content_type: String,
    stored_at: DateTime<Utc>,
}

/// `get` の戻り値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    /// 画像データ
    pub bytes: Bytes,
    /// MIMEタイプ
    pub content_type: String,
    /// キャッシュから返したかどうか
    pub source: CacheSource,
}

/// スクリーンショットキャッシュ
///
/// クローンは同じエントリを共有する。
#[derive(Clone)]
pub struct ScreenshotCache {
    fetcher: Arc<dyn ScreenshotFetcher>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    capacity: usize,
    entries: Arc<RwLock<HashMap<i64, CachedScreenshot>>>,
}

impl ScreenshotCache {
    /// 新しいキャッシュを作成（容量は最低1）
    pub fn new(
        fetcher: Arc<dyn ScreenshotFetcher>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
        capacity: usize,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            fetcher,
            clock,
            ttl,
            capacity,
            entries: Arc::new(RwLock::new(HashMap::with_capacity(capacity))),
        }
    }

    /// 設定からサムネイルサービスとシステム時計を使うキャッシュを作成
    pub fn from_config(config: &ScreenshotConfig) -> GalleryResult<Self> {
        let fetcher = ThumbnailFetcher::new(config.endpoint.clone(), config.fetch_timeout)?
            .with_max_bytes(config.max_bytes);
        Ok(Self::new(
            Arc::new(fetcher),
            Arc::new(SystemClock),
            config.cache_ttl,
            config.cache_capacity,
        ))
    }

    /// アプリのスクリーンショットを取得
    ///
    /// 有効なエントリがあればそれを返し、なければ取得してキャッシュする。
    /// 取得に失敗した場合はキャッシュに何も書かずにエラーを返す。
    pub async fn get(&self, app_id: i64, url: &str) -> GalleryResult<Screenshot> {
        if let Some(hit) = self.lookup(app_id).await {
            debug!(app_id = app_id, "Screenshot cache hit");
            return Ok(hit);
        }

        let image = match self.fetcher.fetch(url).await {
            Ok(image) => image,
            Err(e) => {
                warn!(app_id = app_id, error = %e, "Screenshot fetch failed");
                return Err(e);
            }
        };
        let stored_at = self.clock.now();

        {
            let mut entries = self.entries.write().await;
            if !entries.contains_key(&app_id) && entries.len() >= self.capacity {
                if let Some(oldest) = entries
                    .iter()
                    .min_by_key(|(id, entry)| (entry.stored_at, **id))
                    .map(|(id, _)| *id)
                {
                    entries.remove(&oldest);
                    debug!(evicted_app_id = oldest, "Screenshot cache full, evicted oldest entry");
                }
            }
            entries.insert(
                app_id,
                CachedScreenshot {
                    bytes: image.bytes.clone(),
                    content_type: image.content_type.clone(),
                    stored_at,
                },
            );
        }

        Ok(Screenshot {
            bytes: image.bytes,
            content_type: image.content_type,
            source: CacheSource::Miss,
        })
    }

    async fn lookup(&self, app_id: i64) -> Option<Screenshot> {
        let entries = self.entries.read().await;
        let entry = entries.get(&app_id)?;

        if !is_within(entry.stored_at, self.clock.now(), self.ttl) {
            return None;
        }

        Some(Screenshot {
            bytes: entry.bytes.clone(),
            content_type: entry.content_type.clone(),
            source: CacheSource::Hit,
        })
    }

    /// 保持しているエントリ数（期限切れを含む）
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// エントリが空かどうか
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// エントリを保持しているかどうか（期限切れを含む）
    pub async fn contains(&self, app_id: i64) -> bool {
        self.entries.read().await.contains_key(&app_id)
    }

    /// 容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
