//! アプリ一覧のヘルスチェック集計
//!
//! 全アプリを並列にプローブし、結果をまとめて一定時間キャッシュする。
//!
//! - 1アプリにつき1タスクを起動し、全タスクの完了を待つ（途中で打ち切らない）
//! - 個々のプローブ失敗は該当アプリの `{ status: 0, ok: false }` としてのみ現れる
//! - スナップショットの置き換えは全タスクの完了後に1回だけ行う
//! - 同時に発生したリフレッシュは合流させず、それぞれがプローブを実行する

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use super::probe::{HttpProbe, Probe};
use crate::clock::{is_within, Clock, SystemClock};
use crate::common::error::GalleryResult;
use crate::config::HealthConfig;
use crate::db::traits::AppRepository;
use crate::types::{App, CacheSource, HealthResult};

/// アプリID → 結果
pub type HealthMap = BTreeMap<i64, HealthResult>;

/// `get_health` の戻り値
#[derive(Debug, Clone)]
pub struct HealthReport {
    /// 集計結果
    pub results: Arc<HealthMap>,
    /// 集計完了時刻
    pub captured_at: DateTime<Utc>,
    /// キャッシュから返したかどうか
    pub source: CacheSource,
}

#[derive(Debug, Clone)]
struct HealthSnapshot {
    results: Arc<HealthMap>,
    captured_at: DateTime<Utc>,
}

/// ヘルスチェック集計器
///
/// クローンは同じスナップショットを共有する。
#[derive(Clone)]
pub struct HealthAggregator {
    /// アプリ一覧ストア
    repository: Arc<dyn AppRepository>,
    /// プローブ実装
    probe: Arc<dyn Probe>,
    /// 時刻ソース
    clock: Arc<dyn Clock>,
    /// スナップショットの有効期間
    cache_ttl: Duration,
    /// 直近の集計結果
    snapshot: Arc<RwLock<Option<HealthSnapshot>>>,
}

impl HealthAggregator {
    /// 新しい集計器を作成
    pub fn new(
        repository: Arc<dyn AppRepository>,
        probe: Arc<dyn Probe>,
        clock: Arc<dyn Clock>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            probe,
            clock,
            cache_ttl,
            snapshot: Arc::new(RwLock::new(None)),
        }
    }

    /// 設定からHTTPプローブとシステム時計を使う集計器を作成
    pub fn from_config(
        repository: Arc<dyn AppRepository>,
        config: &HealthConfig,
    ) -> GalleryResult<Self> {
        let probe = HttpProbe::new(config.probe_timeout)?;
        Ok(Self::new(
            repository,
            Arc::new(probe),
            Arc::new(SystemClock),
            config.cache_ttl,
        ))
    }

    /// 全アプリのヘルス状態を取得
    ///
    /// `force_refresh` が false で有効なスナップショットがあればそれを返す。
    /// それ以外はストアから一覧を取得して全アプリをプローブし直す。
    pub async fn get_health(&self, force_refresh: bool) -> GalleryResult<HealthReport> {
        if !force_refresh {
            if let Some(report) = self.cached().await {
                debug!(captured_at = %report.captured_at, "Serving cached health snapshot");
                return Ok(report);
            }
        }

        self.refresh().await
    }

    /// キャッシュを無視して全アプリをプローブし、スナップショットを置き換える
    pub async fn refresh(&self) -> GalleryResult<HealthReport> {
        let apps = self.repository.list_apps().await?;
        let results = Arc::new(self.probe_all(apps).await);
        let captured_at = self.clock.now();

        *self.snapshot.write().await = Some(HealthSnapshot {
            results: results.clone(),
            captured_at,
        });

        Ok(HealthReport {
            results,
            captured_at,
            source: CacheSource::Miss,
        })
    }

    async fn cached(&self) -> Option<HealthReport> {
        let guard = self.snapshot.read().await;
        let snapshot = guard.as_ref()?;

        if !is_within(snapshot.captured_at, self.clock.now(), self.cache_ttl) {
            return None;
        }

        Some(HealthReport {
            results: snapshot.results.clone(),
            captured_at: snapshot.captured_at,
            source: CacheSource::Hit,
        })
    }

    /// 全アプリを並列プローブ
    async fn probe_all(&self, apps: Vec<App>) -> HealthMap {
        if apps.is_empty() {
            info!("No apps to check");
            return HealthMap::new();
        }

        info!(count = apps.len(), "Starting parallel health check for all apps");

        let mut handles = Vec::with_capacity(apps.len());

        for app in apps {
            let probe = self.probe.clone();
            let app_id = app.id;
            handles.push((
                app_id,
                tokio::spawn(async move { probe.probe(&app.url).await }),
            ));
        }

        let mut results = HealthMap::new();
        let mut healthy = 0;

        for (app_id, handle) in handles {
            let result = match handle.await {
                Ok(outcome) => HealthResult {
                    app_id,
                    status: outcome.status,
                    ok: outcome.ok,
                },
                Err(e) => {
                    error!(app_id = app_id, "Probe task join error: {}", e);
                    HealthResult::unreachable(app_id)
                }
            };

            if result.ok {
                healthy += 1;
            } else {
                debug!(app_id = app_id, status = result.status, "App unhealthy");
            }
            results.insert(app_id, result);
        }

        info!(
            healthy = healthy,
            unhealthy = results.len() - healthy,
            "Parallel health check completed"
        );

        results
    }
}
