//! App gallery server
//!
//! 掲載アプリ一覧の配信と、各アプリの死活確認・プレビュー画像のプロキシ

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// REST APIハンドラー
pub mod api;

/// ヘルスチェック
pub mod health;

/// プレビュー画像の取得とキャッシュ
pub mod screenshot;

/// データベースアクセス
pub mod db;

/// 時刻ソース
pub mod clock;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// axumサーバー起動
pub mod server;

/// 型定義
pub mod types;

use std::sync::Arc;

use common::error::GalleryResult;
use config::{HealthConfig, ScreenshotConfig};
use db::traits::AppRepository;
use health::HealthAggregator;
use screenshot::ScreenshotCache;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// アプリ一覧ストア
    pub repository: Arc<dyn AppRepository>,
    /// ヘルスチェック集計器（スナップショットを共有）
    pub health: HealthAggregator,
    /// スクリーンショットキャッシュ
    pub screenshots: ScreenshotCache,
}

impl AppState {
    /// 設定から本番用の状態を構築する
    pub fn from_config(
        repository: Arc<dyn AppRepository>,
        health_config: &HealthConfig,
        screenshot_config: &ScreenshotConfig,
    ) -> GalleryResult<Self> {
        Ok(Self {
            health: HealthAggregator::from_config(repository.clone(), health_config)?,
            screenshots: ScreenshotCache::from_config(screenshot_config)?,
            repository,
        })
    }
}
