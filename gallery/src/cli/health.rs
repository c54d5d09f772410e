//! health サブコマンド
//!
//! 掲載アプリを1回だけプローブし、結果をJSONで出力します。

use clap::Args;
use std::sync::Arc;

use crate::config::{get_database_url, HealthConfig};
use crate::db::{self, traits::SqliteAppRepository};
use crate::health::HealthAggregator;

/// health サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct HealthArgs {
    /// Database URL [env: GALLERY_DATABASE_URL, DATABASE_URL] [default: sqlite://gallery.db]
    #[arg(long)]
    pub database_url: Option<String>,
}

impl HealthArgs {
    /// 実際に使うデータベースURL
    pub fn database_url(&self) -> String {
        self.database_url.clone().unwrap_or_else(get_database_url)
    }
}

/// 全アプリをプローブして結果を返す（JSON文字列）
pub async fn run(args: &HealthArgs) -> anyhow::Result<String> {
    let pool = db::create_pool(&args.database_url()).await?;
    let repository = Arc::new(SqliteAppRepository::new(pool));
    let aggregator = HealthAggregator::from_config(repository, &HealthConfig::from_env())?;

    let report = aggregator.refresh().await?;
    Ok(serde_json::to_string_pretty(&*report.results)?)
}

/// health サブコマンドを実行
pub async fn execute(args: &HealthArgs) -> anyhow::Result<()> {
    println!("{}", run(args).await?);
    Ok(())
}
