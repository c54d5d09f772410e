//! データベースアクセス層
//!
//! SQLiteベースのアプリ一覧ストア

/// アプリ一覧
pub mod apps;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;

use crate::common::error::GalleryResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// 接続プールを作成し、マイグレーションを実行する
///
/// ファイルが存在しない場合は作成する。
pub async fn create_pool(database_url: &str) -> GalleryResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!(database_url = %database_url, "Database ready");

    Ok(pool)
}

/// インメモリのプールを作成する
///
/// `sqlite::memory:` は接続ごとに別DBになるため接続数を1に固定する。
pub async fn create_in_memory_pool() -> GalleryResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}
