//! Repository traitパターン定義
//!
//! アプリ一覧ストアを抽象化し、ヘルスチェックやAPIを
//! DBなしでテストできるようにする。

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::common::error::GalleryResult;
use crate::types::{App, NewApp};

/// アプリ一覧ストアのRepository trait
#[async_trait]
pub trait AppRepository: Send + Sync {
    /// アプリ一覧を取得
    async fn list_apps(&self) -> GalleryResult<Vec<App>>;

    /// IDでアプリを取得
    async fn get_app(&self, id: i64) -> GalleryResult<Option<App>>;

    /// アプリを登録
    async fn create_app(&self, app: &NewApp) -> GalleryResult<App>;
}

/// SQLite実装
#[derive(Debug, Clone)]
pub struct SqliteAppRepository {
    pool: SqlitePool,
}

impl SqliteAppRepository {
    /// プールから作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 内部のプール
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl AppRepository for SqliteAppRepository {
    async fn list_apps(&self) -> GalleryResult<Vec<App>> {
        Ok(super::apps::list_apps(&self.pool).await?)
    }

    async fn get_app(&self, id: i64) -> GalleryResult<Option<App>> {
        Ok(super::apps::get_app(&self.pool, id).await?)
    }

    async fn create_app(&self, app: &NewApp) -> GalleryResult<App> {
        Ok(super::apps::create_app(&self.pool, app).await?)
    }
}
