//! アプリ一覧のデータベース操作

use crate::types::{App, NewApp};
use sqlx::SqlitePool;

/// アプリを登録し、採番済みのレコードを返す
pub async fn create_app(pool: &SqlitePool, app: &NewApp) -> Result<App, sqlx::Error> {
    let row = sqlx::query_as::<_, AppRow>(
        r#"
        INSERT INTO apps (name, category, url, stats)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, category, url, stats
        "#,
    )
    .bind(&app.name)
    .bind(&app.category)
    .bind(&app.url)
    .bind(&app.stats)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// アプリ一覧を取得
pub async fn list_apps(pool: &SqlitePool) -> Result<Vec<App>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AppRow>(
        r#"
        SELECT id, name, category, url, stats
        FROM apps
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// IDでアプリを取得
pub async fn get_app(pool: &SqlitePool, id: i64) -> Result<Option<App>, sqlx::Error> {
    let row = sqlx::query_as::<_, AppRow>(
        r#"
        SELECT id, name, category, url, stats
        FROM apps
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i64,
    name: String,
    category: Option<String>,
    url: String,
    stats: Option<String>,
}

impl From<AppRow> for App {
    fn from(row: AppRow) -> Self {
        App {
            id: row.id,
            name: row.name,
            category: row.category,
            url: row.url,
            stats: row.stats,
        }
    }
}
