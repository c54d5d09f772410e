//! ギャラリーに掲載するアプリ

use serde::{Deserialize, Serialize};

/// 掲載アプリ
///
/// ヘルスチェックとスクリーンショットは `id` と `url` のみを参照する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// 一意なID
    pub id: i64,
    /// 表示名
    pub name: String,
    /// カテゴリ
    pub category: Option<String>,
    /// 公開URL（http/https の絶対URL）
    pub url: String,
    /// 一覧表示用の統計文字列
    pub stats: Option<String>,
}

/// 登録用の入力
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApp {
    /// 表示名
    pub name: String,
    /// カテゴリ
    pub category: Option<String>,
    /// 公開URL
    pub url: String,
    /// 統計文字列
    pub stats: Option<String>,
}

impl NewApp {
    /// 名前とURLだけで作成
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            url: url.into(),
            stats: None,
        }
    }
}
