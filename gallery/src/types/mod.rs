//! 型定義

pub mod app;
pub mod health;

pub use app::{App, NewApp};
pub use health::HealthResult;

/// レスポンスがキャッシュから返されたかどうか
///
/// `X-Cache` ヘッダーの値として公開する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    /// キャッシュヒット
    Hit,
    /// 新たに取得・計算した
    Miss,
}

impl CacheSource {
    /// ヘッダー値表現
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheSource::Hit => "HIT",
            CacheSource::Miss => "MISS",
        }
    }
}

impl std::fmt::Display for CacheSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
