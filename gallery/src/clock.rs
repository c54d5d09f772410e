//! 時刻ソース
//!
//! キャッシュの鮮度判定は読み出し時にインラインで行うため、
//! テストから時刻を進められるよう `Clock` で抽象化する。

use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::time::Duration;

/// 現在時刻を返すソース
pub trait Clock: Send + Sync {
    /// 現在時刻
    fn now(&self) -> DateTime<Utc>;
}

/// システム時計
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 手動で進める時計（テスト用）
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// 指定時刻から開始する時計を作成
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// 時刻を進める（表現可能な範囲を超える場合は何もしない）
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = chrono::Duration::from_std(by)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
        {
            *now = next;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// `since` から `now` までの経過時間が `window` 未満かどうか
///
/// 時計が巻き戻って経過時間が負になった場合は期限切れとして扱う。
pub fn is_within(since: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    match now.signed_duration_since(since).to_std() {
        Ok(elapsed) => elapsed < window,
        Err(_) => false,
    }
}
