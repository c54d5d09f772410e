//! ヘルスチェック結果

use serde::Serialize;

/// 1アプリ分のヘルスチェック結果
///
/// JSONでは `{ "status": 200, "ok": true }` 形式で公開し、
/// `app_id` はマップのキーとして表現する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthResult {
    /// 対象アプリID
    #[serde(skip)]
    pub app_id: i64,
    /// 最終的なHTTPステータス（到達不能なら0）
    pub status: u16,
    /// 2xx/3xx で応答したか
    pub ok: bool,
}

impl HealthResult {
    /// 到達不能（タイムアウト、DNS失敗、接続拒否など）
    pub fn unreachable(app_id: i64) -> Self {
        Self {
            app_id,
            status: 0,
            ok: false,
        }
    }
}
