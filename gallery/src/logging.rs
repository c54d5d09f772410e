//! ロギング初期化
//!
//! 標準エラー出力へのfmtレイヤーに加え、`GALLERY_LOG_DIR` が設定されていれば
//! 日次ローテーションのファイル出力も行う。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::common::error::{GalleryError, GalleryResult};

/// ログファイル名の接頭辞
const LOG_FILE_PREFIX: &str = "gallery.log";

/// ログレベル指定を解決する
///
/// `GALLERY_LOG_LEVEL`、`RUST_LOG`、`info` の順に参照する。
pub fn resolve_log_level() -> String {
    std::env::var("GALLERY_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string())
}

/// フィルタ文字列を解析する
pub fn build_filter(level: &str) -> GalleryResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| GalleryError::Config(format!("invalid log filter '{}': {}", level, e)))
}

/// コンソール出力レイヤー
///
/// 標準出力はCLIの結果（JSONなど）専用とし、ログは標準エラー出力へ送る。
fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
}

/// グローバルsubscriberを初期化する
///
/// ファイル出力が有効な場合は返されたガードをプロセス終了まで保持すること。
pub fn init() -> GalleryResult<Option<WorkerGuard>> {
    let filter = build_filter(&resolve_log_level())?;
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer());

    match std::env::var("GALLERY_LOG_DIR") {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
                .map_err(|e| GalleryError::Config(e.to_string()))?;
            tracing::info!(log_dir = %dir, "File logging enabled");
            Ok(Some(guard))
        }
        Err(_) => {
            registry
                .try_init()
                .map_err(|e| GalleryError::Config(e.to_string()))?;
            Ok(None)
        }
    }
}
