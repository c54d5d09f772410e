//! Configuration management via environment variables
//!
//! `GALLERY_*` variables take precedence. The unprefixed names used by the
//! previous deployment (`PORT`, `DATABASE_URL`, ...) are still honoured
//! with a deprecation warning.

use std::time::Duration;

/// `GALLERY_*` 変数を読み、未設定なら旧名を読む
///
/// 旧名が使われた場合は移行を促す警告を出す。どちらも未設定なら `None`。
///
/// ```
/// use gallery::config::get_env_with_fallback;
///
/// std::env::set_var("PORT", "5999");
/// assert_eq!(
///     get_env_with_fallback("GALLERY_DOCTEST_UNSET_PORT", "PORT").as_deref(),
///     Some("5999")
/// );
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    std::env::var(new_name).ok().or_else(|| {
        let legacy = std::env::var(old_name).ok()?;
        tracing::warn!(
            legacy = old_name,
            replacement = new_name,
            "Legacy environment variable in use"
        );
        Some(legacy)
    })
}

/// [`get_env_with_fallback`] の結果が無ければ `default` を返す
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_owned())
}

/// [`get_env_with_fallback`] の値を `T` に変換する
///
/// 未設定または変換できない値の場合は `default`。
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    match get_env_with_fallback(new_name, old_name).map(|raw| raw.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            tracing::warn!(variable = new_name, "Ignoring unparsable value, using default");
            default
        }
        None => default,
    }
}

/// Parse a single (non-deprecated) variable
fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// `true/1/yes/on` を真として扱う
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// デフォルトのバインドアドレス
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// デフォルトの待ち受けポート
pub const DEFAULT_PORT: u16 = 5000;

/// デフォルトのデータベースURL
pub const DEFAULT_DATABASE_URL: &str = "sqlite://gallery.db";

/// バインドアドレスを取得（`GALLERY_HOST`、旧: `HOST`）
pub fn get_host() -> String {
    get_env_with_fallback_or("GALLERY_HOST", "HOST", DEFAULT_HOST)
}

/// 待ち受けポートを取得（`GALLERY_PORT`、旧: `PORT`）
pub fn get_port() -> u16 {
    get_env_with_fallback_parse("GALLERY_PORT", "PORT", DEFAULT_PORT)
}

/// データベースURLを取得
///
/// 環境変数 `GALLERY_DATABASE_URL`（旧: `DATABASE_URL`）から取得する。
pub fn get_database_url() -> String {
    get_env_with_fallback_or("GALLERY_DATABASE_URL", "DATABASE_URL", DEFAULT_DATABASE_URL)
}

/// ヘルスチェック設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthConfig {
    /// 1回のプローブに許す最大時間
    pub probe_timeout: Duration,
    /// 集計結果を再利用できる期間
    pub cache_ttl: Duration,
}

impl HealthConfig {
    /// デフォルトのプローブタイムアウト（秒）
    pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 8;
    /// デフォルトのキャッシュ有効期間（秒）
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 180;

    /// Load health check configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            probe_timeout: Duration::from_secs(get_env_parse(
                "GALLERY_HEALTH_PROBE_TIMEOUT_SECS",
                Self::DEFAULT_PROBE_TIMEOUT_SECS,
            )),
            cache_ttl: Duration::from_secs(get_env_parse(
                "GALLERY_HEALTH_CACHE_TTL_SECS",
                Self::DEFAULT_CACHE_TTL_SECS,
            )),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(Self::DEFAULT_PROBE_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(Self::DEFAULT_CACHE_TTL_SECS),
        }
    }
}

/// スクリーンショット設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotConfig {
    /// 画像サービスのベースURL（末尾にエンコード済みの対象URLを連結する）
    pub endpoint: String,
    /// 1回の取得に許す最大時間
    pub fetch_timeout: Duration,
    /// キャッシュエントリの有効期間
    pub cache_ttl: Duration,
    /// キャッシュの最大エントリ数
    pub cache_capacity: usize,
    /// 1枚あたりの最大バイト数
    pub max_bytes: usize,
}

impl ScreenshotConfig {
    /// デフォルトの画像サービス
    pub const DEFAULT_ENDPOINT: &'static str = "https://image.thum.io/get/width/640/crop/360/";
    /// デフォルトの取得タイムアウト（秒）
    pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
    /// デフォルトのキャッシュ有効期間（秒）
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
    /// デフォルトのキャッシュ容量
    pub const DEFAULT_CACHE_CAPACITY: usize = 60;
    /// デフォルトの最大画像サイズ（10 MiB）
    pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;

    /// Load screenshot configuration from environment variables.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("GALLERY_SCREENSHOT_ENDPOINT")
            .unwrap_or_else(|_| Self::DEFAULT_ENDPOINT.to_string());
        // 容量0ではキャッシュが機能しないため最低1に丸める
        let cache_capacity = get_env_parse(
            "GALLERY_SCREENSHOT_CACHE_CAPACITY",
            Self::DEFAULT_CACHE_CAPACITY,
        )
        .max(1);

        Self {
            endpoint,
            fetch_timeout: Duration::from_secs(get_env_parse(
                "GALLERY_SCREENSHOT_TIMEOUT_SECS",
                Self::DEFAULT_FETCH_TIMEOUT_SECS,
            )),
            cache_ttl: Duration::from_secs(get_env_parse(
                "GALLERY_SCREENSHOT_CACHE_TTL_SECS",
                Self::DEFAULT_CACHE_TTL_SECS,
            )),
            cache_capacity,
            max_bytes: get_env_parse("GALLERY_SCREENSHOT_MAX_BYTES", Self::DEFAULT_MAX_BYTES),
        }
    }
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            fetch_timeout: Duration::from_secs(Self::DEFAULT_FETCH_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(Self::DEFAULT_CACHE_TTL_SECS),
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
            max_bytes: Self::DEFAULT_MAX_BYTES,
        }
    }
}
