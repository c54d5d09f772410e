//! 単一URLの死活プローブ
//!
//! HEADを優先し、HEADを受け付けないオリジンにはGETでフォールバックする。
//! フォールバックを含めて1回のタイムアウト内で完了させ、リトライはしない。

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::common::error::GalleryResult;

/// ヘルスチェック時のUser-Agent
pub const HEALTH_CHECK_USER_AGENT: &str =
    concat!("app-gallery-healthcheck/", env!("CARGO_PKG_VERSION"));

/// 追従するリダイレクトの上限
const MAX_REDIRECTS: usize = 10;

/// プローブの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// 最終的なHTTPステータス（到達不能なら0）
    pub status: u16,
    /// 2xx/3xx で応答したか
    pub ok: bool,
}

impl ProbeOutcome {
    /// 到達不能
    pub const UNREACHABLE: ProbeOutcome = ProbeOutcome {
        status: 0,
        ok: false,
    };

    /// HTTPステータスから判定
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            ok: (200..400).contains(&status),
        }
    }
}

/// 1つのURLに対する死活確認
#[async_trait]
pub trait Probe: Send + Sync {
    /// URLを確認する。失敗は `ProbeOutcome::UNREACHABLE` として返し、エラーにはしない。
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

/// reqwestによるHTTPプローブ
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    /// 新しいプローブを作成
    pub fn new(timeout: Duration) -> GalleryResult<Self> {
        let client = Client::builder()
            .user_agent(HEALTH_CHECK_USER_AGENT)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client, timeout })
    }

    /// タイムアウト
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request(&self, url: &str) -> Result<StatusCode, reqwest::Error> {
        let status = self.client.head(url).send().await?.status();

        if status == StatusCode::METHOD_NOT_ALLOWED || status == StatusCode::NOT_IMPLEMENTED {
            debug!(url = %url, status = status.as_u16(), "HEAD rejected, retrying with GET");
            // ボディは読まずに破棄する
            return Ok(self.client.get(url).send().await?.status());
        }

        Ok(status)
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        match tokio::time::timeout(self.timeout, self.request(url)).await {
            Ok(Ok(status)) => ProbeOutcome::from_status(status.as_u16()),
            Ok(Err(e)) => {
                debug!(url = %url, error = %e, "Probe transport error");
                ProbeOutcome::UNREACHABLE
            }
            Err(_) => {
                debug!(
                    url = %url,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Probe timed out"
                );
                ProbeOutcome::UNREACHABLE
            }
        }
    }
}
