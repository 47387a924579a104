//! エンドポイント稼働確認
//!
//! GET 1回でHTTP 200が返るかを判定する。失敗はすべて `false` として扱い、
//! 呼び出し元へエラーを返さない。

use futures::future::join_all;
use reqwest::{Client, StatusCode};
use sitelist_common::config::SyncConfig;
use sitelist_common::types::{EndpointRecord, ProbeResult};
use sitelist_common::SyncResult;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

/// 停止中と判定した理由
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeadReason {
    /// URLが空
    #[error("no API URL")]
    EmptyUrl,
    /// http(s) 以外のURL
    #[error("unsupported URL scheme")]
    UnsupportedScheme,
    /// 200以外のステータス
    #[error("HTTP {0}")]
    Status(StatusCode),
    /// タイムアウト
    #[error("timed out")]
    Timeout,
    /// 接続エラー等
    #[error("request failed: {0}")]
    Request(String),
    /// 稼働確認全体の締め切り超過
    #[error("probe deadline exceeded")]
    DeadlineExceeded,
}

/// 並列稼働確認の制限
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeLimits {
    /// 同時実行数の上限（0 は無制限）
    pub concurrency: usize,
    /// 全体の締め切り
    pub deadline: Option<Duration>,
}

impl ProbeLimits {
    /// 設定から作成
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            concurrency: config.probe_concurrency,
            deadline: config.probe_deadline,
        }
    }

    /// 無制限
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// 稼働確認クライアント
#[derive(Clone)]
pub struct LivenessProber {
    /// HTTPクライアント（タイムアウト設定済み）
    client: Client,
    /// 1件あたりのタイムアウト
    timeout: Duration,
}

impl LivenessProber {
    /// 新しいプローバーを作成
    pub fn new(timeout: Duration) -> SyncResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    /// URLが稼働中か判定する
    pub async fn probe(&self, url: &str) -> bool {
        match self.check(url).await {
            Ok(()) => true,
            Err(reason) => {
                debug!(url = %url, reason = %reason, "Probe failed");
                false
            }
        }
    }

    /// 判定理由付きで稼働確認する
    ///
    /// レスポンスボディは読まずに破棄する。
    pub async fn check(&self, url: &str) -> Result<(), DeadReason> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DeadReason::EmptyUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DeadReason::UnsupportedScheme);
        }

        match self.client.get(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => Ok(()),
            Ok(response) => Err(DeadReason::Status(response.status())),
            Err(e) if e.is_timeout() => Err(DeadReason::Timeout),
            Err(e) => Err(DeadReason::Request(e.to_string())),
        }
    }

    /// 全エンドポイントを並列チェック
    ///
    /// 全件の判定が終わるまで待ち、入力と同じ順序で結果を返す。
    pub async fn probe_all(
        &self,
        endpoints: Vec<EndpointRecord>,
        limits: ProbeLimits,
    ) -> Vec<ProbeResult> {
        if endpoints.is_empty() {
            info!("No endpoints to probe");
            return Vec::new();
        }

        info!(
            count = endpoints.len(),
            concurrency = limits.concurrency,
            timeout_ms = self.timeout.as_millis() as u64,
            "Starting parallel liveness probe"
        );

        let semaphore = (limits.concurrency > 0)
            .then(|| Semaphore::new(limits.concurrency.min(Semaphore::MAX_PERMITS)));
        // 加算が溢れる締め切りは無いものとして扱う
        let deadline = limits.deadline.and_then(|d| Instant::now().checked_add(d));

        let probes = endpoints.into_iter().map(|record| {
            let semaphore = semaphore.as_ref();
            async move {
                let outcome = self
                    .check_bounded(&record.api_url, semaphore, deadline)
                    .await;
                match &outcome {
                    Ok(()) => debug!(domain = %record.domain, api = %record.api_url, "Endpoint is live"),
                    Err(DeadReason::EmptyUrl) => {
                        debug!(domain = %record.domain, "Endpoint has no API URL")
                    }
                    Err(reason) => warn!(
                        domain = %record.domain,
                        api = %record.api_url,
                        reason = %reason,
                        "Endpoint is dead"
                    ),
                }
                ProbeResult {
                    record,
                    is_live: outcome.is_ok(),
                }
            }
        });

        let results = join_all(probes).await;

        let live = results.iter().filter(|r| r.is_live).count();
        info!(
            live = live,
            dead = results.len() - live,
            "Parallel liveness probe completed"
        );

        results
    }

    async fn check_bounded(
        &self,
        url: &str,
        semaphore: Option<&Semaphore>,
        deadline: Option<Instant>,
    ) -> Result<(), DeadReason> {
        if url.trim().is_empty() {
            return Err(DeadReason::EmptyUrl);
        }

        let bounded = async {
            let _permit = match semaphore {
                // セマフォは閉じないため acquire は失敗しない
                Some(semaphore) => semaphore.acquire().await.ok(),
                None => None,
            };
            self.check(url).await
        };

        match deadline {
            Some(deadline) => timeout_at(deadline, bounded)
                .await
                .unwrap_or(Err(DeadReason::DeadlineExceeded)),
            None => bounded.await,
        }
    }
}
