//! カタログ取得
//!
//! 取得元JSONを1回だけ取得する。失敗は致命的エラーとして呼び出し元へ返す。

use reqwest::Client;
use sitelist_common::protocol::Catalog;
use sitelist_common::{SyncError, SyncResult};
use std::time::Duration;
use tracing::{debug, info};

/// カタログ取得のタイムアウト（秒）
const FETCH_TIMEOUT_SECS: u64 = 30;

/// カタログ取得クライアント
#[derive(Clone)]
pub struct CatalogFetcher {
    client: Client,
}

impl CatalogFetcher {
    /// 新しいフェッチャーを作成
    pub fn new() -> SyncResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// カタログを取得して読み込む
    ///
    /// 2xx以外のステータス・不正なJSONはエラー。
    pub async fn fetch(&self, url: &str) -> SyncResult<Catalog> {
        info!(url = %url, "Fetching catalog");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Catalog downloaded");

        let catalog = Catalog::from_json(&body)?;
        info!(entries = catalog.len(), "Catalog parsed");
        Ok(catalog)
    }
}
