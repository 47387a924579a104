//! エラー型定義
//!
//! 統一エラー型（thiserror使用）。
//! エンドポイント単位の稼働確認失敗はエラーではなく除外として扱うため、
//! ここに現れるのは処理全体を中断する致命的なエラーのみ。

use std::path::PathBuf;
use thiserror::Error;

/// 同期処理のエラー型
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client error (connection, TLS, timeout, body read)
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog responded with a non-success status
    #[error("Unexpected HTTP status {status} from {url}")]
    Status {
        /// Requested URL
        url: String,
        /// Returned status code
        status: u16,
    },

    /// JSON parse / serialization error
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    /// File write error
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// パス付きのI/Oエラーを作成
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// 同期処理の Result 型
pub type SyncResult<T> = Result<T, SyncError>;
