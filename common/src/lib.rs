//! sitelist 共通クレート
//!
//! データモデル・カタログ形式・エラー型・環境変数設定を提供する

#![warn(missing_docs)]

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// エラー型定義
pub mod error;

/// カタログ（入力JSON）のワイヤ形式
pub mod protocol;

/// コアデータ型
pub mod types;

pub use error::{SyncError, SyncResult};
