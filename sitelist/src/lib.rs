//! sitelist
//!
//! LunaTV の取得元カタログから稼働中のサイトだけを抽出し、
//! `output.json` とステータスREADMEを生成するバッチ処理

#![warn(missing_docs)]

/// 稼働確認結果の集約（除外・キー割り当て・ソート）
pub mod aggregate;

/// カタログ取得
pub mod catalog;

/// CLIインターフェース
pub mod cli;

/// 出力ファイルの書き込み
pub mod emit;

/// 稼働確認
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// キー生成・表示名整形
pub mod normalize;

/// 同期処理（取得から書き込みまで）
pub mod sync;

pub use sitelist_common::config;
pub use sitelist_common::types;
pub use sitelist_common::{SyncError, SyncResult};
