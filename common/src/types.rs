//! 共通型定義
//!
//! EndpointRecord, ProbeResult, SiteRecord等のコアデータ型

use serde::{Deserialize, Serialize};

/// カタログから読み込んだエンドポイント
///
/// カタログ1エントリにつき1つ生成され、生成後は読み取り専用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRecord {
    /// ドメイン名（カタログのキー）
    pub domain: String,
    /// 表示名（整形前）
    pub display_name: String,
    /// APIのURL（利用可能なURLが無い場合は空文字列）
    pub api_url: String,
}

impl EndpointRecord {
    /// 新しいエンドポイントを作成
    pub fn new(
        domain: impl Into<String>,
        display_name: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            display_name: display_name.into(),
            api_url: api_url.into(),
        }
    }

    /// API URLを持つか
    pub fn has_api(&self) -> bool {
        !self.api_url.trim().is_empty()
    }
}

/// 稼働確認の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// 対象エンドポイント
    pub record: EndpointRecord,
    /// HTTP 200 を返したか
    pub is_live: bool,
}

/// 出力されるサイト
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteRecord {
    /// 一意なキー（`^[a-z][a-z0-9]*$`）
    pub key: String,
    /// 整形済みの表示名
    pub name: String,
    /// APIのURL
    pub api: String,
    /// 常に true（停止中のサイトは出力しない）
    pub active: bool,
}

impl SiteRecord {
    /// 稼働中サイトとして作成
    pub fn active(key: String, name: String, api: String) -> Self {
        Self {
            key,
            name,
            api,
            active: true,
        }
    }
}

/// 出力ファイル全体（`{ "sites": [...] }`）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteList {
    /// サイト一覧（ソート済み）
    pub sites: Vec<SiteRecord>,
}

/// 1回の同期処理の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// カタログのエントリ数
    pub total: usize,
    /// HTTP 200 を返したエンドポイント数
    pub live: usize,
    /// 停止中と判定されたエンドポイント数（API URLなしを除く）
    pub dead: usize,
    /// API URLが無いため除外した数
    pub skipped_no_api: usize,
    /// API URLの重複で除外した数
    pub duplicate_api: usize,
    /// 出力したサイト数
    pub written: usize,
}
