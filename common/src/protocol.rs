//! カタログ形式定義
//!
//! 取得元JSON（`{ "api_site": { "<domain>": { "name": ..., "api": ... } } }`）の読み込み

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::types::EndpointRecord;

/// API URLとして参照するフィールド（優先順）
const API_URL_FIELDS: [&str; 3] = ["api", "url", "ext"];

/// 取得したカタログ文書
///
/// `api_site` 以外のキーは無視する。エントリの順序は文書の順序を保持する。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    /// ドメイン → エンドポイント情報
    #[serde(default)]
    pub api_site: Map<String, Value>,
}

impl Catalog {
    /// JSONテキストからカタログを読み込む
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// エントリ数
    pub fn len(&self) -> usize {
        self.api_site.len()
    }

    /// エントリが無いか
    pub fn is_empty(&self) -> bool {
        self.api_site.is_empty()
    }

    /// エンドポイント一覧に変換する
    ///
    /// オブジェクトでないエントリは警告を出してスキップする。
    pub fn endpoints(&self) -> Vec<EndpointRecord> {
        self.api_site
            .iter()
            .filter_map(|(domain, info)| {
                let Some(info) = info.as_object() else {
                    warn!(domain = %domain, "Skipping catalog entry that is not an object");
                    return None;
                };
                Some(EndpointRecord::new(
                    domain.clone(),
                    string_field(info, "name").unwrap_or_default(),
                    api_url(info).unwrap_or_default(),
                ))
            })
            .collect()
    }
}

fn string_field(info: &Map<String, Value>, field: &str) -> Option<String> {
    info.get(field).and_then(Value::as_str).map(str::to_string)
}

fn api_url(info: &Map<String, Value>) -> Option<String> {
    API_URL_FIELDS.iter().find_map(|field| {
        string_field(info, field)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
