//! Configuration management via environment variables
//!
//! The batch job takes no configuration file. Every setting has a default that
//! matches the fixed upstream behaviour, and can be
//! overridden through `SITELIST_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{SyncError, SyncResult};

/// 取得元カタログのURL
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/hafrey1/LunaTV-config/refs/heads/main/LunaTV-config.json";

/// 出力JSONのパス
pub const DEFAULT_OUTPUT_PATH: &str = "output.json";

/// ステータスREADMEのパス
pub const DEFAULT_README_PATH: &str = "README.md";

/// 稼働確認のタイムアウト（ミリ秒）
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;

/// 同時に実行する稼働確認の上限
pub const DEFAULT_PROBE_CONCURRENCY: usize = 64;

/// 同時稼働確認数に指定できる最大値
pub const MAX_PROBE_CONCURRENCY: usize = 4096;

/// 稼働確認全体の締め切りに指定できる最大値（秒）
pub const MAX_PROBE_DEADLINE_SECS: u64 = 24 * 60 * 60;

/// リポジトリ識別子が未設定の場合のプレースホルダー
pub const PLACEHOLDER_REPOSITORY: &str = "OWNER/REPO";

/// Get an environment variable with fallback to a secondary name
///
/// The primary name wins when both are set. Empty values are treated as unset,
/// since CI runners commonly export blank variables.
///
/// # Returns
/// * `Some(value)` - The environment variable value
/// * `None` - Neither variable is set
///
/// # Example
/// ```
/// use sitelist_common::config::get_env_with_fallback;
///
/// let repo = get_env_with_fallback("SITELIST_REPOSITORY", "GITHUB_REPOSITORY");
/// ```
pub fn get_env_with_fallback(name: &str, fallback: &str) -> Option<String> {
    if let Some(val) = get_env(name) {
        return Some(val);
    }
    if let Some(val) = get_env(fallback) {
        tracing::debug!("Using '{}' because '{}' is not set", fallback, name);
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(name: &str, fallback: &str, default: &str) -> String {
    get_env_with_fallback(name, fallback).unwrap_or_else(|| default.to_string())
}

/// Get a single environment variable, treating an empty value as unset
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Get an environment variable parsed to a specific type
///
/// Returns `Ok(None)` if the variable is unset and a configuration error if it
/// is set but does not parse.
pub fn get_env_parse<T: std::str::FromStr>(name: &str) -> SyncResult<Option<T>> {
    match get_env(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| SyncError::Config(format!("invalid value for {}: '{}'", name, raw))),
    }
}

/// 同期処理の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// カタログの取得元URL
    pub source_url: String,
    /// 出力JSONのパス
    pub output_path: PathBuf,
    /// ステータスREADMEのパス
    pub readme_path: PathBuf,
    /// タイムスタンプ付きコピーの保存先（未設定なら保存しない）
    pub archive_dir: Option<PathBuf>,
    /// 1件あたりの稼働確認タイムアウト
    pub probe_timeout: Duration,
    /// 同時稼働確認数の上限（0 は無制限）
    pub probe_concurrency: usize,
    /// 稼働確認全体の締め切り（未設定なら無し）
    pub probe_deadline: Option<Duration>,
    /// `owner/repo` 形式のリポジトリ識別子
    pub repository: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            readme_path: PathBuf::from(DEFAULT_README_PATH),
            archive_dir: None,
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            probe_concurrency: DEFAULT_PROBE_CONCURRENCY,
            probe_deadline: None,
            repository: None,
        }
    }
}

impl SyncConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> SyncResult<Self> {
        let defaults = Self::default();

        let config = Self {
            source_url: get_env("SITELIST_SOURCE_URL").unwrap_or(defaults.source_url),
            output_path: get_env("SITELIST_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            readme_path: get_env("SITELIST_README")
                .map(PathBuf::from)
                .unwrap_or(defaults.readme_path),
            archive_dir: get_env("SITELIST_ARCHIVE_DIR").map(PathBuf::from),
            probe_timeout: get_env_parse::<u64>("SITELIST_PROBE_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.probe_timeout),
            probe_concurrency: get_env_parse::<usize>("SITELIST_PROBE_CONCURRENCY")?
                .unwrap_or(defaults.probe_concurrency),
            probe_deadline: get_env_parse::<u64>("SITELIST_PROBE_DEADLINE_SECS")?
                .map(Duration::from_secs),
            repository: get_env_with_fallback("SITELIST_REPOSITORY", "GITHUB_REPOSITORY"),
        };

        config.validate()?;
        Ok(config)
    }

    /// 設定値を検証する
    pub fn validate(&self) -> SyncResult<()> {
        if !(self.source_url.starts_with("http://") || self.source_url.starts_with("https://")) {
            return Err(SyncError::Config(format!(
                "source URL must be http(s): '{}'",
                self.source_url
            )));
        }
        if self.probe_timeout.is_zero() {
            return Err(SyncError::Config(
                "probe timeout must be greater than zero".to_string(),
            ));
        }
        if self.probe_concurrency > MAX_PROBE_CONCURRENCY {
            return Err(SyncError::Config(format!(
                "probe concurrency must be at most {}: {}",
                MAX_PROBE_CONCURRENCY, self.probe_concurrency
            )));
        }
        if let Some(deadline) = self.probe_deadline {
            if deadline > Duration::from_secs(MAX_PROBE_DEADLINE_SECS) {
                return Err(SyncError::Config(format!(
                    "probe deadline must be at most {} seconds: {}",
                    MAX_PROBE_DEADLINE_SECS,
                    deadline.as_secs()
                )));
            }
        }
        if let Some(repo) = &self.repository {
            let valid = repo
                .split_once('/')
                .map(|(owner, name)| !owner.is_empty() && !name.is_empty() && !name.contains('/'))
                .unwrap_or(false);
            if !valid {
                return Err(SyncError::Config(format!(
                    "repository must be 'owner/repo': '{}'",
                    repo
                )));
            }
        }
        Ok(())
    }

    /// リポジトリ識別子（未設定ならプレースホルダー）
    pub fn repository_or_placeholder(&self) -> &str {
        self.repository.as_deref().unwrap_or(PLACEHOLDER_REPOSITORY)
    }
}
