//! ロギング初期化
//!
//! 標準エラー出力へ書き出す。`SITELIST_LOG_DIR` が設定されていれば日次ローテーションの
//! ログファイルにも書き出す。

use anyhow::Context;
use sitelist_common::config::{get_env, get_env_with_fallback_or};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// デフォルトのログレベル
const DEFAULT_LOG_LEVEL: &str = "info";

/// ログファイル名のプレフィックス
const LOG_FILE_PREFIX: &str = "sitelist.log";

/// ログフィルタを作成
pub fn build_filter(directive: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("invalid log filter '{}'", directive))
}

/// ロギングを初期化
///
/// ファイル出力時は返されるガードをプロセス終了まで保持すること。
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    let directive = get_env_with_fallback_or("SITELIST_LOG_LEVEL", "RUST_LOG", DEFAULT_LOG_LEVEL);
    let filter = build_filter(&directive)?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match get_env("SITELIST_LOG_DIR") {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .context("failed to install tracing subscriber")?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .context("failed to install tracing subscriber")?;
            Ok(None)
        }
    }
}
