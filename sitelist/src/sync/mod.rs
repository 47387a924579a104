//! 同期処理
//!
//! 取得 → 稼働確認 → 集約 → 書き込み を1回実行する。
//! どこかで失敗した場合は以降の書き込みを行わずにエラーを返す。

use chrono::Utc;
use sitelist_common::config::SyncConfig;
use sitelist_common::types::{SiteList, SyncReport};
use sitelist_common::SyncResult;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::aggregate::{build_site_list, SiteOrdering};
use crate::catalog::CatalogFetcher;
use crate::emit::{published_path, write_archive, write_site_list, StatusPage};
use crate::health::{LivenessProber, ProbeLimits};

/// 同期処理の結果
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// 書き込んだサイト一覧
    pub list: SiteList,
    /// 集計
    pub report: SyncReport,
    /// アーカイブコピーのパス
    pub archive_path: Option<PathBuf>,
}

/// 同期処理を1回実行
pub async fn run(config: &SyncConfig) -> SyncResult<SyncOutcome> {
    let catalog = CatalogFetcher::new()?.fetch(&config.source_url).await?;

    let prober = LivenessProber::new(config.probe_timeout)?;
    let results = prober
        .probe_all(catalog.endpoints(), ProbeLimits::from_config(config))
        .await;

    let (list, report) = build_site_list(results, &SiteOrdering::chinese());
    let generated_at = Utc::now();

    write_site_list(&config.output_path, &list).await?;

    if config.repository.is_none() {
        warn!(
            placeholder = config.repository_or_placeholder(),
            "SITELIST_REPOSITORY / GITHUB_REPOSITORY not set, README links use a placeholder"
        );
    }
    let page = StatusPage {
        site_count: list.sites.len(),
        generated_at,
        repository: config.repository_or_placeholder().to_string(),
        output_file: published_path(&config.output_path),
    };
    page.write(&config.readme_path).await?;

    let archive_path = match &config.archive_dir {
        Some(dir) => Some(write_archive(dir, &list, generated_at).await?),
        None => None,
    };

    info!(
        total = report.total,
        live = report.live,
        dead = report.dead,
        skipped_no_api = report.skipped_no_api,
        duplicate_api = report.duplicate_api,
        written = report.written,
        "Sync completed"
    );

    Ok(SyncOutcome {
        list,
        report,
        archive_path,
    })
}
