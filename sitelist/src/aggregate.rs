//! 稼働確認結果の集約
//!
//! 停止中・API URLなし・API URL重複のエントリを除外し、キーを一意に割り当て、
//! 表示名（中国語ロケール照合）→キーの順でソートする。

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use sitelist_common::types::{ProbeResult, SiteList, SiteRecord, SyncReport};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::normalize::{clean_name, gen_key};

/// 一意なキーの割り当て
///
/// 既に使われているキーには `1`, `2`, … を付けて空きを探す。
#[derive(Debug, Default)]
pub struct KeyAllocator {
    used: HashSet<String>,
}

impl KeyAllocator {
    /// 未使用のキーを割り当てる
    pub fn allocate(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }

        let mut suffix = 1u32;
        loop {
            let candidate = format!("{}{}", base, suffix);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// 割り当て済みのキー数
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// 1件も割り当てていないか
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// サイトの並び順
pub struct SiteOrdering {
    /// `zh` 照合器（作成できなければコードポイント順）
    collator: Option<Collator>,
}

impl SiteOrdering {
    /// 中国語ロケールの照合順
    pub fn chinese() -> Self {
        match Collator::try_new(&locale!("zh").into(), CollatorOptions::new()) {
            Ok(collator) => Self {
                collator: Some(collator),
            },
            Err(e) => {
                warn!(error = ?e, "zh collator unavailable, falling back to code point order");
                Self::code_point()
            }
        }
    }

    /// コードポイント順
    pub fn code_point() -> Self {
        Self { collator: None }
    }

    /// 文字列を比較
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }

    /// 表示名、同じならキーで比較
    pub fn compare_sites(&self, a: &SiteRecord, b: &SiteRecord) -> Ordering {
        self.compare(&a.name, &b.name)
            .then_with(|| self.compare(&a.key, &b.key))
    }

    /// 安定ソート
    pub fn sort(&self, sites: &mut [SiteRecord]) {
        sites.sort_by(|a, b| self.compare_sites(a, b));
    }
}

/// 稼働確認結果からサイト一覧を作成
///
/// 全件の稼働確認が終わった後に呼ぶ。キーはカタログの順序で割り当てる。
pub fn build_site_list(
    results: Vec<ProbeResult>,
    ordering: &SiteOrdering,
) -> (SiteList, SyncReport) {
    let mut report = SyncReport {
        total: results.len(),
        ..SyncReport::default()
    };
    let mut keys = KeyAllocator::default();
    let mut seen_apis = HashSet::new();
    let mut sites = Vec::new();

    for ProbeResult { record, is_live } in results {
        if !record.has_api() {
            report.skipped_no_api += 1;
            continue;
        }
        if !is_live {
            report.dead += 1;
            continue;
        }
        report.live += 1;

        let api = record.api_url.trim().to_string();
        if !seen_apis.insert(api.clone()) {
            debug!(domain = %record.domain, api = %api, "Skipping duplicate API URL");
            report.duplicate_api += 1;
            continue;
        }

        let key = keys.allocate(&gen_key(&record.domain));
        sites.push(SiteRecord::active(key, clean_name(&record.display_name), api));
    }

    ordering.sort(&mut sites);
    report.written = sites.len();

    (SiteList { sites }, report)
}
