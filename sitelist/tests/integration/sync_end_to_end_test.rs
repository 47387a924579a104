//! Integration Test: 取得から書き込みまで
//!
//! 停止中のエンドポイントは除外され、稼働中のものだけが出力される。

use serde_json::json;
use sitelist::aggregate::SiteOrdering;
use sitelist::sync;
use sitelist::types::SiteList;
use std::cmp::Ordering;

use crate::support::{catalog_url, read_output, spawn_catalog, spawn_endpoint, test_config, DEAD_API};

/// 停止中(foo.com)は除外され、稼働中(bar.com)のみ出力
#[tokio::test]
async fn test_dead_endpoint_is_excluded() {
    let live = spawn_endpoint("/api.php/provide/vod", 200).await;
    let live_api = format!("{}/api.php/provide/vod", live.uri());
    let catalog = spawn_catalog(json!({
        "api_site": {
            "foo.com": {"name": "🎬Foo TV", "api": DEAD_API},
            "bar.com": {"name": "Bar", "api": live_api}
        }
    }))
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), catalog_url(&catalog));

    let outcome = sync::run(&config).await.unwrap();

    assert_eq!(
        read_output(dir.path()),
        json!({"sites": [{"key": "barcom", "name": "Bar", "api": live_api, "active": true}]})
    );
    assert_eq!(outcome.report.total, 2);
    assert_eq!(outcome.report.live, 1);
    assert_eq!(outcome.report.dead, 1);
    assert_eq!(outcome.report.written, 1);
}

/// API URLが空のエントリは稼働確認の結果に関わらず除外
#[tokio::test]
async fn test_empty_api_is_excluded() {
    let live = spawn_endpoint("/api.php/provide/vod", 200).await;
    let live_api = format!("{}/api.php/provide/vod", live.uri());
    let catalog = spawn_catalog(json!({
        "api_site": {
            "empty.com": {"name": "Empty", "api": ""},
            "missing.com": {"name": "Missing"},
            "ok.com": {"name": "Ok", "api": live_api}
        }
    }))
    .await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = sync::run(&test_config(dir.path(), catalog_url(&catalog)))
        .await
        .unwrap();

    let keys: Vec<_> = outcome.list.sites.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["okcom"]);
    assert_eq!(outcome.report.skipped_no_api, 2);
}

/// 200以外のステータスは停止中
#[tokio::test]
async fn test_non_200_endpoint_is_excluded() {
    let broken = spawn_endpoint("/api.php/provide/vod", 503).await;
    let catalog = spawn_catalog(json!({
        "api_site": {
            "broken.com": {"name": "Broken", "api": format!("{}/api.php/provide/vod", broken.uri())}
        }
    }))
    .await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = sync::run(&test_config(dir.path(), catalog_url(&catalog)))
        .await
        .unwrap();

    assert!(outcome.list.sites.is_empty());
    assert_eq!(read_output(dir.path()), json!({"sites": []}));
}

/// 出力は表示名→キーの順にソートされる
#[tokio::test]
async fn test_output_is_sorted() {
    let live = spawn_endpoint("/api.php/provide/vod", 200).await;
    let api = |n: u32| format!("{}/api.php/provide/vod?site={}", live.uri(), n);
    let catalog = spawn_catalog(json!({
        "api_site": {
            "zy.zhong.com": {"name": "中文资源", "api": api(1)},
            "bj.com": {"name": "北京影视", "api": api(2)},
            "ali.com": {"name": "🎬阿里-云", "api": api(3)},
            "zzz.com": {"name": "Same", "api": api(4)},
            "aaa.com": {"name": "Same", "api": api(5)}
        }
    }))
    .await;

    let dir = tempfile::tempdir().unwrap();
    sync::run(&test_config(dir.path(), catalog_url(&catalog)))
        .await
        .unwrap();

    let written: SiteList = serde_json::from_value(read_output(dir.path())).unwrap();
    assert_eq!(written.sites.len(), 5);

    let ordering = SiteOrdering::chinese();
    for pair in written.sites.windows(2) {
        assert_ne!(
            ordering.compare_sites(&pair[0], &pair[1]),
            Ordering::Greater,
            "{:?} should not sort after {:?}",
            pair[0],
            pair[1]
        );
    }
    assert!(written.sites.iter().any(|s| s.name == "阿里云"));
}

/// READMEとアーカイブが書き込まれる
#[tokio::test]
async fn test_readme_and_archive_written() {
    let live = spawn_endpoint("/api.php/provide/vod", 200).await;
    let catalog = spawn_catalog(json!({
        "api_site": {
            "bar.com": {"name": "Bar", "api": format!("{}/api.php/provide/vod", live.uri())}
        }
    }))
    .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path(), catalog_url(&catalog));
    config.archive_dir = Some(dir.path().join("data/archive"));

    let outcome = sync::run(&config).await.unwrap();

    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("| 可用站点数 | 1 |"));
    assert!(readme.contains("https://raw.githubusercontent.com/octo/sites/main/output.json"));
    assert!(readme.contains("https://github.com/octo/sites/actions"));

    let archive = outcome.archive_path.expect("archive path");
    let archived = std::fs::read_to_string(&archive).unwrap();
    let output = std::fs::read_to_string(dir.path().join("output.json")).unwrap();
    assert_eq!(archived, output);
}

/// リポジトリ未設定時はプレースホルダーを使う
#[tokio::test]
async fn test_readme_placeholder_repository() {
    let catalog = spawn_catalog(json!({"api_site": {}})).await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path(), catalog_url(&catalog));
    config.repository = None;

    sync::run(&config).await.unwrap();

    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("https://github.com/OWNER/REPO/actions"));
    assert!(readme.contains("| 可用站点数 | 0 |"));
}

/// READMEの購読URLは出力ファイル名に従う
#[tokio::test]
async fn test_readme_links_configured_output_name() {
    let catalog = spawn_catalog(json!({"api_site": {}})).await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path(), catalog_url(&catalog));
    config.output_path = dir.path().join("sites.json");

    sync::run(&config).await.unwrap();

    assert!(dir.path().join("sites.json").exists());
    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("https://raw.githubusercontent.com/octo/sites/main/sites.json"));
    assert!(!readme.contains("output.json"));
}
