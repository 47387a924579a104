//! Integration Test: キーの一意性
//!
//! 同じキーに正規化されるドメインには数字の接尾辞が付く。

use serde_json::json;
use sitelist::normalize::is_valid_key;
use sitelist::sync;
use std::collections::HashSet;

use crate::support::{catalog_url, spawn_catalog, spawn_endpoint, test_config};

/// "test" に正規化される2ドメイン → "test" と "test1"
#[tokio::test]
async fn test_colliding_keys_get_numeric_suffix() {
    let live = spawn_endpoint("/api.php/provide/vod", 200).await;
    let catalog = spawn_catalog(json!({
        "api_site": {
            "test": {"name": "One", "api": format!("{}/api.php/provide/vod?a=1", live.uri())},
            "te.st": {"name": "Two", "api": format!("{}/api.php/provide/vod?a=2", live.uri())}
        }
    }))
    .await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = sync::run(&test_config(dir.path(), catalog_url(&catalog)))
        .await
        .unwrap();

    let by_name: Vec<_> = outcome
        .list
        .sites
        .iter()
        .map(|s| (s.name.as_str(), s.key.as_str()))
        .collect();
    // カタログ順に割り当てる（先に現れた "test" が接尾辞なし）
    assert_eq!(by_name, vec![("One", "test"), ("Two", "test1")]);
}

/// 英字を含まないドメインは "site" 系のキーになる
#[tokio::test]
async fn test_keys_unique_for_letterless_domains() {
    let live = spawn_endpoint("/api.php/provide/vod", 200).await;
    let mut sites = serde_json::Map::new();
    for i in 0..12 {
        sites.insert(
            format!("{}.{}", i, i * 7),
            json!({"name": format!("资源{}", i), "api": format!("{}/api.php/provide/vod?n={}", live.uri(), i)}),
        );
    }
    let catalog = spawn_catalog(json!({ "api_site": sites })).await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = sync::run(&test_config(dir.path(), catalog_url(&catalog)))
        .await
        .unwrap();

    let keys: HashSet<_> = outcome.list.sites.iter().map(|s| s.key.clone()).collect();
    assert_eq!(keys.len(), 12);
    assert!(keys.contains("site"));
    assert!(keys.contains("site11"));
    assert!(keys.iter().all(|k| is_valid_key(k)));
}
