//! 出力ファイルの書き込み
//!
//! サイト一覧JSON・ステータスREADME・アーカイブコピーを書き出す。
//! いずれも上書きで、一時ファイル経由のリネームは行わない。

use chrono::{DateTime, Utc};
use sitelist_common::types::SiteList;
use sitelist_common::{SyncError, SyncResult};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::info;

/// 出力パスから名前を取れない場合に購読URLで使うファイル名
pub const OUTPUT_FILE_NAME: &str = "output.json";

/// サイト一覧を2スペースインデントのJSON文字列にする
pub fn to_pretty_json(list: &SiteList) -> SyncResult<String> {
    Ok(serde_json::to_string_pretty(list)?)
}

/// 出力パスをリポジトリ内の公開パスに変換する
///
/// 相対パスはそのまま `/` 区切りにし、絶対パスはファイル名だけを使う。
pub fn published_path(output_path: &Path) -> String {
    let parts: Vec<String> = if output_path.is_absolute() {
        output_path
            .file_name()
            .map(|name| vec![name.to_string_lossy().into_owned()])
            .unwrap_or_default()
    } else {
        output_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect()
    };

    if parts.is_empty() {
        OUTPUT_FILE_NAME.to_string()
    } else {
        parts.join("/")
    }
}

/// ファイルを書き込む（親ディレクトリが無ければ作成）
async fn write_file(path: &Path, contents: &str) -> SyncResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| SyncError::io(parent, e))?;
    }
    fs::write(path, contents)
        .await
        .map_err(|e| SyncError::io(path, e))
}

/// サイト一覧JSONを書き込む
pub async fn write_site_list(path: &Path, list: &SiteList) -> SyncResult<()> {
    let json = to_pretty_json(list)?;
    write_file(path, &json).await?;
    info!(path = %path.display(), sites = list.sites.len(), "Site list written");
    Ok(())
}

/// タイムスタンプ付きのコピーを書き込む
///
/// `<dir>/sites_<YYYYmmdd_HHMMSS>.json` を返す。
pub async fn write_archive(
    dir: &Path,
    list: &SiteList,
    generated_at: DateTime<Utc>,
) -> SyncResult<PathBuf> {
    let path = dir.join(format!(
        "sites_{}.json",
        generated_at.format("%Y%m%d_%H%M%S")
    ));
    write_file(&path, &to_pretty_json(list)?).await?;
    info!(path = %path.display(), "Archive copy written");
    Ok(path)
}

/// ステータスREADME
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPage {
    /// 出力したサイト数
    pub site_count: usize,
    /// 生成日時
    pub generated_at: DateTime<Utc>,
    /// `owner/repo`
    pub repository: String,
    /// リポジトリ内での出力JSONのパス
    pub output_file: String,
}

impl StatusPage {
    /// 出力JSONの raw URL
    pub fn raw_url(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/main/{}",
            self.repository, self.output_file
        )
    }

    /// ワークフロー一覧のURL
    pub fn actions_url(&self) -> String {
        format!("https://github.com/{}/actions", self.repository)
    }

    /// Markdownを生成
    pub fn render(&self) -> String {
        format!(
            r#"# LunaTV 站点列表

自动从 LunaTV-config 拉取站点，逐一检测接口可用性后生成 `{file}`。

| 项目 | 值 |
| --- | --- |
| 可用站点数 | {count} |
| 最后更新 | {timestamp} |

## 订阅地址

```
{raw_url}
```

## 运行状态

每次运行都会重新拉取并检测全部站点，不可用的站点不会出现在列表中。

运行记录：[GitHub Actions]({actions_url})
"#,
            file = self.output_file,
            count = self.site_count,
            timestamp = self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            raw_url = self.raw_url(),
            actions_url = self.actions_url(),
        )
    }

    /// READMEを書き込む
    pub async fn write(&self, path: &Path) -> SyncResult<()> {
        write_file(path, &self.render()).await?;
        info!(path = %path.display(), "Status README written");
        Ok(())
    }
}
