//! キー生成・表示名整形
//!
//! どちらも純粋関数でI/Oを行わない。

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// ドメインから英字が1文字も得られない場合のキー
pub const DEFAULT_KEY: &str = "site";

/// 表示名から取り除く装飾文字（絵文字除去が使えない場合もこれだけは除去する）
const DECORATION_CHARS: [char; 3] = ['-', '—', '🎬'];

/// 絵文字・ピクトグラム（ZWJ・異体字セレクタ・タグ文字を含む）
static EMOJI_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    compile(
        r"[\p{Emoji_Presentation}\p{Extended_Pictographic}\p{Emoji_Modifier}\x{200D}\x{FE0E}\x{FE0F}\x{E0020}-\x{E007F}]",
    )
});

/// ハイフン・ダッシュ・🎬・空白の連続
static DECORATION_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| compile(r"[-—🎬\s]+"));

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(error = %e, "Name pattern unavailable, using literal fallback");
            None
        }
    }
}

/// ドメイン名からキーを生成
///
/// ASCII英字以外を除去して小文字化する。結果が空なら [`DEFAULT_KEY`]。
///
/// ```
/// use sitelist::normalize::gen_key;
///
/// assert_eq!(gen_key("Example123.com"), "examplecom");
/// assert_eq!(gen_key(""), "site");
/// ```
pub fn gen_key(domain: &str) -> String {
    let key: String = domain
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if key.is_empty() {
        DEFAULT_KEY.to_string()
    } else {
        key
    }
}

/// キーが `^[a-z][a-z0-9]*$` を満たすか
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// 表示名を整形
///
/// 絵文字を除去し、ハイフン・ダッシュ・🎬・空白の連続を取り除いて前後をトリムする。
/// 失敗することはない。パターンが使えない環境では装飾文字と空白の除去のみ行う。
pub fn clean_name(name: &str) -> String {
    match (EMOJI_PATTERN.as_ref(), DECORATION_PATTERN.as_ref()) {
        (Some(emoji), Some(decoration)) => {
            let without_emoji = emoji.replace_all(name, "");
            decoration
                .replace_all(&without_emoji, "")
                .trim()
                .to_string()
        }
        _ => clean_name_literal(name),
    }
}

/// 絵文字除去を行わない簡易整形
pub fn clean_name_literal(name: &str) -> String {
    name.chars()
        .filter(|c| !DECORATION_CHARS.contains(c) && !c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}
