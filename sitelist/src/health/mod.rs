//! 稼働確認
//!
//! カタログの各エンドポイントにGETを1回送り、HTTP 200 を返したものだけを稼働中とみなす。
//! 全件を同一タスク上で並列に実行し、同時実行数と全体の締め切りは設定で制限できる。

pub mod prober;

pub use prober::{DeadReason, LivenessProber, ProbeLimits};
