//! ヘルスチェック
//!
//! 掲載アプリのURLに対するプル型の死活確認。
//! 全アプリ分の結果は一定時間キャッシュされ、`refresh=true` で再計算できる。

pub mod aggregator;
pub mod probe;

pub use aggregator::{HealthAggregator, HealthMap, HealthReport};
pub use probe::{HttpProbe, Probe, ProbeOutcome};
