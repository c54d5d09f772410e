//! アプリのプレビュー画像
//!
//! 外部のサムネイルサービスで描画した画像を取得し、アプリ単位でキャッシュする。

pub mod cache;
pub mod fetcher;

pub use cache::{Screenshot, ScreenshotCache};
pub use fetcher::{FetchedImage, ScreenshotFetcher, ThumbnailFetcher};
