//! 型定義モジュール
//!
//! アプリケーション全体で使用される共通的な型定義を管理します。
//! - 取得エラー型: 通信/ステータス/パースの失敗の統一表現
//! - 設定エラー型: 環境変数や設定ファイルの読み込み失敗

pub mod config;
pub mod error;

// 便利な再エクスポート
pub use config::{ConfigError, ConfigResult};
pub use error::{FetchError, FetchResult};
