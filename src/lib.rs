//! 静的ファイルとして配信されるブログ記事のインデックスと本文を取得し、
//! 一覧・タグ絞り込み・検索・最新記事などの読み取り専用ビューを提供する。

pub mod domain;
pub mod infra;
pub mod types;

pub use domain::article::{Article, ArticleRepository, ArticleSummary, BlogConfig};
pub use infra::config::RepositoryConfig;
pub use infra::diagnostics::{
    Diagnostic, DiagnosticSink, MemoryDiagnostics, Operation, TracingDiagnostics,
};
