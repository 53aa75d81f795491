//! 診断記録モジュール
//!
//! リポジトリの各操作で発生した失敗は呼び出し元に返さず、
//! ここで定義する`DiagnosticSink`に記録してから安全な既定値に置き換える。

use std::fmt;
use std::sync::{Arc, Mutex};

/// 診断を記録したリポジトリ操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListArticles,
    GetConfig,
    GetArticleById,
    GetArticleContent,
    GetArticlesByTag,
    SearchArticles,
    GetAllTags,
    GetLatestArticles,
}

impl Operation {
    /// 操作名（ログのフィールド用）
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListArticles => "list_articles",
            Self::GetConfig => "get_config",
            Self::GetArticleById => "get_article_by_id",
            Self::GetArticleContent => "get_article_content",
            Self::GetArticlesByTag => "get_articles_by_tag",
            Self::SearchArticles => "search_articles",
            Self::GetAllTags => "get_all_tags",
            Self::GetLatestArticles => "get_latest_articles",
        }
    }

    /// 失敗時のメッセージ
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::ListArticles => "記事一覧の取得に失敗",
            Self::GetConfig => "ブログ設定の取得に失敗",
            Self::GetArticleById => "記事の取得に失敗",
            Self::GetArticleContent => "記事内容の取得に失敗",
            Self::GetArticlesByTag => "タグによる記事の絞り込みに失敗",
            Self::SearchArticles => "記事の検索に失敗",
            Self::GetAllTags => "タグ一覧の取得に失敗",
            Self::GetLatestArticles => "最新記事の取得に失敗",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 既定値に置き換えられた内部エラーの記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub operation: Operation,
    pub error: String,
}

impl Diagnostic {
    pub fn new<E: fmt::Display>(operation: Operation, error: E) -> Self {
        Self {
            operation,
            error: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation.failure_message(), self.error)
    }
}

/// 診断の記録先
///
/// リポジトリの生成時に注入する。
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn record(&self, diagnostic: Diagnostic) {
        (**self).record(diagnostic)
    }
}

/// `tracing`に出力する本番用の記録先
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        tracing::error!(
            operation = diagnostic.operation.name(),
            error = %diagnostic.error,
            "{}",
            diagnostic.operation.failure_message()
        );
    }
}

/// テスト用のメモリ上の記録先
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録された診断のコピー
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// 指定した操作で記録された件数
    pub fn count_for(&self, operation: Operation) -> usize {
        self.records()
            .iter()
            .filter(|d| d.operation == operation)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

impl DiagnosticSink for MemoryDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        if let Ok(mut records) = self.records.lock() {
            records.push(diagnostic);
        }
    }
}
