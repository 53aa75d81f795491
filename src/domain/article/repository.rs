use super::model::{
    collect_tags, filter_by_tag, find_by_id, latest, search, Article, ArticleIdQuery,
    ArticleSummary, BlogConfig, IndexDocument, DEFAULT_LATEST_LIMIT,
};
use crate::infra::api::http::{HttpClient, ReqwestHttpClient};
use crate::infra::config::RepositoryConfig;
use crate::infra::diagnostics::{Diagnostic, DiagnosticSink, Operation, TracingDiagnostics};
use crate::types::{FetchError, FetchResult};
use std::sync::Arc;

/// 本文が取得できなかった場合に表示用として返す内容
pub const CONTENT_FALLBACK: &str = "# 文章加载失败\n\n抱歉，无法加载文章内容。";

/// 静的ファイル上の記事インデックスと本文を読み出すリポジトリ
///
/// 各操作は呼び出しごとにインデックスを取得し直す（キャッシュしない）。
/// 失敗は呼び出し元に返さず、診断として記録したうえで
/// 空の一覧・`None`・フォールバック本文などの既定値を返す。
pub struct ArticleRepository<C: HttpClient = ReqwestHttpClient> {
    client: C,
    config: RepositoryConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl ArticleRepository<ReqwestHttpClient> {
    /// `reqwest`クライアントでリポジトリを作成
    pub fn with_reqwest(config: RepositoryConfig) -> Self {
        Self::new(ReqwestHttpClient::new(), config)
    }

    /// `reqwest`クライアントと診断の記録先を指定してリポジトリを作成
    pub fn with_reqwest_and_diagnostics(
        config: RepositoryConfig,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self::with_diagnostics(ReqwestHttpClient::new(), config, diagnostics)
    }
}

impl<C: HttpClient> ArticleRepository<C> {
    /// 診断を`tracing`に出力するリポジトリを作成
    pub fn new(client: C, config: RepositoryConfig) -> Self {
        Self::with_diagnostics(client, config, Arc::new(TracingDiagnostics))
    }

    /// 診断の記録先を指定してリポジトリを作成
    pub fn with_diagnostics(
        client: C,
        config: RepositoryConfig,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            client,
            config,
            diagnostics,
        }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// 記事一覧を取得する
    pub async fn list_articles(&self) -> Vec<ArticleSummary> {
        self.articles_or_empty(Operation::ListArticles).await
    }

    /// ブログ設定を取得する
    pub async fn get_config(&self) -> BlogConfig {
        match self.fetch_index().await {
            Ok(index) => index.config,
            Err(e) => {
                self.report(Operation::GetConfig, &e);
                BlogConfig::new()
            }
        }
    }

    /// IDで記事を取得し、本文を付けて返す
    ///
    /// 一致する記事がなければ`None`。本文の取得失敗はフォールバック本文になる。
    pub async fn get_article_by_id<Q: ArticleIdQuery + ?Sized>(&self, id: &Q) -> Option<Article> {
        let articles = self.articles_or_empty(Operation::GetArticleById).await;
        let summary = find_by_id(&articles, id)?;
        let content = self.get_article_content(&summary.filename).await;
        Some(summary.with_content(content))
    }

    /// 記事本文（Markdown）を取得する
    pub async fn get_article_content(&self, filename: &str) -> String {
        let url = self.config.article_url(filename);
        match self.client.fetch_text(&url, self.config.timeout()).await {
            Ok(content) => {
                tracing::debug!(%url, len = content.len(), "記事内容を取得");
                content
            }
            Err(e) => {
                self.report(Operation::GetArticleContent, &e);
                CONTENT_FALLBACK.to_string()
            }
        }
    }

    /// タグで記事を絞り込む
    pub async fn get_articles_by_tag(&self, tag: &str) -> Vec<ArticleSummary> {
        let articles = self.articles_or_empty(Operation::GetArticlesByTag).await;
        filter_by_tag(&articles, tag)
    }

    /// キーワードで記事を検索する
    pub async fn search_articles(&self, keyword: &str) -> Vec<ArticleSummary> {
        let articles = self.articles_or_empty(Operation::SearchArticles).await;
        search(&articles, keyword)
    }

    /// 全タグを初出順で取得する
    pub async fn get_all_tags(&self) -> Vec<String> {
        let articles = self.articles_or_empty(Operation::GetAllTags).await;
        collect_tags(&articles)
    }

    /// 最新記事を取得する（`None`の場合は5件）
    pub async fn get_latest_articles(&self, limit: Option<usize>) -> Vec<ArticleSummary> {
        let articles = self.articles_or_empty(Operation::GetLatestArticles).await;
        latest(&articles, limit.unwrap_or(DEFAULT_LATEST_LIMIT))
    }

    async fn articles_or_empty(&self, operation: Operation) -> Vec<ArticleSummary> {
        match self.fetch_index().await {
            Ok(index) => index.articles,
            Err(e) => {
                self.report(operation, &e);
                Vec::new()
            }
        }
    }

    /// 記事インデックスを取得してパースする
    async fn fetch_index(&self) -> FetchResult<IndexDocument> {
        let url = self.config.index_url();
        let body = self.client.fetch_text(&url, self.config.timeout()).await?;
        let index: IndexDocument = serde_json::from_str(&body)
            .map_err(|e| FetchError::parse(format!("記事インデックス {}", url), e))?;
        tracing::debug!(%url, articles = index.articles.len(), "記事インデックスを取得");
        Ok(index)
    }

    fn report(&self, operation: Operation, error: &FetchError) {
        self.diagnostics.record(Diagnostic::new(operation, error));
    }
}
