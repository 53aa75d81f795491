pub mod model;
pub mod repository;

// 公開APIの再エクスポート

// model.rsから
pub use model::{
    collect_tags, filter_by_tag, find_by_id, latest, search, Article, ArticleIdQuery,
    ArticleSummary, BlogConfig, IndexDocument, DEFAULT_LATEST_LIMIT,
};

// repository.rsから
pub use repository::{ArticleRepository, CONTENT_FALLBACK};
