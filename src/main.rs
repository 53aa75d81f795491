use anyhow::{Context, Result};
use blogdata::{ArticleRepository, RepositoryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = RepositoryConfig::from_env().context("記事リポジトリの設定に失敗")?;
    println!("=== 記事インデックス: {} ===", config.index_url());
    let repository = ArticleRepository::with_reqwest(config);

    let latest = repository.get_latest_articles(None).await;
    println!("最新記事{}件:", latest.len());
    for article in &latest {
        println!("  [{}] {} ({})", article.id, article.title, article.date);
    }

    let tags = repository.get_all_tags().await;
    println!("タグ: {}", tags.join(", "));

    Ok(())
}
