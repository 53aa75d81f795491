use crate::infra::loader::load_yaml_from_file;
use crate::types::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// 記事インデックスの既定パス
pub const DEFAULT_INDEX_PATH: &str = "/data/articles.json";
/// 記事本文ディレクトリの既定パス
pub const DEFAULT_ARTICLES_DIR: &str = "/articles";

pub const ENV_BASE_URL: &str = "BLOG_BASE_URL";
pub const ENV_INDEX_PATH: &str = "BLOG_INDEX_PATH";
pub const ENV_ARTICLES_DIR: &str = "BLOG_ARTICLES_DIR";
pub const ENV_TIMEOUT_SECS: &str = "BLOG_HTTP_TIMEOUT_SECS";

/// 記事リポジトリの接続設定
///
/// 静的ファイルの配信元と、インデックス・本文のパスを保持する。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryConfig {
    pub base_url: String,
    #[serde(default = "default_index_path")]
    pub index_path: String,
    #[serde(default = "default_articles_dir")]
    pub articles_dir: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_index_path() -> String {
    DEFAULT_INDEX_PATH.to_string()
}

fn default_articles_dir() -> String {
    DEFAULT_ARTICLES_DIR.to_string()
}

impl RepositoryConfig {
    /// 配信元URLを指定し、その他は既定値で設定を作成
    pub fn new<U: Into<String>>(base_url: U) -> Self {
        Self {
            base_url: base_url.into(),
            index_path: default_index_path(),
            articles_dir: default_articles_dir(),
            timeout_secs: None,
        }
    }

    /// タイムアウトを設定
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// 環境変数から設定を読み込む
    /// `BLOG_BASE_URL`は必須、その他は未設定なら既定値
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// YAMLファイルから設定を読み込む
    pub fn from_yaml_file(path: &str) -> ConfigResult<Self> {
        let config: Self = load_yaml_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url =
            lookup(ENV_BASE_URL).ok_or_else(|| ConfigError::missing_env_var(ENV_BASE_URL))?;
        let mut config = Self::new(base_url);

        if let Some(index_path) = lookup(ENV_INDEX_PATH) {
            config.index_path = index_path;
        }
        if let Some(articles_dir) = lookup(ENV_ARTICLES_DIR) {
            config.articles_dir = articles_dir;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::invalid_value(format!(
                    "{}は整数である必要があります: {}",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
            config.timeout_secs = Some(secs);
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::invalid_value("base_urlが空です"));
        }
        Ok(())
    }

    /// リクエストごとのタイムアウト
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// 記事インデックスのURL
    pub fn index_url(&self) -> String {
        join_url(&self.base_url, &self.index_path)
    }

    /// 記事本文のURL
    pub fn article_url(&self, filename: &str) -> String {
        let dir = join_url(&self.base_url, &self.articles_dir);
        join_url(&dir, filename)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_urls() {
        let config = RepositoryConfig::new("http://localhost:8080/");
        assert_eq!(
            config.index_url(),
            "http://localhost:8080/data/articles.json"
        );
        assert_eq!(
            config.article_url("a.md"),
            "http://localhost:8080/articles/a.md"
        );
        assert_eq!(
            config.article_url("2024/b.md"),
            "http://localhost:8080/articles/2024/b.md"
        );
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[(
            ENV_BASE_URL,
            "https://blog.example.com",
        )]))
        .unwrap();
        assert_eq!(config, RepositoryConfig::new("https://blog.example.com"));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "https://blog.example.com"),
            (ENV_INDEX_PATH, "/static/index.json"),
            (ENV_ARTICLES_DIR, "/posts"),
            (ENV_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();
        assert_eq!(config.index_url(), "https://blog.example.com/static/index.json");
        assert_eq!(config.article_url("x.md"), "https://blog.example.com/posts/x.md");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_from_lookup_errors() {
        let missing = RepositoryConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(
            missing,
            Err(ConfigError::MissingEnvironmentVariable { .. })
        ));

        let bad_timeout = RepositoryConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "https://blog.example.com"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]));
        assert!(matches!(bad_timeout, Err(ConfigError::InvalidValue { .. })));

        let empty_base = RepositoryConfig::from_lookup(lookup_from(&[(ENV_BASE_URL, "  ")]));
        assert!(matches!(empty_base, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url: http://localhost:3000\narticles_dir: /content\ntimeout_secs: 5"
        )
        .unwrap();

        let config = RepositoryConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.index_path, DEFAULT_INDEX_PATH);
        assert_eq!(config.article_url("a.md"), "http://localhost:3000/content/a.md");
        assert_eq!(config.timeout_secs, Some(5));
    }
}
