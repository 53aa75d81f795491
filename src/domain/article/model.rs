use crate::infra::parser::parse_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// 最新記事の既定件数
pub const DEFAULT_LATEST_LIMIT: usize = 5;

/// ブログ設定（サイト側の持ち物なので中身は解釈しない）
pub type BlogConfig = serde_json::Map<String, serde_json::Value>;

/// 記事サマリー（インデックスの1要素、本文を除く）
///
/// `id`以外の項目は未指定や`null`を空として扱う。
/// 1件の記事に欠けた項目があってもインデックス全体は読めるようにする。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
    /// 上記以外の項目（`cover`など）はそのまま保持して返す
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// 記事エンティティ（サマリーと本文の統合表現）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(flatten)]
    pub summary: ArticleSummary,
    pub content: String,
}

// 記事インデックス（取得するJSONのルート）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<ArticleSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: BlogConfig,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ArticleSummary {
    /// タグを持っているか（完全一致）
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// キーワードがタイトル・概要・タグのいずれかに含まれるか
    ///
    /// `lower_keyword`は小文字化済みであること。
    fn matches_keyword(&self, lower_keyword: &str) -> bool {
        self.title.to_lowercase().contains(lower_keyword)
            || self.excerpt.to_lowercase().contains(lower_keyword)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(lower_keyword))
    }

    /// 日付を解析する（解析できなければ`None`）
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date).ok()
    }

    /// 本文と組み合わせて記事を作る
    pub fn with_content(self, content: String) -> Article {
        Article {
            summary: self,
            content,
        }
    }
}

/// 記事IDとして解釈できる問い合わせ値
///
/// 数値はそのまま、文字列は先頭の整数部分だけを読む
/// （`"12abc"`は12、`"1.9"`は1、`"0x10"`は16、数字で始まらなければ`None`）。
pub trait ArticleIdQuery {
    fn to_article_id(&self) -> Option<i64>;
}

macro_rules! impl_lossless_id_query {
    ($($t:ty),*) => {
        $(impl ArticleIdQuery for $t {
            fn to_article_id(&self) -> Option<i64> {
                Some(i64::from(*self))
            }
        })*
    };
}

macro_rules! impl_checked_id_query {
    ($($t:ty),*) => {
        $(impl ArticleIdQuery for $t {
            fn to_article_id(&self) -> Option<i64> {
                i64::try_from(*self).ok()
            }
        })*
    };
}

impl_lossless_id_query!(i8, i16, i32, i64, u8, u16, u32);
impl_checked_id_query!(u64, usize, isize);

impl ArticleIdQuery for f64 {
    fn to_article_id(&self) -> Option<i64> {
        if self.is_finite() {
            Some(self.trunc() as i64)
        } else {
            None
        }
    }
}

impl ArticleIdQuery for f32 {
    fn to_article_id(&self) -> Option<i64> {
        f64::from(*self).to_article_id()
    }
}

impl ArticleIdQuery for str {
    fn to_article_id(&self) -> Option<i64> {
        parse_leading_int(self)
    }
}

impl ArticleIdQuery for String {
    fn to_article_id(&self) -> Option<i64> {
        parse_leading_int(self)
    }
}

impl<T: ArticleIdQuery + ?Sized> ArticleIdQuery for &T {
    fn to_article_id(&self) -> Option<i64> {
        (**self).to_article_id()
    }
}

/// 文字列先頭の整数を読む
///
/// 符号の後に`0x`/`0X`が続く場合は16進数として読む。
/// i64に収まらない値は`None`。
fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (sign, unsigned) = match s.as_bytes().first() {
        Some(b'-') => ("-", &s[1..]),
        Some(b'+') => ("", &s[1..]),
        _ => ("", s),
    };

    let (radix, body) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let digits_len = body
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();
    if digits_len == 0 {
        return None;
    }

    // 符号ごとパースしてi64::MINも表現できるようにする
    let signed = format!("{}{}", sign, &body[..digits_len]);
    i64::from_str_radix(&signed, radix).ok()
}

/// IDが一致する最初の記事を探す
pub fn find_by_id<Q: ArticleIdQuery + ?Sized>(
    articles: &[ArticleSummary],
    id: &Q,
) -> Option<ArticleSummary> {
    let id = id.to_article_id()?;
    articles.iter().find(|article| article.id == id).cloned()
}

/// タグで絞り込む（順序は元のまま）
pub fn filter_by_tag(articles: &[ArticleSummary], tag: &str) -> Vec<ArticleSummary> {
    articles
        .iter()
        .filter(|article| article.has_tag(tag))
        .cloned()
        .collect()
}

/// 大文字小文字を区別せずキーワード検索する
/// 空のキーワードは全件に一致する
pub fn search(articles: &[ArticleSummary], keyword: &str) -> Vec<ArticleSummary> {
    let lower_keyword = keyword.to_lowercase();
    articles
        .iter()
        .filter(|article| article.matches_keyword(&lower_keyword))
        .cloned()
        .collect()
}

/// 全タグを初出順に重複なく集める
pub fn collect_tags(articles: &[ArticleSummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .flat_map(|article| article.tags.iter())
        .filter(|tag| seen.insert(*tag))
        .cloned()
        .collect()
}

/// 日付の新しい順に並べて先頭`limit`件を返す
///
/// 同じ日付は元の順序を保つ。解析できない日付は末尾に回す。
pub fn latest(articles: &[ArticleSummary], limit: usize) -> Vec<ArticleSummary> {
    let mut dated: Vec<(Option<DateTime<Utc>>, &ArticleSummary)> = articles
        .iter()
        .map(|article| (article.published_at(), article))
        .collect();

    // sort_byは安定ソート
    dated.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    dated
        .into_iter()
        .take(limit)
        .map(|(_, article)| article.clone())
        .collect()
}
