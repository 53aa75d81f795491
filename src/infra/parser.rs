use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// 記事の日付文字列を日付型に変換するヘルパー関数
///
/// 日付のみの文字列（"2024-01-01"）はUTCの0時として扱う。
/// `dateparser`は日付のみの場合に現在時刻で補完するため、
/// 同じ日付の記事同士の比較が呼び出しごとに揺れないよう先に処理する。
/// それ以外の形式は`dateparser`で解析し、UTCに変換する。
///
/// # サポート形式の例
/// - "2024-01-15"
/// - "2024-01-15T10:00:00Z"
/// - "Sun, 10 Aug 2025 12:00:00 +0000"
pub fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    let trimmed = date_str.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    match dateparser::parse(trimmed) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => Err(anyhow!("不正な日付形式: {}", date_str)),
    }
}
