use thiserror::Error;

/// 取得処理のエラー型
/// 通信失敗、ステータス異常、JSONパース失敗の3種類を区別する
#[derive(Error, Debug)]
pub enum FetchError {
    /// リクエストの送信またはレスポンスの読み取りに失敗
    #[error("通信エラー: {url} - {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// レスポンスは受信したが成功ステータスではない
    #[error("HTTPステータスエラー: {url} - status {status}")]
    Status { url: String, status: u16 },

    /// レスポンス本文が期待する形式ではない
    #[error("JSONパースエラー: {context} - {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// 通信エラーを作成
    pub fn transport<U, E>(url: U, source: E) -> Self
    where
        U: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    /// ステータスエラーを作成
    pub fn status<U: Into<String>>(url: U, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// パースエラーを作成
    pub fn parse<C: Into<String>>(context: C, source: serde_json::Error) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }
}

/// 取得処理のResult型エイリアス
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let status = FetchError::status("http://localhost/data/articles.json", 404);
        assert_eq!(
            status.to_string(),
            "HTTPステータスエラー: http://localhost/data/articles.json - status 404"
        );

        let transport = FetchError::transport("http://localhost/a.md", "connection refused");
        assert!(transport.to_string().contains("connection refused"));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let parse = FetchError::parse("記事インデックス", json_err);
        assert!(parse.to_string().starts_with("JSONパースエラー: 記事インデックス"));
    }
}
