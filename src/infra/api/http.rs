use crate::types::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// HTTPクライアントの抽象化トレイト
///
/// このトレイトは、実際のHTTP通信とモック実装の両方を
/// 統一的に扱えるようにするためのインターフェースです。
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// 指定されたURLからテキストを取得する
    ///
    /// 2xx以外のステータスは`FetchError::Status`として返す。
    ///
    /// # Arguments
    /// * `url` - 取得対象のURL
    /// * `timeout` - タイムアウト時間（`None`の場合はクライアントの既定値）
    async fn fetch_text(&self, url: &str, timeout: Option<Duration>) -> FetchResult<String>;
}

/// `reqwest` を使用した本番用のHTTPクライアント実装
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// 新しいHTTPクライアントを作成
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn fetch_text(&self, url: &str, timeout: Option<Duration>) -> FetchResult<String> {
        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))
    }
}

/// モックが返すレスポンスの種類
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 成功レスポンス（本文）
    Body(String),
    /// 成功以外のステータス
    Status(u16),
    /// 通信エラー
    Transport(String),
}

/// テスト用のモックHTTPクライアント
///
/// この実装はテスト時にDIされ、実際のHTTPリクエストを行わずに
/// URLごとに登録されたレスポンスやエラーを返します。
/// 登録のないURLには404を返します。
pub struct MockHttpClient {
    /// URL末尾のパスとレスポンスの対応
    routes: HashMap<String, MockResponse>,
    /// 全URL共通のレスポンス（ルートより優先度は低い）
    fallback: Option<MockResponse>,
    /// リクエストされたURLの履歴
    requests: Mutex<Vec<String>>,
}

impl MockHttpClient {
    /// ルート未登録のモッククライアントを作成
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// どのURLにも同じ本文を返すモッククライアントを作成
    pub fn new_success(mock_response: &str) -> Self {
        Self {
            fallback: Some(MockResponse::Body(mock_response.to_string())),
            ..Self::new()
        }
    }

    /// どのURLにも通信エラーを返すモッククライアントを作成
    pub fn new_error(error_message: &str) -> Self {
        Self {
            fallback: Some(MockResponse::Transport(error_message.to_string())),
            ..Self::new()
        }
    }

    /// パスに対するレスポンスを登録する
    pub fn with_route(mut self, path: &str, response: MockResponse) -> Self {
        self.routes.insert(path.to_string(), response);
        self
    }

    /// パスに対する成功レスポンスを登録する
    pub fn with_body(self, path: &str, body: &str) -> Self {
        self.with_route(path, MockResponse::Body(body.to_string()))
    }

    /// これまでにリクエストされたURL
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }

    /// 指定パスで終わるURLへのリクエスト回数
    pub fn request_count(&self, path: &str) -> usize {
        self.requested_urls()
            .iter()
            .filter(|url| url.ends_with(path))
            .count()
    }

    fn lookup(&self, url: &str) -> Option<&MockResponse> {
        self.routes
            .iter()
            .filter(|(path, _)| url.ends_with(path.as_str()))
            .max_by_key(|(path, _)| path.len())
            .map(|(_, response)| response)
            .or(self.fallback.as_ref())
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn fetch_text(&self, url: &str, _timeout: Option<Duration>) -> FetchResult<String> {
        if let Ok(mut urls) = self.requests.lock() {
            urls.push(url.to_string());
        }

        match self.lookup(url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Status(status)) => Err(FetchError::status(url, *status)),
            Some(MockResponse::Transport(message)) => Err(FetchError::transport(
                url,
                format!("モックHTTPエラー: {}", message),
            )),
            None => Err(FetchError::status(url, 404)),
        }
    }
}
