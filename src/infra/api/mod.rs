pub mod http;

pub use http::{HttpClient, MockHttpClient, MockResponse, ReqwestHttpClient};
