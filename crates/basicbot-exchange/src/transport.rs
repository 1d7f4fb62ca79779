//! HTTP 전송 계층.
//!
//! 클라이언트는 `Transport` trait을 통해서만 네트워크에 접근하므로
//! 테스트에서는 가짜 구현으로 교체할 수 있습니다.

use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// API 키 헤더 이름.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// 폼 본문 Content-Type.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// 전송할 HTTP 요청.
#[derive(Clone)]
pub struct HttpRequest {
    /// HTTP 메서드
    pub method: Method,
    /// 전체 URL
    pub url: String,
    /// 헤더 목록
    pub headers: Vec<(&'static str, String)>,
    /// 요청 본문
    pub body: String,
    /// 요청 타임아웃
    pub timeout: Duration,
}

impl HttpRequest {
    /// 헤더 값을 조회합니다 (대소문자 무시).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case(API_KEY_HEADER) {
                    (*k, "[REDACTED]")
                } else {
                    (*k, v.as_str())
                }
            })
            .collect();

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_len", &self.body.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// 수신한 HTTP 응답.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP 상태 코드
    pub status: u16,
    /// 응답 본문
    pub body: String,
}

impl HttpResponse {
    /// 2xx 여부.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 요청 1건을 보내고 응답 1건을 받는 전송 계층.
///
/// 재시도하지 않습니다. 응답을 받지 못하면 `TransportError`를 반환합니다.
#[async_trait]
pub trait Transport: Send + Sync {
    /// 요청 전송.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// reqwest 기반 전송 계층.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 기본 HTTP 클라이언트로 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 미리 구성한 HTTP 클라이언트로 생성.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .timeout(request.timeout)
            .body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, body_len = body.len(), "Response received");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: Method::POST,
            url: "https://example.com/fapi/v1/order".to_string(),
            headers: vec![
                (API_KEY_HEADER, "my-api-key-1234".to_string()),
                ("Content-Type", FORM_CONTENT_TYPE.to_string()),
            ],
            body: "symbol=BTCUSDT".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let debug = format!("{:?}", request());
        assert!(!debug.contains("my-api-key-1234"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains(FORM_CONTENT_TYPE));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = request();
        assert_eq!(request.header("x-mbx-apikey"), Some("my-api-key-1234"));
        assert_eq!(request.header("content-type"), Some(FORM_CONTENT_TYPE));
        assert_eq!(request.header("accept"), None);
    }

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse {
            status: 200,
            body: String::new(),
        };
        let bad = HttpResponse {
            status: 400,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }
}
