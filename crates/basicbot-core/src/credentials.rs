//! # 자격증명 모듈
//!
//! 거래소 API 키와 시크릿을 보관합니다.
//!
//! ## 보안 고려사항
//! - 시크릿은 `SecretString`으로만 보관하며 직렬화되지 않음
//! - `Debug` 출력에서 API 키는 마스킹, 시크릿은 완전히 가림
//! - 시크릿은 서명 키로만 사용되고 전송되지 않음

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// 거래소 API 자격증명.
///
/// API 키는 요청 헤더로 전송되고, 시크릿은 HMAC 키로만 사용됩니다.
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    api_secret: SecretString,
}

impl ApiCredentials {
    /// 새 자격증명 생성.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// 이미 보호된 시크릿으로 생성.
    pub fn from_secret(api_key: impl Into<String>, api_secret: SecretString) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret,
        }
    }

    /// API 키 반환.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// 서명용 시크릿 바이트.
    pub fn secret_bytes(&self) -> &[u8] {
        self.api_secret.expose_secret().as_bytes()
    }

    /// 로그 출력용으로 마스킹된 API 키.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() > 8 {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        } else {
            "***REDACTED***".to_string()
        }
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.masked_api_key())
            .field("api_secret", &"***REDACTED***")
            .finish()
    }
}
