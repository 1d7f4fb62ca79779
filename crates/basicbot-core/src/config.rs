//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → 환경 변수 순서로 덮어씁니다.

use crate::credentials::ApiCredentials;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;

/// 선물 테스트넷 REST 기본 URL.
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// 기본 HTTP 타임아웃 (초).
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 기본 수신 윈도우 (밀리초).
pub const DEFAULT_RECV_WINDOW_MS: u64 = 60_000;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// 거래소 설정
    pub exchange: ExchangeConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 거래소 설정.
///
/// # 보안
/// - `Debug` 구현은 `api_secret`을 출력하지 않습니다.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// API 키
    pub api_key: Option<String>,
    /// API 시크릿
    #[serde(deserialize_with = "deserialize_secret")]
    pub api_secret: Option<SecretString>,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 수신 윈도우 (밀리초)
    pub recv_window: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_BASE_URL.to_string(),
            api_key: None,
            api_secret: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            recv_window: DEFAULT_RECV_WINDOW_MS,
        }
    }
}

impl fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***REDACTED***"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***REDACTED***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

impl ExchangeConfig {
    /// 키와 시크릿이 모두 있으면 자격증명을 반환합니다.
    pub fn credentials(&self) -> Option<ApiCredentials> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(ApiCredentials::from_secret(key, secret.clone())),
            _ => None,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// 로그 파일 경로 (없으면 콘솔만)
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()).map(SecretString::from))
}

impl BotConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 경로를 지정했는데 파일이 없으면 에러를 반환합니다.
    ///
    /// 환경 변수 예: `BASICBOT__EXCHANGE__API_KEY`, `BASICBOT__LOGGING__LEVEL`.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("exchange.base_url", TESTNET_BASE_URL)?
            .set_default("exchange.timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("exchange.recv_window", DEFAULT_RECV_WINDOW_MS)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        // 명시한 파일은 반드시 존재해야 함
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(true));
        }

        // 환경 변수로 오버라이드
        let config = builder
            .add_source(
                config::Environment::with_prefix("BASICBOT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: BotConfig = config.try_deserialize()?;
        loaded.apply_env_overrides();
        Ok(loaded)
    }

    /// `BINANCE_*` 환경 변수에서만 설정을 생성합니다.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// `BINANCE_API_KEY`, `BINANCE_API_SECRET`, `BINANCE_BASE_URL`이 있으면 적용합니다.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// 조회 함수로 `BINANCE_*` 값을 적용합니다. 빈 값은 무시합니다.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty("BINANCE_API_KEY") {
            self.exchange.api_key = Some(key);
        }
        if let Some(secret) = non_empty("BINANCE_API_SECRET") {
            self.exchange.api_secret = Some(SecretString::from(secret));
        }
        if let Some(url) = non_empty("BINANCE_BASE_URL") {
            self.exchange.base_url = url;
        }
    }
}
