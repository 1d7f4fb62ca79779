//! Binance USDT-M 선물 주문 클라이언트.
//!
//! 주문 1건당 서명된 POST 요청 1건을 보내고, 응답을 성공/거래소 거부/
//! 프로토콜 에러로 분류합니다. 재시도하지 않습니다.

use crate::error::{OrderError, PlaceOrderResult, TransportError};
use crate::request::RequestBuilder;
use crate::transport::{
    HttpRequest, ReqwestTransport, Transport, API_KEY_HEADER, FORM_CONTENT_TYPE,
};
use basicbot_core::{
    order_span, ApiCredentials, ExchangeConfig, OrderIntent, OrderResult,
    DEFAULT_RECV_WINDOW_MS, DEFAULT_TIMEOUT_SECS, TESTNET_BASE_URL,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, Instrument};

/// 클라이언트 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃
    pub timeout: Duration,
    /// 수신 윈도우 (밀리초)
    pub recv_window: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(TESTNET_BASE_URL)
    }
}

impl ClientConfig {
    /// 기본 타임아웃(10초)과 수신 윈도우(60000ms)로 생성.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            recv_window: DEFAULT_RECV_WINDOW_MS,
        }
    }

    /// 요청 타임아웃 설정.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 수신 윈도우 설정.
    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// 로드된 거래소 설정에서 생성.
    pub fn from_settings(settings: &ExchangeConfig) -> Self {
        Self::new(settings.base_url.clone())
            .with_timeout(Duration::from_secs(settings.timeout_secs))
            .with_recv_window(settings.recv_window)
    }
}

/// 선물 주문 클라이언트.
///
/// 자격증명과 기본 URL은 생성 후 변경되지 않습니다.
/// 요청 간 상태를 공유하지 않으므로 여러 태스크에서 동시에 사용할 수 있습니다.
pub struct FuturesClient {
    credentials: ApiCredentials,
    base_url: String,
    timeout: Duration,
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for FuturesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuturesClient")
            .field("api_key", &self.credentials.masked_api_key())
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("recv_window", &self.builder.recv_window())
            .finish()
    }
}

impl FuturesClient {
    /// reqwest 전송 계층으로 클라이언트 생성.
    ///
    /// # Errors
    /// 기본 URL이 올바른 URL이 아니면 `TransportError::InvalidRequest`를 반환합니다.
    pub fn new(credentials: ApiCredentials, config: ClientConfig) -> Result<Self, TransportError> {
        Self::with_transport(credentials, config, Arc::new(ReqwestTransport::new()))
    }

    /// 지정한 전송 계층으로 클라이언트 생성.
    pub fn with_transport(
        credentials: ApiCredentials,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, TransportError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| {
            TransportError::InvalidRequest(format!("invalid base URL '{}': {}", base_url, e))
        })?;

        debug!(
            base_url = %base_url,
            api_key = %credentials.masked_api_key(),
            "Futures client created"
        );

        Ok(Self {
            credentials,
            base_url,
            timeout: config.timeout,
            builder: RequestBuilder::new().with_recv_window(config.recv_window),
            transport,
        })
    }

    /// 정규화된 기본 URL (끝의 '/' 제거).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 요청 타임아웃.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 주문을 제출합니다.
    ///
    /// 검증에 실패하면 네트워크 요청을 보내지 않습니다.
    /// 전송 에러는 주문 결과를 알 수 없음을 뜻합니다.
    pub async fn place_order(&self, intent: &OrderIntent) -> PlaceOrderResult<OrderResult> {
        let span = order_span!("place_order", intent.symbol, intent.order_type, intent.side);
        self.submit(intent).instrument(span).await
    }

    async fn submit(&self, intent: &OrderIntent) -> PlaceOrderResult<OrderResult> {
        let signed = self.builder.build(intent, &self.credentials)?;

        info!(
            "Placing {} order: {} {} qty={} price={} stopPrice={}",
            intent.order_type,
            intent.side,
            intent.symbol,
            intent.quantity,
            display_opt(intent.price),
            display_opt(intent.stop_price)
        );

        let url = format!("{}{}", self.base_url, signed.path());
        debug!("POST {} | params: {}", url, signed.query_string());

        let request = HttpRequest {
            method: signed.method().clone(),
            url,
            headers: vec![
                (API_KEY_HEADER, self.credentials.api_key().to_string()),
                ("Content-Type", FORM_CONTENT_TYPE.to_string()),
            ],
            body: signed.body(),
            timeout: self.timeout,
        };

        let response = self.transport.send(request).await?;
        info!("HTTP POST {} -> {}", signed.path(), response.status);
        debug!("Response body: {}", response.body);

        if !response.is_success() {
            return Err(OrderError::Exchange {
                status: response.status,
                body: response.body,
            });
        }

        let result = OrderResult::from_json(&response.body).map_err(|e| OrderError::Protocol {
            reason: e.to_string(),
            body: response.body.clone(),
        })?;

        info!(
            "Order accepted: orderId={} status={}",
            result.order_id(),
            result.status()
        );
        Ok(result)
    }
}

fn display_opt<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> ApiCredentials {
        ApiCredentials::new("abcdefgh12345678", "secret")
    }

    #[test]
    fn test_trailing_slash_removed() {
        let client =
            FuturesClient::new(credentials(), ClientConfig::new("https://example.com//")).unwrap();
        assert_eq!(client.base_url(), "https://example.com");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = FuturesClient::new(credentials(), ClientConfig::new("not a url"));
        assert!(matches!(result, Err(TransportError::InvalidRequest(_))));
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://testnet.binancefuture.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.recv_window, 60_000);
    }

    #[test]
    fn test_config_from_settings() {
        let settings = ExchangeConfig {
            base_url: "https://fapi.binance.com".to_string(),
            timeout_secs: 3,
            recv_window: 5_000,
            ..ExchangeConfig::default()
        };
        let config = ClientConfig::from_settings(&settings);
        assert_eq!(config.base_url, "https://fapi.binance.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.recv_window, 5_000);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = FuturesClient::new(credentials(), ClientConfig::default()).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("abcdefgh12345678"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("abcd...5678"));
    }
}
