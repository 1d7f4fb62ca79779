//! 주문 요청 구성 및 서명.
//!
//! 주문 의도를 검증하고, 파라미터를 정해진 순서로 조립한 뒤
//! 타임스탬프를 붙여 서명한 요청을 만듭니다.

use crate::signer;
use basicbot_core::{
    ApiCredentials, DecimalExt, OrderIntent, OrderType, ValidationResult,
    DEFAULT_RECV_WINDOW_MS,
};
use reqwest::Method;
use std::time::{SystemTime, UNIX_EPOCH};
use url::form_urlencoded;

/// 주문 생성 엔드포인트.
pub const ORDER_PATH: &str = "/fapi/v1/order";

/// 순서가 보존되는 요청 파라미터 목록.
pub type Params = Vec<(&'static str, String)>;

/// 파라미터를 `k=v&k=v` 형식의 쿼리 문자열로 직렬화합니다.
///
/// 값은 폼 URL 인코딩되며 순서는 입력 순서 그대로입니다.
pub fn encode_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| {
            let value: String = form_urlencoded::byte_serialize(v.as_bytes()).collect();
            format!("{}={}", k, value)
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// 현재 타임스탬프(밀리초) 반환.
pub fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// 서명이 완료된 1회용 요청.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    method: Method,
    path: &'static str,
    params: Params,
    timestamp: u64,
    signature: String,
    recv_window: u64,
}

impl SignedRequest {
    /// HTTP 메서드.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// 요청 경로.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// 서명 대상 파라미터 (마지막은 `timestamp`).
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// 이름으로 파라미터 값을 조회합니다.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// 서명 시점의 타임스탬프(밀리초).
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// hex 서명.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// 수신 윈도우(밀리초).
    pub fn recv_window(&self) -> u64 {
        self.recv_window
    }

    /// 서명 입력으로 사용된 정규 쿼리 문자열.
    pub fn query_string(&self) -> String {
        encode_query(&self.params)
    }

    /// 실제 전송되는 본문 (`<query>&signature=<hex>`).
    pub fn body(&self) -> String {
        format!("{}&signature={}", self.query_string(), self.signature)
    }
}

/// 주문 의도를 서명된 요청으로 변환합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestBuilder {
    recv_window: u64,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            recv_window: DEFAULT_RECV_WINDOW_MS,
        }
    }
}

impl RequestBuilder {
    /// 기본 수신 윈도우(60000ms)로 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 수신 윈도우 설정.
    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// 수신 윈도우 반환.
    pub fn recv_window(&self) -> u64 {
        self.recv_window
    }

    /// 의도를 검증하고 타임스탬프를 제외한 파라미터를 조립합니다.
    ///
    /// 순서: symbol, side, type, quantity, recvWindow,
    /// [price, stopPrice, timeInForce], [reduceOnly], [closePosition].
    pub fn assemble(&self, intent: &OrderIntent) -> ValidationResult<Params> {
        intent.validate()?;

        let mut params: Params = vec![
            ("symbol", intent.symbol.trim().to_uppercase()),
            ("side", intent.side.as_wire().to_string()),
            ("type", intent.order_type.as_wire().to_string()),
            ("quantity", intent.quantity.to_wire_string()),
            ("recvWindow", self.recv_window.to_string()),
        ];

        match (intent.order_type, intent.price, intent.stop_price) {
            (OrderType::Limit, Some(price), _) => {
                params.push(("price", price.to_wire_string()));
                params.push(("timeInForce", intent.time_in_force.as_wire().to_string()));
            }
            (OrderType::StopLimit, Some(price), Some(stop_price)) => {
                params.push(("price", price.to_wire_string()));
                params.push(("stopPrice", stop_price.to_wire_string()));
                params.push(("timeInForce", intent.time_in_force.as_wire().to_string()));
            }
            _ => {}
        }

        if intent.reduce_only {
            params.push(("reduceOnly", "true".to_string()));
        }
        if intent.close_position {
            params.push(("closePosition", "true".to_string()));
        }

        Ok(params)
    }

    /// 현재 시각으로 서명된 요청을 만듭니다.
    pub fn build(
        &self,
        intent: &OrderIntent,
        credentials: &ApiCredentials,
    ) -> ValidationResult<SignedRequest> {
        self.build_at(intent, credentials, timestamp_ms())
    }

    /// 지정한 타임스탬프로 서명된 요청을 만듭니다.
    pub fn build_at(
        &self,
        intent: &OrderIntent,
        credentials: &ApiCredentials,
        timestamp: u64,
    ) -> ValidationResult<SignedRequest> {
        let mut params = self.assemble(intent)?;
        params.push(("timestamp", timestamp.to_string()));

        let query = encode_query(&params);
        let signature = signer::sign(credentials.secret_bytes(), query.as_bytes());

        Ok(SignedRequest {
            method: Method::POST,
            path: ORDER_PATH,
            params,
            timestamp,
            signature,
            recv_window: self.recv_window,
        })
    }
}
