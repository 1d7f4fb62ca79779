//! 거래소가 접수한 주문 결과.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 요약 출력에 사용하는 응답 키 (출력 순서).
pub const SUMMARY_KEYS: [&str; 10] = [
    "symbol",
    "orderId",
    "clientOrderId",
    "transactTime",
    "price",
    "origQty",
    "executedQty",
    "status",
    "type",
    "side",
];

/// 성공(2xx) 응답에서만 생성되는 주문 결과.
///
/// 거래소가 보낸 값을 해석하지 않고 그대로 보존합니다.
/// 가격/수량은 거래소 문자열 그대로이며 상태도 재해석하지 않습니다.
/// 생성 후에는 읽기 전용입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResult {
    /// 거래 심볼
    symbol: String,
    /// 거래소 주문 ID
    order_id: i64,
    /// 클라이언트 주문 ID
    client_order_id: String,
    /// 거래 시각 (epoch 밀리초, 선물 응답에는 없을 수 있음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transact_time: Option<i64>,
    /// 주문 가격
    price: String,
    /// 원래 주문 수량
    orig_qty: String,
    /// 체결 수량
    executed_qty: String,
    /// 실행 상태 (예: NEW, FILLED)
    status: String,
    /// 주문 유형
    #[serde(rename = "type")]
    order_type: String,
    /// 주문 방향
    side: String,
    /// 원본 응답 JSON
    #[serde(skip)]
    raw: serde_json::Value,
}

impl OrderResult {
    /// 거래 심볼.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// 거래소 주문 ID.
    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    /// 클라이언트 주문 ID.
    pub fn client_order_id(&self) -> &str {
        &self.client_order_id
    }

    /// 거래 시각 (epoch 밀리초).
    pub fn transact_time(&self) -> Option<i64> {
        self.transact_time
    }

    /// 주문 가격 (거래소 문자열).
    pub fn price(&self) -> &str {
        &self.price
    }

    /// 원래 주문 수량.
    pub fn orig_qty(&self) -> &str {
        &self.orig_qty
    }

    /// 체결 수량.
    pub fn executed_qty(&self) -> &str {
        &self.executed_qty
    }

    /// 실행 상태 (예: NEW, FILLED).
    pub fn status(&self) -> &str {
        &self.status
    }

    /// 주문 유형 (거래소 표기, 예: STOP).
    pub fn order_type(&self) -> &str {
        &self.order_type
    }

    /// 주문 방향.
    pub fn side(&self) -> &str {
        &self.side
    }

    /// 응답 본문을 파싱합니다.
    ///
    /// 필수 필드가 없거나 타입이 다르면 에러를 반환합니다.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let raw: serde_json::Value = serde_json::from_str(body)?;
        let mut result: OrderResult = serde_json::from_value(raw.clone())?;
        result.raw = raw;
        Ok(result)
    }

    /// 원본 응답 JSON을 반환합니다.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// 원본 응답의 임의 필드를 조회합니다 (예: `updateTime`, `avgPrice`).
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.raw.get(key)
    }

    /// 거래 시각을 UTC로 변환합니다.
    pub fn transact_datetime(&self) -> Option<DateTime<Utc>> {
        self.transact_time.and_then(DateTime::from_timestamp_millis)
    }

    /// 요약 키 순서대로 (키, 값) 목록을 반환합니다. 응답에 없는 키는 건너뜁니다.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        SUMMARY_KEYS
            .iter()
            .filter_map(|&key| {
                self.raw.get(key).map(|value| {
                    let text = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (key, text)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILLED: &str = r#"{
        "symbol": "BTCUSDT",
        "orderId": 4027891,
        "clientOrderId": "web_abc123",
        "transactTime": 1700000000123,
        "price": "50000",
        "origQty": "0.010",
        "executedQty": "0.000",
        "status": "NEW",
        "type": "LIMIT",
        "side": "BUY",
        "timeInForce": "GTC",
        "reduceOnly": false
    }"#;

    #[test]
    fn test_parse_success_body() {
        let result = OrderResult::from_json(FILLED).unwrap();
        assert_eq!(result.symbol(), "BTCUSDT");
        assert_eq!(result.order_id(), 4027891);
        assert_eq!(result.client_order_id(), "web_abc123");
        assert_eq!(result.orig_qty(), "0.010");
        assert_eq!(result.order_type(), "LIMIT");
        assert_eq!(result.status(), "NEW");
        assert_eq!(
            result.field("timeInForce").and_then(|v| v.as_str()),
            Some("GTC")
        );
        assert_eq!(
            result.transact_datetime().map(|t| t.timestamp_millis()),
            Some(1700000000123)
        );
    }

    #[test]
    fn test_missing_required_field_is_error() {
        let body = r#"{"symbol":"BTCUSDT","status":"NEW"}"#;
        assert!(OrderResult::from_json(body).is_err());
        assert!(OrderResult::from_json("not json").is_err());
    }

    #[test]
    fn test_transact_time_optional() {
        let body = r#"{
            "symbol": "ETHUSDT", "orderId": 7, "clientOrderId": "x",
            "updateTime": 1700000000999, "price": "0", "origQty": "1",
            "executedQty": "0", "status": "NEW", "type": "MARKET", "side": "SELL"
        }"#;
        let result = OrderResult::from_json(body).unwrap();
        assert_eq!(result.transact_time(), None);
        assert!(result.transact_datetime().is_none());
        assert!(result.field("updateTime").is_some());
    }

    #[test]
    fn test_summary_order_and_skips() {
        let body = r#"{
            "side": "SELL", "type": "MARKET", "status": "FILLED",
            "executedQty": "1", "origQty": "1", "price": "0",
            "clientOrderId": "cid", "orderId": 42, "symbol": "ETHUSDT"
        }"#;
        let result = OrderResult::from_json(body).unwrap();
        let keys: Vec<&str> = result.summary().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "symbol",
                "orderId",
                "clientOrderId",
                "price",
                "origQty",
                "executedQty",
                "status",
                "type",
                "side"
            ]
        );
        assert_eq!(result.summary()[1], ("orderId", "42".to_string()));
        assert_eq!(result.summary()[0], ("symbol", "ETHUSDT".to_string()));
    }
}
