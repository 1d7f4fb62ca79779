//! 주문 제출 명령.
//!
//! 명령줄 인자를 주문 의도로 변환하고, 제출 결과를 요약해 출력합니다.

use anyhow::{bail, Result};
use basicbot_core::{
    ApiCredentials, BotConfig, OrderIntent, OrderResult, TimeInForce, ValidationResult,
};
use basicbot_exchange::{ClientConfig, FuturesClient};
use clap::Args;
use rust_decimal::Decimal;
use secrecy::SecretString;

/// 주문 인자.
#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// 거래 심볼 (예: BTCUSDT)
    #[arg(long)]
    pub symbol: String,

    /// 주문 방향 (BUY, SELL)
    #[arg(long)]
    pub side: String,

    /// 주문 유형 (MARKET, LIMIT, STOP_LIMIT)
    #[arg(long = "type")]
    pub order_type: String,

    /// 주문 수량 (계약 기초자산 단위)
    #[arg(long)]
    pub quantity: Decimal,

    /// 지정가 (LIMIT, STOP_LIMIT 필수)
    #[arg(long)]
    pub price: Option<Decimal>,

    /// 스톱 트리거 가격 (STOP_LIMIT 필수)
    #[arg(long)]
    pub stop_price: Option<Decimal>,

    /// 유효 기간 (GTC, IOC, FOK)
    #[arg(long, default_value = "GTC")]
    pub time_in_force: String,

    /// reduceOnly 플래그 설정
    #[arg(long)]
    pub reduce_only: bool,

    /// closePosition 플래그 설정
    #[arg(long)]
    pub close_position: bool,
}

impl OrderArgs {
    /// 주문 의도로 변환합니다. 방향, 유형, 유효 기간 순으로 파싱합니다.
    pub fn to_intent(&self) -> ValidationResult<OrderIntent> {
        let mut intent =
            OrderIntent::parse(&self.symbol, &self.side, &self.order_type, self.quantity)?
                .with_time_in_force(self.time_in_force.parse::<TimeInForce>()?)
                .with_reduce_only(self.reduce_only)
                .with_close_position(self.close_position);

        intent.price = self.price;
        intent.stop_price = self.stop_price;
        Ok(intent)
    }
}

/// 연결 인자. 생략하면 설정 파일과 환경 변수 값을 사용합니다.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// API 키 (기본: BINANCE_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// API 시크릿 (기본: BINANCE_API_SECRET)
    #[arg(long)]
    pub api_secret: Option<String>,

    /// REST API 기본 URL (기본: 테스트넷)
    #[arg(long)]
    pub base_url: Option<String>,
}

impl ConnectionArgs {
    /// 인자 우선, 없으면 설정에서 자격증명을 가져옵니다.
    pub fn credentials(&self, config: &BotConfig) -> Result<ApiCredentials> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| config.exchange.api_key.clone());
        let api_secret = self
            .api_secret
            .clone()
            .map(SecretString::from)
            .or_else(|| config.exchange.api_secret.clone());

        match (api_key, api_secret) {
            (Some(key), Some(secret)) => Ok(ApiCredentials::from_secret(key, secret)),
            _ => bail!(
                "API key and secret are required (--api-key/--api-secret or BINANCE_API_KEY/BINANCE_API_SECRET)"
            ),
        }
    }

    /// 인자 우선으로 클라이언트 설정을 만듭니다.
    pub fn client_config(&self, config: &BotConfig) -> ClientConfig {
        let mut client_config = ClientConfig::from_settings(&config.exchange);
        if let Some(base_url) = &self.base_url {
            client_config.base_url = base_url.clone();
        }
        client_config
    }
}

/// 주문을 제출하고 결과를 반환합니다.
pub async fn place_order(
    connection: &ConnectionArgs,
    order: &OrderArgs,
    config: &BotConfig,
) -> Result<OrderResult> {
    let intent = order.to_intent()?;
    let credentials = connection.credentials(config)?;
    let client = FuturesClient::new(credentials, connection.client_config(config))?;

    Ok(client.place_order(&intent).await?)
}

/// 주문 응답 요약을 출력용 문자열로 만듭니다.
pub fn render_summary(result: &OrderResult) -> String {
    let mut out = String::from("\nORDER RESPONSE SUMMARY:\n");
    for (key, value) in result.summary() {
        out.push_str(&format!("  {:15} : {}\n", key, value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use basicbot_core::{OrderType, Side, ValidationError};
    use rust_decimal_macros::dec;

    fn args(side: &str, order_type: &str) -> OrderArgs {
        OrderArgs {
            symbol: "btcusdt".to_string(),
            side: side.to_string(),
            order_type: order_type.to_string(),
            quantity: dec!(0.01),
            price: None,
            stop_price: None,
            time_in_force: "GTC".to_string(),
            reduce_only: false,
            close_position: false,
        }
    }

    #[test]
    fn test_args_to_limit_intent() {
        let mut order = args("buy", "LIMIT");
        order.price = Some(dec!(50000));
        order.time_in_force = "ioc".to_string();
        order.reduce_only = true;

        let intent = order.to_intent().unwrap();
        assert_eq!(intent.symbol, "BTCUSDT");
        assert_eq!(intent.side, Side::Buy);
        assert_eq!(intent.order_type, OrderType::Limit);
        assert_eq!(intent.price, Some(dec!(50000)));
        assert_eq!(intent.time_in_force, TimeInForce::IOC);
        assert!(intent.reduce_only);
        assert!(!intent.close_position);
    }

    #[test]
    fn test_args_parse_side_before_type() {
        let err = args("HOLD", "TRAILING").to_intent().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSide(_)));

        let err = args("SELL", "TRAILING").to_intent().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOrderType(_)));
    }

    #[test]
    fn test_args_invalid_time_in_force() {
        let mut order = args("SELL", "MARKET");
        order.time_in_force = "GTD".to_string();
        assert!(matches!(
            order.to_intent(),
            Err(ValidationError::InvalidTimeInForce(_))
        ));
    }

    #[test]
    fn test_flag_credentials_take_precedence() {
        let connection = ConnectionArgs {
            api_key: Some("flag-key".to_string()),
            api_secret: Some("flag-secret".to_string()),
            base_url: None,
        };
        let mut config = BotConfig::default();
        config.exchange.api_key = Some("config-key".to_string());
        config.exchange.api_secret = Some("config-secret".to_string().into());

        let credentials = connection.credentials(&config).unwrap();
        assert_eq!(credentials.api_key(), "flag-key");
        assert_eq!(credentials.secret_bytes(), b"flag-secret");
    }

    #[test]
    fn test_credentials_fall_back_to_config() {
        let mut config = BotConfig::default();
        config.exchange.api_key = Some("config-key".to_string());
        config.exchange.api_secret = Some("config-secret".to_string().into());

        let credentials = ConnectionArgs::default().credentials(&config).unwrap();
        assert_eq!(credentials.api_key(), "config-key");
        assert_eq!(credentials.secret_bytes(), b"config-secret");
    }

    #[test]
    fn test_missing_credentials_is_error() {
        let connection = ConnectionArgs {
            api_key: Some("flag-key".to_string()),
            ..Default::default()
        };
        assert!(connection.credentials(&BotConfig::default()).is_err());
    }

    #[test]
    fn test_base_url_flag_overrides_config() {
        let connection = ConnectionArgs {
            base_url: Some("https://fapi.binance.com".to_string()),
            ..Default::default()
        };
        let config = connection.client_config(&BotConfig::default());
        assert_eq!(config.base_url, "https://fapi.binance.com");
        assert_eq!(config.recv_window, 60_000);
    }

    #[test]
    fn test_render_summary_key_order() {
        let body = r#"{"side":"BUY","type":"LIMIT","status":"NEW","orderId":7,
            "symbol":"BTCUSDT","clientOrderId":"abc","price":"50000",
            "origQty":"0.01","executedQty":"0","updateTime":1}"#;
        let result = OrderResult::from_json(body).unwrap();
        let rendered = render_summary(&result);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "ORDER RESPONSE SUMMARY:");
        assert_eq!(lines[2], "  symbol          : BTCUSDT");
        assert_eq!(lines[3], "  orderId         : 7");
        assert!(lines.last().unwrap().starts_with("  side"));
        assert!(!rendered.contains("transactTime"));
        assert!(!rendered.contains("updateTime"));
    }
}
