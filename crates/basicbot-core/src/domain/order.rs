//! 주문 의도 타입 및 검증.
//!
//! 이 모듈은 주문 제출 전 단계의 타입을 정의합니다:
//! - `Side` - 주문 방향 (매수/매도)
//! - `OrderType` - 주문 유형 (시장가, 지정가, 스톱 지정가)
//! - `TimeInForce` - 주문 유효 기간
//! - `OrderIntent` - 검증 전 호출자의 주문 의도

use crate::error::{ValidationError, ValidationResult};
use crate::types::{DecimalExt, Price, Quantity};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 주문 방향 (매수 또는 매도).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// 매수
    Buy,
    /// 매도
    Sell,
}

impl Side {
    /// 거래소 전송 값.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(ValidationError::InvalidSide(s.to_string())),
        }
    }
}

/// 주문 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// 시장가 주문 - 현재 시장 가격으로 즉시 체결
    Market,
    /// 지정가 주문 - 양수 가격 필수
    Limit,
    /// 스톱 지정가 주문 - 스톱 가격 도달 시 지정가 주문으로 전환
    StopLimit,
}

impl OrderType {
    /// 거래소 전송 값.
    ///
    /// 선물 API에서 스톱 지정가 주문의 유형 이름은 `STOP`입니다.
    pub fn as_wire(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::StopLimit => "STOP",
        }
    }

    /// 이 유형이 가격과 유효 기간을 사용하는지 확인합니다.
    pub fn is_priced(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::StopLimit)
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::StopLimit => write!(f, "STOP_LIMIT"),
        }
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP_LIMIT" => Ok(OrderType::StopLimit),
            _ => Err(ValidationError::InvalidOrderType(s.to_string())),
        }
    }
}

/// 주문 유효 기간.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// 취소될 때까지 유효 (Good Till Cancelled)
    #[default]
    GTC,
    /// 즉시 체결 또는 취소 (Immediate Or Cancel)
    IOC,
    /// 전량 체결 또는 취소 (Fill Or Kill)
    FOK,
}

impl TimeInForce {
    /// 거래소 전송 값.
    pub fn as_wire(&self) -> &'static str {
        match self {
            TimeInForce::GTC => "GTC",
            TimeInForce::IOC => "IOC",
            TimeInForce::FOK => "FOK",
        }
    }
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for TimeInForce {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GTC" => Ok(TimeInForce::GTC),
            "IOC" => Ok(TimeInForce::IOC),
            "FOK" => Ok(TimeInForce::FOK),
            _ => Err(ValidationError::InvalidTimeInForce(s.to_string())),
        }
    }
}

/// 호출자의 주문 의도.
///
/// 호출마다 새로 만들어지고 요청 빌더에 빌려준 뒤 버려집니다.
/// 검증은 `&self`만 읽으며 값을 바꾸지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// 거래 심볼 (대문자, 예: "BTCUSDT")
    pub symbol: String,
    /// 주문 방향
    pub side: Side,
    /// 주문 유형
    pub order_type: OrderType,
    /// 주문 수량
    pub quantity: Quantity,
    /// 지정가 (LIMIT, STOP_LIMIT 필수)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    /// 스톱 가격 (STOP_LIMIT 필수)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Price>,
    /// 주문 유효 기간 (LIMIT, STOP_LIMIT에만 적용)
    #[serde(default)]
    pub time_in_force: TimeInForce,
    /// 포지션 축소 전용
    #[serde(default)]
    pub reduce_only: bool,
    /// 전체 포지션 청산
    #[serde(default)]
    pub close_position: bool,
}

impl OrderIntent {
    /// 새 주문 의도를 생성합니다. 심볼은 대문자로 정규화됩니다.
    pub fn new(
        symbol: impl AsRef<str>,
        side: Side,
        order_type: OrderType,
        quantity: Quantity,
    ) -> Self {
        Self {
            symbol: symbol.as_ref().trim().to_uppercase(),
            side,
            order_type,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: TimeInForce::default(),
            reduce_only: false,
            close_position: false,
        }
    }

    /// 문자열 입력에서 주문 의도를 생성합니다.
    ///
    /// 방향, 유형 순서로 파싱한 뒤 나머지 규칙을 `validate`로 확인합니다.
    pub fn parse(
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: Quantity,
    ) -> ValidationResult<Self> {
        let side = side.parse::<Side>()?;
        let order_type = order_type.parse::<OrderType>()?;
        Ok(Self::new(symbol, side, order_type, quantity))
    }

    /// 시장가 주문을 생성합니다.
    pub fn market(symbol: impl AsRef<str>, side: Side, quantity: Quantity) -> Self {
        Self::new(symbol, side, OrderType::Market, quantity)
    }

    /// 지정가 주문을 생성합니다.
    pub fn limit(symbol: impl AsRef<str>, side: Side, quantity: Quantity, price: Price) -> Self {
        Self::new(symbol, side, OrderType::Limit, quantity).with_price(price)
    }

    /// 스톱 지정가 주문을 생성합니다.
    pub fn stop_limit(
        symbol: impl AsRef<str>,
        side: Side,
        quantity: Quantity,
        price: Price,
        stop_price: Price,
    ) -> Self {
        Self::new(symbol, side, OrderType::StopLimit, quantity)
            .with_price(price)
            .with_stop_price(stop_price)
    }

    /// 지정가를 설정합니다.
    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    /// 스톱 가격을 설정합니다.
    pub fn with_stop_price(mut self, stop_price: Price) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// 주문 유효 기간을 설정합니다.
    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    /// 포지션 축소 전용 플래그를 설정합니다.
    pub fn with_reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    /// 포지션 청산 플래그를 설정합니다.
    pub fn with_close_position(mut self, close_position: bool) -> Self {
        self.close_position = close_position;
        self
    }

    /// 주문 유형별 규칙을 검사합니다.
    ///
    /// 순서: 수량 > 지정가 가격 > 스톱 지정가 파라미터 > 심볼.
    /// 방향과 유형은 타입으로 이미 보장되며 문자열 입력은 `parse`에서 걸러집니다.
    /// STOP_LIMIT의 가격은 존재 여부만 검사합니다 (양수 여부는 검사하지 않음).
    pub fn validate(&self) -> ValidationResult<()> {
        if !self.quantity.is_strictly_positive() {
            return Err(ValidationError::InvalidQuantity(self.quantity.to_string()));
        }

        match self.order_type {
            OrderType::Market => {}
            OrderType::Limit => match self.price {
                Some(price) if price.is_strictly_positive() => {}
                _ => return Err(ValidationError::MissingPrice),
            },
            OrderType::StopLimit => {
                if self.stop_price.is_none() || self.price.is_none() {
                    return Err(ValidationError::MissingStopParams);
                }
            }
        }

        if self.symbol.trim().is_empty() {
            return Err(ValidationError::InvalidSymbol);
        }

        Ok(())
    }
}
