//! 주문 검증 에러 타입.
//!
//! 네트워크에 도달하기 전에 로컬에서 판정되는 에러만 정의합니다.

use thiserror::Error;

/// 주문 의도 검증 실패.
///
/// 검증은 정해진 순서대로 수행되며 처음 실패한 규칙 하나만 보고됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 매수/매도 이외의 방향
    #[error("side must be BUY or SELL, got {0:?}")]
    InvalidSide(String),

    /// 지원하지 않는 주문 유형
    #[error("order type must be MARKET, LIMIT, or STOP_LIMIT, got {0:?}")]
    InvalidOrderType(String),

    /// 수량이 0 이하
    #[error("quantity must be > 0, got {0}")]
    InvalidQuantity(String),

    /// 지정가 주문에 양수 가격이 없음
    #[error("LIMIT orders require a positive price")]
    MissingPrice,

    /// 스톱 지정가 주문에 가격 또는 스톱 가격이 없음
    #[error("STOP_LIMIT requires both stop price and price")]
    MissingStopParams,

    /// 빈 심볼
    #[error("symbol must not be empty")]
    InvalidSymbol,

    /// 지원하지 않는 주문 유효 기간
    #[error("time in force must be GTC, IOC, or FOK, got {0:?}")]
    InvalidTimeInForce(String),
}

/// 검증 결과 타입.
pub type ValidationResult<T> = Result<T, ValidationError>;
