//! 정밀한 가격/수량 표현을 위한 Decimal 유틸리티.

use rust_decimal::Decimal;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 주문 수량을 위한 타입.
pub type Quantity = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 0보다 큰지 확인합니다.
    fn is_strictly_positive(&self) -> bool;

    /// 거래소 전송용 문자열로 변환합니다.
    ///
    /// 후행 0을 제거한 일반 소수 표기 (예: `0.0100` -> `0.01`, `50000.0` -> `50000`).
    fn to_wire_string(&self) -> String;
}

impl DecimalExt for Decimal {
    fn is_strictly_positive(&self) -> bool {
        *self > Decimal::ZERO
    }

    fn to_wire_string(&self) -> String {
        self.normalize().to_string()
    }
}
