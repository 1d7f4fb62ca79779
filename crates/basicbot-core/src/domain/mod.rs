//! 주문 제출을 위한 도메인 모델.

mod order;
mod order_result;

pub use order::*;
pub use order_result::*;
