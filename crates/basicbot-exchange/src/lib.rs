//! Binance USDT-M 선물 주문 제출.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - HMAC-SHA256 요청 서명
//! - 주문 의도 검증 및 파라미터 조립
//! - 교체 가능한 HTTP 전송 계층
//! - 서명된 주문 제출 클라이언트

pub mod connector;
pub mod error;
pub mod request;
pub mod signer;
pub mod transport;

pub use connector::{ClientConfig, FuturesClient};
pub use error::*;
pub use request::{encode_query, RequestBuilder, SignedRequest, ORDER_PATH};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
