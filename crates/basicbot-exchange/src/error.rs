//! 주문 제출 에러 타입.

use basicbot_core::ValidationError;
use serde::Deserialize;
use thiserror::Error;

/// 전송 계층 에러 (응답을 받지 못함).
#[derive(Debug, Error)]
pub enum TransportError {
    /// 요청 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    Network(String),

    /// 요청 구성 에러 (잘못된 URL 등)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_builder() {
            TransportError::InvalidRequest(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// 주문 제출 에러.
///
/// 호출자가 실패 유형별로 분기할 수 있도록 네 가지로 구분합니다.
#[derive(Debug, Error)]
pub enum OrderError {
    /// 로컬 검증 실패 (네트워크 요청 없음)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 전송 실패 (응답 없음, 주문 여부 불명)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// 거래소가 요청을 거부함 (비 2xx)
    #[error("Exchange error (HTTP {status}): {body}")]
    Exchange { status: u16, body: String },

    /// 2xx 응답이 예상 형식과 다름
    #[error("Protocol error: {reason}")]
    Protocol { body: String, reason: String },
}

/// 주문 제출 Result 타입.
pub type PlaceOrderResult<T> = Result<T, OrderError>;

/// 거래소 에러 응답 본문 (`{"code":-1100,"msg":"..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// 거래소 에러 코드
    pub code: i64,
    /// 에러 메시지
    pub msg: String,
}

impl OrderError {
    /// 요청이 전송되었을 수 있어 주문 결과를 알 수 없는지 확인.
    ///
    /// 이 경우 "주문 실패"가 아니라 "결과 불명"으로 다뤄야 합니다.
    /// 요청 구성 에러는 전송 전에 실패한 것이므로 제외합니다.
    pub fn is_outcome_unknown(&self) -> bool {
        matches!(
            self,
            OrderError::Transport(TransportError::Timeout(_) | TransportError::Network(_))
        )
    }

    /// 거래소에 도달하기 전에 실패했는지 확인.
    pub fn is_local(&self) -> bool {
        matches!(self, OrderError::Validation(_))
    }

    /// HTTP 상태 코드 (거래소 응답이 있는 경우).
    pub fn status(&self) -> Option<u16> {
        match self {
            OrderError::Exchange { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 거래소 에러 본문을 파싱합니다. 에러 유형은 바뀌지 않습니다.
    pub fn exchange_code(&self) -> Option<ApiErrorBody> {
        match self {
            OrderError::Exchange { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}
