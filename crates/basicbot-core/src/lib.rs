//! # Basicbot Core
//!
//! 선물 주문 봇의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 주문 의도 및 주문 결과 타입
//! - 주문 검증 에러
//! - 자격증명 보관
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use credentials::ApiCredentials;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
