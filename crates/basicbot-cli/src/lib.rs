//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 명령줄 인자 → 주문 의도 변환
//! - 설정/환경 변수 기반 자격증명 해석
//! - 주문 응답 요약 출력

pub mod commands;

pub use commands::place_order::{place_order, render_summary, ConnectionArgs, OrderArgs};
