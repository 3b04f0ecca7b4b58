//! # Bookstore Core
//!
//! 도서 재고 서비스의 핵심 도메인 모델 및 공통 인프라를 제공합니다:
//! - 사용자/도서 모델과 요청 경계 검증
//! - 에러 분류 (검증, 인증, 저장소)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
