//! 도서 재고 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (회원가입/로그인, 도서 CRUD)
//! - JWT 인증 및 접근 정책
//! - PostgreSQL 저장소
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 비밀번호 해싱, 토큰 발급/검증, 인증 게이트
//! - [`repository`]: 사용자/도서 저장소
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어

pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{
    hash_password, require_auth, verify_password, AccessPolicy, AuthGate, AuthenticatedUser,
    Claims, RequireRole, TokenIssuer,
};
pub use error::{ApiError, ApiErrorResponse, ApiJson, ApiResult};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use repository::{BookRepository, StoreError, UserRepository};
pub use routes::*;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
