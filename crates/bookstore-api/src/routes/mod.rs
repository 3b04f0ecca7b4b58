//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/` - 인사 메시지
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/register`, `/login` - 회원가입/로그인
//! - `/books/*` - 도서 CRUD (인증 필요)

pub mod auth;
pub mod books;
pub mod health;

pub use auth::{auth_router, MSG_REGISTERED, MSG_UNKNOWN_USERNAME, MSG_WRONG_PASSWORD};
pub use books::{books_router, MSG_BOOK_DELETED};
pub use health::{health_router, DatabaseState, Readiness};

use axum::{middleware, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{require_auth, AuthGate};
use crate::state::AppState;

/// `{"message": ...}` 형태의 성공 응답.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// GET /
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello World!"))
}

/// 전체 API 라우터 생성.
///
/// `/books` 아래 라우트에만 `gate`가 적용됩니다.
pub fn create_api_router(gate: AuthGate) -> Router<Arc<AppState>> {
    let books = books_router().route_layer(middleware::from_fn_with_state(gate, require_auth));

    Router::new()
        .route("/", get(hello))
        .nest("/health", health_router())
        .merge(auth_router())
        .nest("/books", books)
}
