//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유되며, 시작 후에는 변경되지 않습니다.

use std::sync::Arc;

use bookstore_core::AuthConfig;
use sqlx::PgPool;

use crate::auth::{AccessPolicy, AuthGate, RequireRole, TokenIssuer};
use crate::repository::{BookRepository, PgBookRepository, PgUserRepository, UserRepository};

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 사용자 저장소
    pub users: Arc<dyn UserRepository>,

    /// 도서 저장소
    pub books: Arc<dyn BookRepository>,

    /// 토큰 발급기/검증기
    pub token_issuer: Arc<TokenIssuer>,

    /// 보호된 라우트의 접근 정책
    pub access_policy: Arc<dyn AccessPolicy>,

    /// 데이터베이스 연결 풀 (readiness 확인용)
    pub db_pool: Option<PgPool>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 저장소와 인증 구성요소로 AppState 생성.
    pub fn new(
        users: Arc<dyn UserRepository>,
        books: Arc<dyn BookRepository>,
        token_issuer: Arc<TokenIssuer>,
        access_policy: Arc<dyn AccessPolicy>,
    ) -> Self {
        Self {
            users,
            books,
            token_issuer,
            access_policy,
            db_pool: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// PostgreSQL 풀과 인증 설정으로 운영용 상태 생성.
    ///
    /// 접근 정책은 `auth.required_role`을 요구하는 [`RequireRole`]입니다.
    pub fn from_pool(pool: PgPool, auth: &AuthConfig) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgBookRepository::new(pool.clone())),
            Arc::new(TokenIssuer::new(auth)),
            Arc::new(RequireRole::new(auth.required_role.clone())),
        )
        .with_db_pool(pool)
    }

    /// 데이터베이스 연결 설정.
    pub fn with_db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// 보호된 라우트용 인증 게이트.
    pub fn auth_gate(&self) -> AuthGate {
        AuthGate::new(self.token_issuer.clone(), self.access_policy.clone())
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

/// 테스트용 AppState 생성.
///
/// 인메모리 저장소와 고정 비밀 키를 사용합니다. 기본 역할과 요구 역할은 모두 "admin"입니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use crate::repository::{MemoryBookRepository, MemoryUserRepository};

    let auth = AuthConfig::with_secret("test-secret-key-for-bookstore-minimum-32-chars");

    AppState::new(
        Arc::new(MemoryUserRepository::new()),
        Arc::new(MemoryBookRepository::new()),
        Arc::new(TokenIssuer::new(&auth)),
        Arc::new(RequireRole::new(auth.required_role.clone())),
    )
}
