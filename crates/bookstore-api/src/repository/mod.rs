//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 핸들러는 트레이트 객체(`Arc<dyn UserRepository>`, `Arc<dyn BookRepository>`)만 보며,
//! 운영 환경에서는 PostgreSQL 구현을, 테스트에서는 인메모리 구현을 주입합니다.

use async_trait::async_trait;
use bookstore_core::{Book, BookUpdate, NewBook, User};

mod books;
#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod users;

pub use books::PgBookRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{MemoryBookRepository, MemoryUserRepository};
pub use users::PgUserRepository;

/// 저장소 에러.
///
/// 조회 실패와 영속화 실패는 API 응답에서 구분하지 않습니다 (모두 500).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 대상 레코드가 없거나 이미 삭제됨
    #[error("record not found")]
    NotFound,

    /// 유일성 제약 위반
    #[error("duplicate key value: {0}")]
    Duplicate(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// sqlx 에러를 분류합니다. 유일성 위반은 `Duplicate`가 됩니다.
    pub(crate) fn classify(err: sqlx::Error, what: &str) -> Self {
        let unique = err
            .as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false);
        if unique {
            StoreError::Duplicate(what.to_string())
        } else {
            StoreError::Database(err)
        }
    }
}

/// 사용자 저장소.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 새 사용자 저장. 이미 존재하는 이름이면 `Duplicate`.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    /// 이름으로 사용자 조회.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// 도서 저장소.
///
/// 삭제는 soft delete이며, 삭제된 레코드는 조회/수정/삭제 대상이 아닙니다.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// ID로 도서 조회. 없으면 `NotFound`.
    async fn find_by_id(&self, id: i64) -> Result<Book, StoreError>;

    /// 전체 도서 목록 (ID 오름차순).
    async fn list(&self) -> Result<Vec<Book>, StoreError>;

    /// 도서 생성 후 생성된 ID를 포함한 레코드 반환.
    async fn create(&self, book: &NewBook) -> Result<Book, StoreError>;

    /// 필드 단위 수정 후 저장된 레코드 반환. 없으면 `NotFound`.
    async fn update(&self, update: &BookUpdate) -> Result<Book, StoreError>;

    /// soft delete. 없으면 `NotFound`.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
