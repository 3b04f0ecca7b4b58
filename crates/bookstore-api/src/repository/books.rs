//! Books Repository
//!
//! 도서 관련 데이터베이스 연산을 담당합니다.

use async_trait::async_trait;
use bookstore_core::{Book, BookUpdate, NewBook};
use sqlx::PgPool;

use super::{BookRepository, StoreError};

/// PostgreSQL 도서 저장소.
#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn find_by_id(&self, id: i64) -> Result<Book, StoreError> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT id, name, author, description, price, created_at, updated_at
            FROM books
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, name, author, description, price, created_at, updated_at
            FROM books
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn create(&self, book: &NewBook) -> Result<Book, StoreError> {
        let record = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (name, author, description, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, author, description, price, created_at, updated_at
            "#,
        )
        .bind(&book.name)
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update(&self, update: &BookUpdate) -> Result<Book, StoreError> {
        // description, price는 NULL이면 기존 값 유지
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET name = $2,
                author = $3,
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, author, description, price, created_at, updated_at
            "#,
        )
        .bind(update.id)
        .bind(&update.name)
        .bind(&update.author)
        .bind(&update.description)
        .bind(update.price)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE books SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
