//! 인메모리 저장소.
//!
//! 테스트에서 PostgreSQL 대신 사용합니다. PostgreSQL 구현과 같은 규칙을 따릅니다:
//! ID는 1부터 증가하고, 삭제는 soft delete입니다.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bookstore_core::{Book, BookUpdate, NewBook, User};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{BookRepository, StoreError, UserRepository};

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, (T, Option<DateTime<Utc>>)>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn live(&self) -> impl Iterator<Item = &T> {
        self.rows
            .values()
            .filter(|(_, deleted_at)| deleted_at.is_none())
            .map(|(row, _)| row)
    }

    fn live_mut(&mut self, id: i64) -> Option<&mut (T, Option<DateTime<Utc>>)> {
        self.rows
            .get_mut(&id)
            .filter(|(_, deleted_at)| deleted_at.is_none())
    }
}

/// 인메모리 사용자 저장소.
#[derive(Default)]
pub struct MemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut table = self.table.write().await;
        // 유일성은 삭제된 행까지 포함
        if table.rows.values().any(|(u, _)| u.username == username) {
            return Err(StoreError::Duplicate(username.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: table.allocate_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(user.id, (user.clone(), None));
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let table = self.table.read().await;
        let user = table.live().find(|u| u.username == username).cloned();
        Ok(user)
    }
}

/// 인메모리 도서 저장소.
#[derive(Default)]
pub struct MemoryBookRepository {
    table: RwLock<Table<Book>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_id(&self, id: i64) -> Result<Book, StoreError> {
        let table = self.table.read().await;
        let book = table.live().find(|b| b.id == id).cloned();
        book.ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let table = self.table.read().await;
        let books: Vec<Book> = table.live().cloned().collect();
        Ok(books)
    }

    async fn create(&self, book: &NewBook) -> Result<Book, StoreError> {
        let mut table = self.table.write().await;
        let now = Utc::now();
        let record = Book {
            id: table.allocate_id(),
            name: book.name.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            price: book.price,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(record.id, (record.clone(), None));
        Ok(record)
    }

    async fn update(&self, update: &BookUpdate) -> Result<Book, StoreError> {
        let mut table = self.table.write().await;
        let (book, _) = table.live_mut(update.id).ok_or(StoreError::NotFound)?;

        book.name = update.name.clone();
        book.author = update.author.clone();
        if let Some(description) = &update.description {
            book.description = description.clone();
        }
        if let Some(price) = update.price {
            book.price = price;
        }
        book.updated_at = Utc::now();
        Ok(book.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        let (_, deleted_at) = table.live_mut(id).ok_or(StoreError::NotFound)?;
        *deleted_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(name: &str) -> NewBook {
        NewBook {
            name: name.to_string(),
            author: "Frank Herbert".to_string(),
            description: "desert planet".to_string(),
            price: 10,
        }
    }

    #[tokio::test]
    async fn test_book_ids_increase() {
        let repo = MemoryBookRepository::new();
        let a = repo.create(&new_book("Dune")).await.unwrap();
        let b = repo.create(&new_book("Dune Messiah")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_field_wise_update() {
        let repo = MemoryBookRepository::new();
        let book = repo.create(&new_book("Dune")).await.unwrap();

        let updated = repo
            .update(&BookUpdate {
                id: book.id,
                name: "Dune (2nd ed.)".to_string(),
                author: "F. Herbert".to_string(),
                description: None,
                price: Some(12),
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Dune (2nd ed.)");
        assert_eq!(updated.author, "F. Herbert");
        assert_eq!(updated.description, "desert planet");
        assert_eq!(updated.price, 12);
        assert_eq!(repo.find_by_id(book.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_row() {
        let repo = MemoryBookRepository::new();
        let book = repo.create(&new_book("Dune")).await.unwrap();

        repo.delete(book.id).await.unwrap();

        assert!(matches!(
            repo.find_by_id(book.id).await,
            Err(StoreError::NotFound)
        ));
        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(repo.delete(book.id).await, Err(StoreError::NotFound)));

        let update = BookUpdate {
            id: book.id,
            name: "x".to_string(),
            author: "y".to_string(),
            description: None,
            price: None,
        };
        assert!(matches!(
            repo.update(&update).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let repo = MemoryUserRepository::new();
        repo.create("alice", "hash").await.unwrap();

        assert!(matches!(
            repo.create("alice", "other").await,
            Err(StoreError::Duplicate(_))
        ));
        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "hash");
        assert!(repo.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleted_username_stays_reserved() {
        let repo = MemoryUserRepository::new();
        let user = repo.create("alice", "hash").await.unwrap();

        repo.table.write().await.rows.get_mut(&user.id).unwrap().1 = Some(Utc::now());
        assert!(repo.find_by_username("alice").await.unwrap().is_none());

        assert!(matches!(
            repo.create("alice", "other").await,
            Err(StoreError::Duplicate(_))
        ));
    }
}
