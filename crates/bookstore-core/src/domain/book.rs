//! 도서 타입 및 경계 검증.
//!
//! - `Book` - 저장된 도서 레코드
//! - `BookPayload` - 요청 본문을 그대로 디코딩한 형태
//! - `NewBook` / `BookUpdate` - 검증을 통과한 생성/수정 입력
//!
//! 검증은 요청 경계에서만 수행됩니다. 검증에 실패한 요청은 저장소에 도달하지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BookstoreError, BookstoreResult};

/// 잘못된 도서 ID.
pub const MSG_INVALID_BOOK_ID: &str = "invalid request - please verify book id";
/// 도서 이름 누락.
pub const MSG_MISSING_BOOK_NAME: &str = "invalid request - please fill book name";
/// 저자 누락.
pub const MSG_MISSING_BOOK_AUTHOR: &str = "invalid request - please fill book author";
/// 음수 가격.
pub const MSG_NEGATIVE_PRICE: &str = "invalid request - book price must not be negative";

/// 저장된 도서 레코드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub description: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 도서 요청 본문.
///
/// 모든 도서 엔드포인트가 같은 형태를 디코딩하고, 엔드포인트마다 필요한 필드만 검사합니다.
/// 누락된 필드는 기본값(0, 빈 문자열, `None`)이 됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPayload {
    #[serde(default, alias = "ID")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
}

/// 검증된 도서 생성 입력.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub name: String,
    pub author: String,
    pub description: String,
    pub price: i64,
}

/// 검증된 도서 수정 입력.
///
/// `name`, `author`는 항상 덮어쓰고, `description`과 `price`는 값이 주어졌을 때만 바꿉니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookUpdate {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub description: Option<String>,
    pub price: Option<i64>,
}

impl BookPayload {
    /// 양수 ID를 요구합니다 (상세/수정/삭제).
    pub fn require_id(&self) -> BookstoreResult<i64> {
        if self.id <= 0 {
            return Err(BookstoreError::validation(MSG_INVALID_BOOK_ID));
        }
        Ok(self.id)
    }

    fn check_fields(&self) -> BookstoreResult<()> {
        if self.name.is_empty() {
            return Err(BookstoreError::validation(MSG_MISSING_BOOK_NAME));
        }
        if self.author.is_empty() {
            return Err(BookstoreError::validation(MSG_MISSING_BOOK_AUTHOR));
        }
        if matches!(self.price, Some(p) if p < 0) {
            return Err(BookstoreError::validation(MSG_NEGATIVE_PRICE));
        }
        Ok(())
    }

    /// 생성 입력으로 변환합니다. 본문의 `id`는 무시됩니다.
    pub fn into_new_book(self) -> BookstoreResult<NewBook> {
        self.check_fields()?;
        Ok(NewBook {
            name: self.name,
            author: self.author,
            description: self.description.unwrap_or_default(),
            price: self.price.unwrap_or(0),
        })
    }

    /// 수정 입력으로 변환합니다. ID 검사가 필드 검사보다 먼저 수행됩니다.
    pub fn into_update(self) -> BookstoreResult<BookUpdate> {
        let id = self.require_id()?;
        self.check_fields()?;
        Ok(BookUpdate {
            id,
            name: self.name,
            author: self.author,
            description: self.description,
            price: self.price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn payload(json: &str) -> BookPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_missing_fields_default() {
        let p = payload("{}");
        assert_eq!(p.id, 0);
        assert!(p.name.is_empty());
        assert!(p.description.is_none());
        assert!(p.price.is_none());
    }

    #[test]
    fn test_uppercase_id_alias() {
        assert_eq!(payload(r#"{"ID": 7}"#).id, 7);
        assert_eq!(payload(r#"{"id": 7}"#).id, 7);
    }

    #[test]
    fn test_require_id() {
        assert_eq!(payload(r#"{"id": 3}"#).require_id().unwrap(), 3);

        for json in [r#"{"id": 0}"#, r#"{"id": -1}"#, "{}"] {
            let err = payload(json).require_id().unwrap_err();
            assert_eq!(err.to_string(), MSG_INVALID_BOOK_ID);
        }
    }

    #[test]
    fn test_new_book_requires_name_then_author() {
        let err = payload(r#"{"name": "", "author": ""}"#)
            .into_new_book()
            .unwrap_err();
        assert_eq!(err.to_string(), MSG_MISSING_BOOK_NAME);

        let err = payload(r#"{"name": "Dune", "author": ""}"#)
            .into_new_book()
            .unwrap_err();
        assert_eq!(err.to_string(), MSG_MISSING_BOOK_AUTHOR);
    }

    #[test]
    fn test_new_book_defaults() {
        let book = payload(r#"{"name": "Dune", "author": "Herbert"}"#)
            .into_new_book()
            .unwrap();
        assert_eq!(book.description, "");
        assert_eq!(book.price, 0);
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = payload(r#"{"name": "Dune", "author": "Herbert", "price": -5}"#)
            .into_new_book()
            .unwrap_err();
        assert_eq!(err.to_string(), MSG_NEGATIVE_PRICE);
    }

    #[test]
    fn test_update_checks_id_first() {
        let err = payload(r#"{"id": 0, "name": ""}"#).into_update().unwrap_err();
        assert_eq!(err.to_string(), MSG_INVALID_BOOK_ID);

        let err = payload(r#"{"id": 1, "name": "", "author": "x"}"#)
            .into_update()
            .unwrap_err();
        assert_eq!(err.to_string(), MSG_MISSING_BOOK_NAME);
    }

    #[test]
    fn test_update_keeps_optional_fields_absent() {
        let update = payload(r#"{"id": 1, "name": "Dune", "author": "Herbert"}"#)
            .into_update()
            .unwrap();
        assert_eq!(update.id, 1);
        assert!(update.description.is_none());
        assert!(update.price.is_none());
    }

    proptest! {
        #[test]
        fn prop_non_empty_fields_accepted(
            name in ".{1,40}",
            author in ".{1,40}",
            price in 0i64..1_000_000,
        ) {
            let p = BookPayload {
                name: name.clone(),
                author: author.clone(),
                price: Some(price),
                ..Default::default()
            };
            let book = p.into_new_book().unwrap();
            prop_assert_eq!(book.name, name);
            prop_assert_eq!(book.author, author);
            prop_assert_eq!(book.price, price);
        }

        #[test]
        fn prop_non_positive_id_rejected(id in i64::MIN..=0) {
            let p = BookPayload { id, ..Default::default() };
            prop_assert!(p.require_id().is_err());
        }
    }
}
