//! 도서 CRUD endpoint.
//!
//! 모든 라우트는 인증 게이트 뒤에 있습니다. 요청 본문은 [`BookPayload`] 하나로 디코딩되며
//! (`id`는 `ID`로도 받음), 검증에 실패한 요청은 저장소에 도달하지 않습니다.
//!
//! - `GET /books/detail` - 단건 조회
//! - `GET /books/list` - 전체 목록
//! - `POST /books/create` - 생성
//! - `PUT /books/update` - 수정
//! - `DELETE /books/delete` - 삭제 (soft delete)

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Json, Router,
};
use bookstore_core::{Book, BookPayload};
use tracing::{info, warn};

use super::MessageResponse;
use crate::error::{ApiJson, ApiResult};
use crate::metrics::record_book_operation;
use crate::repository::StoreError;
use crate::state::AppState;

/// 삭제 성공 메시지.
pub const MSG_BOOK_DELETED: &str = "delete book successful";

fn observe<T>(operation: &'static str, result: Result<T, StoreError>) -> ApiResult<T> {
    record_book_operation(operation, result.is_ok());
    result.map_err(|e| {
        warn!(operation, error = %e, "도서 저장소 작업 실패");
        e.into()
    })
}

/// 도서 상세 조회.
///
/// GET /books/detail
pub async fn book_detail(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> ApiResult<Json<Book>> {
    let id = payload.require_id()?;
    let book = observe("detail", state.books.find_by_id(id).await)?;
    Ok(Json(book))
}

/// 도서 목록 조회.
///
/// GET /books/list
pub async fn list_books(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Book>>> {
    let books = observe("list", state.books.list().await)?;
    Ok(Json(books))
}

/// 도서 생성.
///
/// POST /books/create
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> ApiResult<Json<Book>> {
    let new_book = payload.into_new_book()?;
    let book = observe("create", state.books.create(&new_book).await)?;
    info!(book_id = book.id, name = %book.name, "도서 생성");
    Ok(Json(book))
}

/// 도서 수정.
///
/// PUT /books/update
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> ApiResult<Json<Book>> {
    let update = payload.into_update()?;
    let book = observe("update", state.books.update(&update).await)?;
    info!(book_id = book.id, "도서 수정");
    Ok(Json(book))
}

/// 도서 삭제.
///
/// DELETE /books/delete
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> ApiResult<Json<MessageResponse>> {
    let id = payload.require_id()?;
    observe("delete", state.books.delete(id).await)?;
    info!(book_id = id, "도서 삭제");
    Ok(Json(MessageResponse::new(MSG_BOOK_DELETED)))
}

/// 도서 라우터 생성.
///
/// 인증 게이트는 [`create_api_router`](super::create_api_router)에서 붙습니다.
pub fn books_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/detail", get(book_detail))
        .route("/list", get(list_books))
        .route("/create", post(create_book))
        .route("/update", put(update_book))
        .route("/delete", delete(delete_book))
}
