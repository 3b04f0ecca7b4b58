//! 회원가입/로그인 endpoint.
//!
//! - `POST /register` - 사용자 등록
//! - `POST /login` - 자격증명 확인 후 bearer 토큰 발급

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use bookstore_core::Credentials;
use tracing::{debug, error, info, warn};

use super::MessageResponse;
use crate::auth::{hash_password_blocking, verify_password_blocking};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::metrics::{record_login, record_registration};
use crate::state::AppState;

/// 사용자 조회 실패 메시지.
pub const MSG_UNKNOWN_USERNAME: &str = "invalid username - please verify username";
/// 비밀번호 불일치 메시지.
pub const MSG_WRONG_PASSWORD: &str = "invalid password - please verify password";
/// 회원가입 성공 메시지.
pub const MSG_REGISTERED: &str = "Register user successful";

/// 사용자 등록.
///
/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<Json<MessageResponse>> {
    if let Err(e) = credentials.validate() {
        record_registration("invalid");
        return Err(e.into());
    }

    let Credentials { username, password } = credentials;

    let hash = hash_password_blocking(password).await.map_err(|e| {
        error!(error = %e, "비밀번호 해싱 실패");
        record_registration("error");
        ApiError::from(e)
    })?;

    match state.users.create(&username, &hash).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "사용자 등록 완료");
            record_registration("success");
            Ok(Json(MessageResponse::new(MSG_REGISTERED)))
        }
        Err(e) => {
            warn!(username = %username, error = %e, "사용자 등록 실패");
            record_registration("error");
            Err(e.into())
        }
    }
}

/// 로그인.
///
/// 성공하면 `{"message": "<token>"}`을 반환합니다.
/// 사용자가 없으면 500, 비밀번호가 틀리면 401입니다.
///
/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<Json<MessageResponse>> {
    if let Err(e) = credentials.validate() {
        record_login("invalid");
        return Err(e.into());
    }

    let Credentials { username, password } = credentials;

    let user = match state.users.find_by_username(&username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!(username = %username, "존재하지 않는 사용자");
            record_login("unknown_user");
            return Err(ApiError::internal(MSG_UNKNOWN_USERNAME));
        }
        Err(e) => {
            error!(username = %username, error = %e, "사용자 조회 실패");
            record_login("error");
            return Err(ApiError::internal(MSG_UNKNOWN_USERNAME));
        }
    };

    if !verify_password_blocking(password, user.password_hash.clone()).await {
        warn!(user_id = user.id, "비밀번호 불일치");
        record_login("bad_password");
        return Err(ApiError::unauthorized(MSG_WRONG_PASSWORD));
    }

    let token = state.token_issuer.issue_default(user.id).map_err(|e| {
        error!(user_id = user.id, error = %e, "토큰 발급 실패");
        record_login("error");
        ApiError::from(e)
    })?;

    info!(user_id = user.id, "로그인 성공");
    record_login("success");
    Ok(Json(MessageResponse::new(token)))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
