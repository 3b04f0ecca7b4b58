//! 인증 게이트 미들웨어.
//!
//! 보호된 라우트 앞에서 bearer 토큰을 검증하고 접근 정책을 적용합니다.
//! 실패하면 핸들러를 실행하지 않고 401을 반환합니다.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use super::{AccessPolicy, Claims, JwtError, PolicyError, TokenIssuer};
use crate::error::ApiError;
use crate::metrics::record_auth_rejection;

/// 토큰 검증 실패 메시지.
pub const MSG_INVALID_TOKEN: &str = "invalid token or expired";

/// 게이트를 통과한 요청의 검증된 Claims.
///
/// 요청 extension으로 삽입되며 핸들러에서 `Extension<AuthenticatedUser>`로 꺼낼 수 있습니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

/// 게이트 거부 사유.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{}", MSG_INVALID_TOKEN)]
    InvalidToken(JwtError),
    #[error("{0}")]
    Policy(#[from] PolicyError),
}

impl AuthError {
    fn metric_reason(&self) -> &'static str {
        match self {
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::Policy(_) => "role_not_permitted",
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        AuthError::InvalidToken(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::unauthorized(self.to_string()).into_response()
    }
}

/// 토큰 검증기와 접근 정책.
#[derive(Clone)]
pub struct AuthGate {
    issuer: Arc<TokenIssuer>,
    policy: Arc<dyn AccessPolicy>,
}

impl AuthGate {
    pub fn new(issuer: Arc<TokenIssuer>, policy: Arc<dyn AccessPolicy>) -> Self {
        Self { issuer, policy }
    }

    /// 토큰을 검증하고 정책을 적용합니다.
    pub fn check(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.issuer.verify(token)?;
        self.policy.authorize(&claims)?;
        Ok(claims)
    }
}

/// `Authorization` 헤더에서 토큰 부분을 꺼냅니다.
///
/// 헤더가 없거나 UTF-8이 아니면 빈 문자열입니다.
/// `"Bearer "` 접두사가 없으면 헤더 값 전체를 토큰으로 취급합니다.
pub fn bearer_token(headers: &HeaderMap) -> &str {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    value.strip_prefix("Bearer ").unwrap_or(value)
}

/// 인증 게이트 미들웨어.
///
/// ```rust,ignore
/// Router::new()
///     .route("/list", get(list_books))
///     .route_layer(middleware::from_fn_with_state(gate, require_auth))
/// ```
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let result = gate.check(bearer_token(request.headers()));

    match result {
        Ok(claims) => {
            debug!(user_id = ?claims.subject_id(), role = %claims.role, "요청 인증됨");
            request.extensions_mut().insert(AuthenticatedUser(claims));
            next.run(request).await
        }
        Err(err) => {
            match &err {
                AuthError::InvalidToken(cause) => {
                    debug!(path = %request.uri().path(), error = %cause, "토큰 검증 실패");
                }
                AuthError::Policy(PolicyError::RoleNotPermitted { role }) => {
                    warn!(path = %request.uri().path(), role = %role, "허용되지 않은 역할");
                }
            }
            record_auth_rejection(err.metric_reason());
            err.into_response()
        }
    }
}
