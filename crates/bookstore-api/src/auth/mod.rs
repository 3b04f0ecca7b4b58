//! 인증 및 권한 부여.
//!
//! # 구성 요소
//!
//! - [`hash_password`] / [`verify_password`]: Argon2id 비밀번호 해싱
//! - [`TokenIssuer`]: HS256 토큰 발급 및 검증
//! - [`AccessPolicy`]: 검증된 [`Claims`]의 허용 여부 결정
//! - [`require_auth`]: 보호된 라우트 앞에 붙는 인증 게이트
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let gate = AuthGate::new(issuer, Arc::new(RequireRole::new("admin")));
//! let router = Router::new()
//!     .route("/list", get(list_books))
//!     .route_layer(middleware::from_fn_with_state(gate, require_auth));
//! ```

mod jwt;
mod middleware;
mod password;
mod policy;

pub use jwt::{Claims, JwtError, TokenIssuer};
pub use middleware::{
    bearer_token, require_auth, AuthError, AuthGate, AuthenticatedUser, MSG_INVALID_TOKEN,
};
pub use password::{
    hash_password, hash_password_blocking, verify_password, verify_password_blocking,
    PasswordError,
};
pub use policy::{AccessPolicy, PolicyError, RequireAnyRole, RequireRole};
