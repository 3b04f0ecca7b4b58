//! JWT 토큰 발급 및 검증.
//!
//! HS256 서명 토큰을 발급하고, 서명과 만료 시각을 검증합니다.
//! 역할(role)은 자유 문자열이며, 어떤 역할을 허용할지는 [`AccessPolicy`](super::AccessPolicy)가 결정합니다.

use bookstore_core::AuthConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// JWT 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// 사용자 역할
    pub role: String,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `subject` - 사용자 ID
    /// * `role` - 사용자 역할
    /// * `ttl` - 유효 기간 (`exp = now + ttl`)
    pub fn new(subject: impl Into<String>, role: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            role: role.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Some(uuid::Uuid::new_v4().to_string()),
        }
    }

    /// 숫자 사용자 ID로 해석한 subject.
    pub fn subject_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// JWT 처리 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtError {
    #[error("token encoding failed: {0}")]
    Encoding(String),
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// 토큰 발급기/검증기.
///
/// 서명 키는 생성 시 한 번만 만들어지며 이후 읽기 전용입니다.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_role: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// 인증 설정에서 발급기 생성.
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_secret(
            config.jwt_secret.expose_secret().as_bytes(),
            config.default_role.clone(),
            config.token_ttl(),
        )
    }

    /// 비밀 키, 기본 역할, 유효 기간으로 발급기 생성.
    pub fn from_secret(secret: &[u8], default_role: impl Into<String>, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            default_role: default_role.into(),
            ttl,
        }
    }

    /// 기본 유효 기간.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 로그인 시 발급되는 역할.
    pub fn default_role(&self) -> &str {
        &self.default_role
    }

    /// 토큰 발급.
    ///
    /// `{sub, role, iat, exp = now + ttl, jti}`를 HS256으로 서명한 문자열을 반환합니다.
    pub fn issue(
        &self,
        subject_id: impl ToString,
        role: &str,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject_id.to_string(), role, ttl);
        self.encode_claims(&claims)
    }

    /// 기본 역할과 기본 유효 기간으로 토큰 발급.
    pub fn issue_default(&self, subject_id: impl ToString) -> Result<String, JwtError> {
        self.issue(subject_id, &self.default_role, self.ttl)
    }

    /// 임의의 Claims 서명.
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::Encoding(e.to_string()))
    }

    /// 토큰 디코딩 및 검증.
    ///
    /// 서명 불일치는 `InvalidSignature`, 만료는 `Expired`, 그 밖의 디코딩 실패는 `Malformed`입니다.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Malformed,
            })
    }
}
