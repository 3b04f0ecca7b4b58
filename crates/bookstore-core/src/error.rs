//! 서비스 전반의 에러 타입.
//!
//! 모든 요청 실패는 아래 세 가지 범주 중 하나로 끝납니다:
//! 입력 검증 실패(400), 인증 실패(401), 저장소/내부 실패(500).

use thiserror::Error;

/// 핵심 서비스 에러.
///
/// `Display` 출력은 그대로 응답 본문의 `"error"` 값이 됩니다.
#[derive(Debug, Error)]
pub enum BookstoreError {
    /// 잘못되었거나 누락된 입력
    #[error("{0}")]
    Validation(String),

    /// 잘못된 자격증명, 유효하지 않거나 만료된 토큰, 허용되지 않은 역할
    #[error("{0}")]
    Authentication(String),

    /// 조회 실패 또는 영속화 실패 (구분하지 않음)
    #[error("{0}")]
    Store(String),

    /// 해싱, 토큰 인코딩 등 내부 처리 실패
    #[error("{0}")]
    Internal(String),

    /// 설정 에러 (시작 시점에만 발생)
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 서비스 작업을 위한 Result 타입.
pub type BookstoreResult<T> = Result<T, BookstoreError>;

impl BookstoreError {
    /// 검증 에러 생성.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 인증 에러 생성.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// 저장소 에러 생성.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// 이 에러에 대응하는 HTTP 상태 코드.
    pub fn status_code(&self) -> u16 {
        match self {
            BookstoreError::Validation(_) => 400,
            BookstoreError::Authentication(_) => 401,
            BookstoreError::Store(_) | BookstoreError::Internal(_) | BookstoreError::Config(_) => {
                500
            }
        }
    }
}

impl From<serde_json::Error> for BookstoreError {
    fn from(err: serde_json::Error) -> Self {
        BookstoreError::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for BookstoreError {
    fn from(err: config::ConfigError) -> Self {
        BookstoreError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BookstoreError::validation("x").status_code(), 400);
        assert_eq!(BookstoreError::authentication("x").status_code(), 401);
        assert_eq!(BookstoreError::store("x").status_code(), 500);
        assert_eq!(BookstoreError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_display_is_bare_message() {
        let err = BookstoreError::validation("invalid request - please fill book name");
        assert_eq!(err.to_string(), "invalid request - please fill book name");
    }

    #[test]
    fn test_from_serde_json_is_validation() {
        let err: BookstoreError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, BookstoreError::Validation(_)));
    }
}
