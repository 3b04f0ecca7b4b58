//! 사용자 및 자격증명 타입.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BookstoreError, BookstoreResult};

/// 사용자 이름 누락.
pub const MSG_MISSING_USERNAME: &str = "invalid request - please fill username";
/// 비밀번호 누락.
pub const MSG_MISSING_PASSWORD: &str = "invalid request - please fill user password";

/// 저장된 사용자.
///
/// 평문 비밀번호는 보관하지 않으며, 해시는 직렬화되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 회원가입/로그인 요청 본문.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// 사용자 이름과 비밀번호가 모두 비어 있지 않은지 확인합니다.
    pub fn validate(&self) -> BookstoreResult<()> {
        if self.username.is_empty() {
            return Err(BookstoreError::validation(MSG_MISSING_USERNAME));
        }
        if self.password.is_empty() {
            return Err(BookstoreError::validation(MSG_MISSING_PASSWORD));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate() {
        assert!(credentials("alice", "pw123").validate().is_ok());

        let err = credentials("", "pw123").validate().unwrap_err();
        assert_eq!(err.to_string(), MSG_MISSING_USERNAME);

        let err = credentials("alice", "").validate().unwrap_err();
        assert_eq!(err.to_string(), MSG_MISSING_PASSWORD);
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", credentials("alice", "hunter2"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let now = Utc::now();
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }
}
