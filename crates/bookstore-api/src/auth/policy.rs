//! 접근 정책.
//!
//! 검증된 Claims를 받아 요청 허용 여부를 결정합니다.

use std::collections::HashSet;

use super::Claims;

/// 정책 거부 사유.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("invalid role")]
    RoleNotPermitted { role: String },
}

/// 요청 수준 접근 정책.
pub trait AccessPolicy: Send + Sync {
    /// Claims가 정책을 만족하면 `Ok(())`.
    fn authorize(&self, claims: &Claims) -> Result<(), PolicyError>;
}

/// 특정 역할 하나만 허용하는 정책.
#[derive(Debug, Clone)]
pub struct RequireRole {
    role: String,
}

impl RequireRole {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }

    /// 허용되는 역할.
    pub fn role(&self) -> &str {
        &self.role
    }
}

impl AccessPolicy for RequireRole {
    fn authorize(&self, claims: &Claims) -> Result<(), PolicyError> {
        if claims.role == self.role {
            Ok(())
        } else {
            Err(PolicyError::RoleNotPermitted {
                role: claims.role.clone(),
            })
        }
    }
}

/// 주어진 역할 중 하나를 허용하는 정책.
#[derive(Debug, Clone, Default)]
pub struct RequireAnyRole {
    roles: HashSet<String>,
}

impl RequireAnyRole {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

impl AccessPolicy for RequireAnyRole {
    fn authorize(&self, claims: &Claims) -> Result<(), PolicyError> {
        if self.roles.contains(&claims.role) {
            Ok(())
        } else {
            Err(PolicyError::RoleNotPermitted {
                role: claims.role.clone(),
            })
        }
    }
}
