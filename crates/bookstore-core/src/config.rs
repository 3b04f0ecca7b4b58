//! 설정 관리.
//!
//! 설정은 다음 순서로 병합됩니다 (뒤쪽이 우선):
//!
//! 1. 코드에 정의된 기본값
//! 2. 설정 파일 (`config/default.toml`, 없어도 됨)
//! 3. `BOOKSTORE__` 접두사 환경 변수 (예: `BOOKSTORE__AUTH__TOKEN_TTL_HOURS`)
//! 4. 관례적인 환경 변수 `DATABASE_URL`, `JWT_SECRET`, `API_HOST`, `API_PORT`
//!
//! JWT 비밀 키에는 기본값이 없습니다. 설정되지 않으면 시작 단계에서 실패합니다.

use std::net::SocketAddr;
use std::path::Path;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

/// 권장 최소 비밀 키 길이 (바이트).
pub const RECOMMENDED_SECRET_LEN: usize = 32;

/// 애플리케이션 설정.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 문자열
    pub url: String,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
    /// 시작 시 마이그레이션 실행 여부
    pub run_migrations: bool,
}

/// 인증 설정.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HMAC 서명용 비밀 키
    #[serde(deserialize_with = "deserialize_secret")]
    pub jwt_secret: SecretString,
    /// 토큰 유효 기간 (시간)
    pub token_ttl_hours: i64,
    /// 로그인 시 발급되는 역할
    pub default_role: String,
    /// 보호된 라우트가 요구하는 역할
    pub required_role: String,
}

impl AuthConfig {
    /// 주어진 비밀 키와 기본값으로 설정 생성.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::new(secret.into().into_boxed_str()),
            token_ttl_hours: 24,
            default_role: "admin".to_string(),
            required_role: "admin".to_string(),
        }
    }

    /// 토큰 유효 기간.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(SecretString::new(raw.into_boxed_str()))
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("BOOKSTORE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("auth.jwt_secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("server.host", std::env::var("API_HOST").ok())?
            .set_override_option("server.port", std::env::var("API_PORT").ok())?;

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load("config/default.toml")
    }

    /// TOML 문자열에서 설정을 로드합니다 (환경 변수 무시).
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let server = ServerConfig::default();
        let logging = LoggingConfig::default();

        config::Config::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", server.port)?
            .set_default("server.request_timeout_secs", server.request_timeout_secs)?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_secs", 10)?
            .set_default("database.run_migrations", true)?
            .set_default("auth.token_ttl_hours", 24)?
            .set_default("auth.default_role", "admin")?
            .set_default("auth.required_role", "admin")?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format)
    }

    /// 로드된 값의 유효성을 확인합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secret = self.auth.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret must not be empty (set JWT_SECRET)".to_string(),
            ));
        }
        if secret.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                len = secret.len(),
                recommended = RECOMMENDED_SECRET_LEN,
                "JWT secret is shorter than recommended"
            );
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(ConfigError::Message(
                "auth.token_ttl_hours must be positive".to_string(),
            ));
        }
        if self.auth.required_role.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.required_role must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [database]
        url = "postgres://localhost/bookstore"

        [auth]
        jwt_secret = "test-secret-key-for-jwt-testing-minimum-32-chars"
    "#;

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.auth.default_role, "admin");
        assert_eq!(config.auth.required_role, "admin");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.auth.token_ttl(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_missing_secret_fails() {
        let toml = r#"
            [database]
            url = "postgres://localhost/bookstore"
        "#;
        assert!(AppConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_empty_secret_fails() {
        let toml = r#"
            [database]
            url = "postgres://localhost/bookstore"

            [auth]
            jwt_secret = ""
        "#;
        assert!(AppConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_non_positive_ttl_fails() {
        let toml = r#"
            [database]
            url = "postgres://localhost/bookstore"

            [auth]
            jwt_secret = "test-secret-key-for-jwt-testing-minimum-32-chars"
            token_ttl_hours = 0
        "#;
        assert!(AppConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_secret_is_redacted_in_debug() {
        let config = AppConfig::from_toml_str(MINIMAL).unwrap();
        let debug = format!("{:?}", config.auth);
        assert!(!debug.contains("test-secret-key"));
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig::default();
        assert_eq!(server.socket_addr().unwrap().port(), 8080);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(bad.socket_addr().is_err());
    }
}
