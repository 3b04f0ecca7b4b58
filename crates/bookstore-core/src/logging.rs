//! 구조화 로깅 초기화.
//!
//! 필터는 `RUST_LOG`가 있으면 그것을, 없으면 설정의 `logging.level`을 씁니다.
//! 출력 형식은 `LOG_FORMAT` 환경 변수가 설정 파일보다 우선합니다.

use crate::config::LoggingConfig;
use crate::error::{BookstoreError, BookstoreResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// 개발용 여러 줄 출력
    #[default]
    Pretty,
    /// 로그 수집기용 JSON 한 줄
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = BookstoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(BookstoreError::Config(format!("unknown log format: {other}"))),
        }
    }
}

/// 구독자 초기화에 쓰이는 해석된 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .or_else(|| config.format.parse().ok())
            .unwrap_or_default();

        Self {
            level: config.level.clone(),
            format,
        }
    }
}

/// 전역 tracing 구독자를 설치합니다.
///
/// 프로세스당 한 번만 성공하며, 이미 설치된 경우 [`BookstoreError::Config`]를 반환합니다.
pub fn init_logging(config: LogConfig) -> BookstoreResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| BookstoreError::Config(format!("invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_target(true);

    let installed = match config.format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
    };
    installed.map_err(|e| BookstoreError::Config(format!("logging already initialized: {e}")))?;

    tracing::info!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" Compact ".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(BookstoreError::Config(_))
        ));
    }

    #[test]
    fn test_log_config_from_logging_config() {
        let logging = LoggingConfig {
            level: "bookstore_api=debug".to_string(),
            format: "compact".to_string(),
        };
        let config = LogConfig::from(&logging);

        assert_eq!(config.level, "bookstore_api=debug");
        if std::env::var("LOG_FORMAT").is_err() {
            assert_eq!(config.format, LogFormat::Compact);
        }
    }

    #[test]
    fn test_init_logging_only_once() {
        let config = LogConfig {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        };

        assert!(init_logging(config.clone()).is_ok());
        let err = init_logging(config).unwrap_err();
        assert!(matches!(err, BookstoreError::Config(_)));
        assert_eq!(err.status_code(), 500);
    }
}
