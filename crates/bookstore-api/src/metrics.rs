//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 인증/도서 작업 메트릭을 수집하고 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Prometheus 메트릭 레코더를 설정하고 핸들을 반환합니다.
///
/// # Errors
///
/// 레코더가 이미 설치되어 있거나 버킷 설정이 잘못되면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 지속 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 인증/도서 메트릭 헬퍼 함수
// ============================================================================

/// 인증 게이트 거부 카운터 증가.
///
/// `reason`: "invalid_token" | "role_not_permitted"
pub fn record_auth_rejection(reason: &'static str) {
    counter!("auth_rejections_total", "reason" => reason).increment(1);
}

/// 로그인 시도 결과 카운터 증가.
///
/// `outcome`: "success" | "unknown_user" | "bad_password" | "error"
pub fn record_login(outcome: &'static str) {
    counter!("auth_logins_total", "outcome" => outcome).increment(1);
}

/// 회원가입 결과 카운터 증가.
pub fn record_registration(outcome: &'static str) {
    counter!("auth_registrations_total", "outcome" => outcome).increment(1);
}

/// 도서 저장소 작업 카운터 증가.
///
/// `operation`: "detail" | "list" | "create" | "update" | "delete"
pub fn record_book_operation(operation: &'static str, success: bool) {
    let outcome = if success { "success" } else { "error" };
    counter!(
        "book_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
