/// Metrics and telemetry for the records service
///
/// Prometheus-compatible metrics for monitoring:
/// - HTTP request counts and latencies
/// - Records written and write failures per kind
/// - Active demo sessions

use axum::{extract::Request, middleware::Next, response::Response};
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, Encoder, HistogramVec,
    IntCounterVec, IntGauge, TextEncoder,
};
use std::time::Instant;

lazy_static! {
    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request latencies in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .unwrap();

    /// Records written by kind
    pub static ref RECORDS_WRITTEN_TOTAL: IntCounterVec = register_int_counter_vec!(
        "records_written_total",
        "Total number of records persisted to the object store",
        &["kind"]
    )
    .unwrap();

    /// Failed write attempts by kind and failure stage
    pub static ref RECORD_WRITE_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "record_write_failures_total",
        "Total number of record writes that failed",
        &["kind", "stage"]
    )
    .unwrap();

    /// Active demo sessions
    pub static ref SESSIONS_ACTIVE: IntGauge = register_int_gauge!(
        "sessions_active",
        "Number of active demo sessions"
    )
    .unwrap();
}

/// Render metrics in Prometheus text format
pub fn render_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration);
}

/// Record a persisted record
pub fn record_write(kind: &str) {
    RECORDS_WRITTEN_TOTAL.with_label_values(&[kind]).inc();
}

/// Record a failed write attempt
pub fn record_write_failure(kind: &str, stage: &str) {
    RECORD_WRITE_FAILURES_TOTAL
        .with_label_values(&[kind, stage])
        .inc();
}

/// Middleware recording count and latency for every request
pub async fn track_http(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}
