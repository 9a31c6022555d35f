//! Prometheus metrics for request tracking.
//!
//! Recording is a no-op until [`install_recorder`] has been called, so
//! handlers can record unconditionally and tests need no setup.

use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Model status reports counter metric name.
pub const METRIC_MODEL_STATUS_REPORTS: &str = "model_status_reports_total";

/// Install the global Prometheus recorder and describe all metrics.
/// Call this once at startup.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Periodically drain histogram buckets; the recorder does not do this itself.
pub fn spawn_upkeep(handle: PrometheusHandle, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(
        METRIC_MODEL_STATUS_REPORTS,
        "Total number of model status reports by overall status"
    );

    debug!("Metrics initialized");
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}

/// Increment the HTTP requests counter.
pub fn inc_http_requests(endpoint: &str, status: u16) {
    counter!(
        METRIC_HTTP_REQUESTS,
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment the model status report counter.
pub fn inc_model_status_reports(status: &'static str) {
    counter!(METRIC_MODEL_STATUS_REPORTS, "status" => status).increment(1);
}

/// Collapse a matched route to a metric label; wildcard tails become `*`.
pub fn endpoint_label(matched: &str) -> String {
    match matched.find('*') {
        Some(idx) => format!("{}*", &matched[..idx]),
        None => matched.to_string(),
    }
}

/// Label for a request served by a nested service, keyed on its mount point.
pub fn nested_label(path: &str) -> String {
    match path.trim_start_matches('/').split('/').next() {
        Some(segment) if !segment.is_empty() => format!("/{}/*", segment),
        _ => "unmatched".to_string(),
    }
}

/// Middleware recording request count and latency per matched route.
///
/// Applied with `Router::layer` so nested services such as `/static` are
/// counted too. Those carry no `MatchedPath`; they are labelled by mount
/// point unless they 404, which keeps unmatched paths out of the label set.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let matched = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| endpoint_label(path.as_str()));
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let endpoint = match matched {
        Some(endpoint) => endpoint,
        None if response.status() != StatusCode::NOT_FOUND => nested_label(&path),
        None => "unmatched".to_string(),
    };

    record_http_latency(start, &endpoint);
    inc_http_requests(&endpoint, response.status().as_u16());

    response
}
