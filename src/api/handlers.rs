//! HTTP API handlers.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, instrument, warn};
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::FrontendError;
use crate::metrics;
use crate::status::{CapabilityFlags, CredentialSource, EnvCredentials, StatusReport};
use crate::utils::now_rfc3339;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where `/model-status` reads credentials from.
    pub credentials: Arc<dyn CredentialSource>,
    /// HTML file served at `/`.
    pub index_file: Arc<PathBuf>,
    /// Directory mounted under `/static` if present.
    pub static_dir: Arc<PathBuf>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state reading credentials from the process environment.
    pub fn new(config: &Config) -> Self {
        Self {
            credentials: Arc::new(EnvCredentials),
            index_file: Arc::new(config.index_file.clone()),
            static_dir: Arc::new(config.static_dir.clone()),
            metrics: None,
        }
    }

    /// Replace the credential source.
    pub fn with_credentials(mut self, credentials: impl CredentialSource + 'static) -> Self {
        self.credentials = Arc::new(credentials);
        self
    }

    /// Attach a Prometheus handle so `/metrics` can render it.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("credentials", &self.credentials)
            .field("index_file", &self.index_file)
            .field("static_dir", &self.static_dir)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy".
    pub status: String,
    /// Always "frontend".
    pub service: String,
    /// RFC 3339 response time.
    pub timestamp: String,
}

/// Serve the HTML entry point.
#[utoipa::path(
    get,
    path = "/",
    tag = "frontend",
    responses(
        (status = 200, description = "HTML entry point", content_type = "text/html", body = String),
        (status = 404, description = "Index file missing")
    )
)]
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<Html<Vec<u8>>, FrontendError> {
    let path = state.index_file.as_ref();

    // Served as raw bytes; the file need not be UTF-8.
    match tokio::fs::read(path).await {
        Ok(body) => Ok(Html(body)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Index file not found");
            Err(FrontendError::IndexNotFound { path: path.clone() })
        }
        Err(source) => Err(FrontendError::Read {
            path: path.clone(),
            source,
        }),
    }
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "frontend",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "frontend".to_string(),
        timestamp: now_rfc3339(),
    })
}

/// Model status handler - reports credential presence and placeholder performance.
#[utoipa::path(
    get,
    path = "/model-status",
    tag = "status",
    responses((status = 200, description = "Model status report", body = StatusReport))
)]
#[instrument(skip_all)]
pub async fn model_status(State(state): State<AppState>) -> Json<StatusReport> {
    let flags = CapabilityFlags::read(state.credentials.as_ref());
    let report = StatusReport::build(flags, OffsetDateTime::now_utc());

    debug!(status = report.status.as_str(), ?flags, "Built model status report");
    metrics::inc_model_status_reports(report.status.as_str());

    Json(report)
}

/// Prometheus exposition handler - 404 when no recorder is installed.
pub async fn prometheus(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}
