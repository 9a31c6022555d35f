//! Unified error types for the service.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration validation error.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Frontend serving error.
    #[error("frontend error: {0}")]
    Frontend(#[from] FrontendError),

    /// Probe run error.
    #[error("probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Metrics recorder installation error.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while serving the HTML entry point.
#[derive(Error, Debug)]
pub enum FrontendError {
    /// The designated index file does not exist.
    #[error("index file {} not found", path.display())]
    IndexNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Reading the index file failed for another reason.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl FrontendError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FrontendError::IndexNotFound { .. } => StatusCode::NOT_FOUND,
            FrontendError::Read { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FrontendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            FrontendError::IndexNotFound { .. } => "Not Found".to_string(),
            FrontendError::Read { .. } => "Internal Server Error".to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Errors raised by the endpoint probe.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Base URL could not be parsed or joined.
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        /// Offending URL text.
        url: String,
        /// Parse failure.
        source: url::ParseError,
    },

    /// HTTP client could not be built or a request failed in transport.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Every probe target failed at transport level.
    #[error("all {0} probe targets failed")]
    AllFailed(usize),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
