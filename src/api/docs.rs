//! OpenAPI document for the public endpoints.

use utoipa::OpenApi;

use super::handlers::{self, HealthResponse};
use crate::status::StatusReport;

/// OpenAPI description served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::index, handlers::health, handlers::model_status),
    components(schemas(HealthResponse, StatusReport)),
    tags(
        (name = "frontend", description = "Static frontend and liveness"),
        (name = "status", description = "Model status aggregation")
    )
)]
pub struct ApiDoc;
