//! HTTP API route definitions.

use std::path::Path;

use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::handlers::{health, index, model_status, prometheus, AppState};
use crate::metrics::track_requests;

/// Path prefix static assets are served under.
pub const STATIC_PREFIX: &str = "/static";

/// Create the API router.
///
/// The static asset directory is checked once, here; if it is missing the
/// mount is skipped and `/static/*` falls through to 404.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        // Frontend
        .route("/", get(index))
        .route("/health", get(health))
        // Status endpoint
        .route("/model-status", get(model_status))
        .route("/metrics", get(prometheus));

    let router = mount_static(router, &state.static_dir);

    router
        .layer(middleware::from_fn(track_requests))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn mount_static(router: Router<AppState>, dir: &Path) -> Router<AppState> {
    if dir.is_dir() {
        info!("Serving static assets from {} at {}", dir.display(), STATIC_PREFIX);
        router.nest_service(STATIC_PREFIX, ServeDir::new(dir))
    } else {
        info!("Static directory {} not found, skipping mount", dir.display());
        router
    }
}
