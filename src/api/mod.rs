//! HTTP API module for the frontend, health, model status and metrics endpoints.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::utils::shutdown_signal;

/// Bind the configured address and serve until a shutdown signal arrives.
pub async fn serve(config: &Config, state: AppState) -> crate::Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
