//! HTTP surface: `GET /api/cache` and the optional `GET /gist`.

mod gist;
mod handlers;
mod service_layers;

use std::sync::Arc;

use axum::{Router, routing::get};
use log::{error, info};

use crate::gateway::PosterGateway;

pub use gist::GistProxy;

pub struct AppState {
    pub gateway: PosterGateway,
    pub gist: Option<GistProxy>,
}

/// Build the application router. `/gist` is only routed when a proxy is set.
pub fn router(state: AppState) -> Router {
    let AppState { gateway, gist } = state;

    let mut router = Router::new()
        .route("/api/cache", get(handlers::cache_handler))
        .with_state(Arc::new(gateway));

    if let Some(gist) = gist {
        info!("Proxying /gist to {}", gist.url());
        router = router.merge(
            Router::new()
                .route("/gist", get(handlers::gist_handler))
                .with_state(Arc::new(gist)),
        );
    }

    router.layer(service_layers::build_cors_layer())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received, shutting down...");
}
