pub mod config;
pub mod error;
pub mod gateway;
pub mod keys;
pub mod omdb;
pub mod server;
pub mod store;
pub mod types;
pub mod year;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use log::{debug, info};
use tokio::net::TcpListener;

use config::Config;
use error::Result;
use gateway::{GatewaySettings, PosterGateway};
use omdb::OmdbClient;
use server::{AppState, GistProxy};
use store::S3ObjectStore;

/// Run the poster cache API until Ctrl-C.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the listener cannot bind.
pub async fn run() -> Result<()> {
    info!("Initializing poster cache");
    let config = Config::from_env()?;

    debug!("Connecting object store");
    let store = Arc::new(S3ObjectStore::from_config(&config.storj).await);

    debug!("Initializing OMDb client");
    let omdb = Arc::new(OmdbClient::new(&config.omdb));

    let gateway = PosterGateway::new(store, omdb.clone(), omdb, GatewaySettings::from(&config));
    let gist = config.gist_url.clone().map(GistProxy::new);
    let app = server::router(AppState { gateway, gist });

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("API running at http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
