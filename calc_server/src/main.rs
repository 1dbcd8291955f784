//! # Formula Calculator Server
//!
//! Serves the calculation catalog, UI configurations and calculators of a
//! `calculations/` tree as a JSON API, plus the bundled front-end from
//! `public/`.
//!
//! ```text
//! calc_server --port 8000 --calculations-dir calculations --public-dir public
//! ```

mod config;
mod error;
mod response;
mod routes;

use calc_core::Library;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::routes::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = ServerConfig::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let library = Library::new(&config.calculations_dir);
    if !library.root().is_dir() {
        tracing::warn!(
            root = %library.root().display(),
            "calculations directory does not exist, catalog will be empty"
        );
    }
    tracing::info!(modules = ?library.registry().module_ids(), "registered calculation modules");

    let app = router(AppState::new(library), &config.public_dir);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await.map_err(|source| ServerError::Bind {
        address: address.clone(),
        source,
    })?;
    tracing::info!(%address, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
