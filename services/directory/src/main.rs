//! flotilla Endpoint Directory
//!
//! Serves the fleet's endpoint directory over HTTP: every query recomputes
//! the mapping of VIP and port-name groups to reachable endpoints from the
//! scheduler's persisted task records.

use std::sync::Arc;

use anyhow::Result;
use flotilla_directory::{
    api,
    config::Config,
    directory::EndpointDirectory,
    registry::CustomEndpointRegistry,
    state::AppState,
    store::{MemoryStateStore, SnapshotStateStore, StateStore},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing (prefer RUST_LOG, fallback to FLOTILLA_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting flotilla endpoint directory");
    info!(listen_addr = %config.listen_addr, service = %config.service, "Configuration loaded");

    let store: Arc<dyn StateStore> = match &config.snapshot_file {
        Some(path) => {
            info!(path = %path.display(), "Serving from scheduler snapshot file");
            Arc::new(SnapshotStateStore::new(path.clone()))
        }
        None => {
            warn!("No FLOTILLA_SNAPSHOT_FILE set; serving an empty in-memory store");
            Arc::new(MemoryStateStore::new())
        }
    };

    let registry = Arc::new(CustomEndpointRegistry::new());
    for (name, value) in &config.custom_endpoints {
        info!(endpoint = %name, "Registering custom endpoint");
        let value = value.clone();
        registry.register(name.clone(), move || Ok(value.clone()));
    }

    // Create application state
    let state = AppState::new(
        store,
        registry,
        EndpointDirectory::new(config.service.clone()),
    );

    // Build and run the server
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await?;

    info!("Endpoint directory shutdown complete");
    Ok(())
}
