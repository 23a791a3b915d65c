pub mod api;
pub mod config;
pub mod models;
pub mod store;
pub mod viewer;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Fatal startup/runtime failures. Anything here is page-level: the
/// viewer has no data to show.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Failed to load patient corpus: {0}")]
    Store(#[from] store::StoreError),
    #[error("Invalid bind address {0:?}")]
    InvalidBind(String),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

pub async fn run() -> Result<(), RunError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Notelens starting v{}", config::APP_VERSION);

    let store = Arc::new(store::PatientStore::load(&config::corpus_path())?);

    let bind = std::env::var("NOTELENS_BIND").unwrap_or_else(|_| config::DEFAULT_BIND.to_string());
    let addr: SocketAddr = bind
        .parse()
        .map_err(|_| RunError::InvalidBind(bind.clone()))?;

    api::server::serve(store, addr, Some(config::static_dir())).await?;
    Ok(())
}
