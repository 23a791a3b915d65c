//! Server assembly.
//!
//! Binds the API router, a permissive CORS layer (the viewer runs on
//! localhost; the dev frontend is served from a different port), and the
//! static frontend bundle when one is present.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::router::api_router;
use crate::store::PatientStore;

/// Serve the viewer API until the process is stopped.
pub async fn serve(
    store: Arc<PatientStore>,
    addr: SocketAddr,
    static_dir: Option<PathBuf>,
) -> std::io::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = api_router(store).layer(cors);

    match static_dir {
        Some(dir) if dir.is_dir() => {
            tracing::info!(dir = %dir.display(), "serving frontend bundle");
            app = app.fallback_service(ServeDir::new(dir));
        }
        _ => tracing::debug!("no frontend bundle directory; serving API only"),
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "viewer API listening");
    axum::serve(listener, app).await
}
