//! Viewer API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. Responses carry
//! `Cache-Control: no-store` — patient data must never land in shared
//! caches.

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::store::PatientStore;

/// Build the viewer API router.
pub fn api_router(store: Arc<PatientStore>) -> Router {
    let ctx = ApiContext::new(store);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/patients", get(endpoints::patients::list))
        .route(
            "/patients/:id/timestamps",
            get(endpoints::patients::timestamps),
        )
        .route("/patients/:id/summary", get(endpoints::summary::fetch))
        .with_state(ctx)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new().nest("/api", routes)
}
