//! HTTP routes for the medstock server.

pub mod medicines;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::codes::{CodeStore, URL_PREFIX};

/// Shared handles passed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub codes: CodeStore,
}

/// Creates the main router with all routes mounted.
pub fn create_router(state: AppState) -> Router {
    let qr_images = ServeDir::new(state.codes.dir());

    Router::new()
        .merge(medicines::router(state))
        .nest_service(URL_PREFIX, qr_images)
        .layer(TraceLayer::new_for_http())
}
