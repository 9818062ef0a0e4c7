use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::query_engine::QueryEngine;

pub mod handlers;
pub mod models;

/// `/search` queries the engine, `/links.json` serves the curated links file
/// as-is, and everything else is served from the document root.
pub fn create_router(query_engine: Arc<QueryEngine>, links_file: &Path) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let sites_dir = query_engine.scanner().root().to_path_buf();

    Router::new()
        .route("/search", get(handlers::search_handler))
        .with_state(query_engine)
        .route_service("/links.json", ServeFile::new(links_file))
        .fallback_service(ServeDir::new(sites_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
