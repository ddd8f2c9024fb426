//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::listings::{ContentGenerator, ListingService};
use crate::server::routes::{draft_listing_handler, generate_content_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ContentGenerator>,
    pub listings: Arc<ListingService>,
}

impl AppState {
    pub fn new(generator: ContentGenerator) -> Self {
        let generator = Arc::new(generator);
        Self {
            listings: Arc::new(ListingService::new(generator.clone())),
            generator,
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - the landing-page form posts from another origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/generate-content", post(generate_content_handler))
        .route("/api/listings/draft", post(draft_listing_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
