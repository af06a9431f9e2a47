//! # Reelfolio Server
//!
//! Axum API for the portfolio site: published projects and pages,
//! portfolio galleries, the Vimeo reel, contact intake and the admin
//! surface behind an email allowlist.

pub mod handlers;
pub mod infra;
pub mod routes;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use infra::app_state::AppState;

/// Build the full application router with its middleware stack.
pub fn create_app(state: AppState) -> Router {
    routes::create_api_router(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
