pub mod v1;

use axum::{Router, routing::get};

use crate::handlers::{health, media};
use crate::infra::app_state::AppState;

/// Versioned API plus the unversioned health and image proxy endpoints.
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/proxy-image", get(media::proxy_image))
        .nest("/api/v1", v1::create_v1_router(state))
}
