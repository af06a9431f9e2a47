use axum::{
    Json,
    extract::{Query, State},
};
use reelfolio_model::{GalleryId, PortfolioGallery, PortfolioPhoto};
use serde::Deserialize;

use crate::infra::app_state::AppState;
use crate::infra::errors::AppResult;

#[derive(Debug, Default, Deserialize)]
pub struct PhotosQuery {
    pub gallery: Option<GalleryId>,
}

/// Visible galleries, in display order.
pub async fn list_galleries(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PortfolioGallery>>> {
    let galleries = state
        .galleries
        .list()
        .await?
        .into_iter()
        .filter(|g| g.is_visible)
        .collect();
    Ok(Json(galleries))
}

pub async fn list_photos(
    State(state): State<AppState>,
    Query(query): Query<PhotosQuery>,
) -> AppResult<Json<Vec<PortfolioPhoto>>> {
    Ok(Json(state.portfolio.public_photos(query.gallery).await?))
}

/// Image URLs from the configured (or first populated) portfolio folder.
pub async fn folder_gallery(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.portfolio_folders.gallery_urls().await)
}
