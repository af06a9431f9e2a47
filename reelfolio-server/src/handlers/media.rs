use axum::{
    Json,
    body::Body,
    extract::{Query, State},
    http::{HeaderValue, header},
    response::Response,
};
use reelfolio_core::content::{BackstageImage, DEFAULT_BACKSTAGE_LIMIT};
use reelfolio_core::storage::StorageError;
use reelfolio_model::VimeoVideo;
use serde::Deserialize;
use tracing::warn;

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};

const PROXY_CACHE_CONTROL: &str = "public, max-age=86400, s-maxage=86400";

#[derive(Debug, Deserialize)]
pub struct BackstageQuery {
    pub folder: String,
    pub limit: Option<usize>,
}

pub async fn backstage(
    State(state): State<AppState>,
    Query(query): Query<BackstageQuery>,
) -> Json<Vec<BackstageImage>> {
    let limit = query.limit.unwrap_or(DEFAULT_BACKSTAGE_LIMIT);
    Json(state.backstage.backstage_images(&query.folder, limit).await)
}

/// The account's videos minus hidden ids, plus pinned ones.
pub async fn work_videos(State(state): State<AppState>) -> Json<Vec<VimeoVideo>> {
    Json(state.videos.work_videos().await)
}

#[derive(Debug, Default, Deserialize)]
pub struct ProxyQuery {
    pub path: Option<String>,
    pub url: Option<String>,
}

/// Serves an object from public storage. `?path=` is resolved in the
/// projects bucket; `?url=` must already point at this deployment.
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> AppResult<Response> {
    let target = match (query.path.as_deref(), query.url.as_deref()) {
        (Some(path), _) if !path.trim().is_empty() => state
            .urls
            .proxy_target_url(&state.buckets.projects, path)
            .ok_or_else(|| AppError::bad_request("Invalid path"))?,
        (_, Some(url)) if state.urls.is_public_object_url(url) => url.to_string(),
        (_, Some(_)) => return Err(AppError::forbidden("Forbidden")),
        _ => return Err(AppError::bad_request("Missing path or url")),
    };

    let object = state.storage.fetch_url(&target).await.map_err(|err| match err {
        StorageError::NotFound(_) => AppError::not_found("Image not found"),
        other => {
            warn!(url = %target, error = %other, "image proxy fetch failed");
            AppError::bad_gateway("Upstream fetch failed")
        }
    })?;

    let content_type = object
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));
    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, PROXY_CACHE_CONTROL)
        .body(Body::from(object.bytes))
        .map_err(|e| AppError::internal(format!("Failed to build response: {e}")))
}
