use axum::{
    Json,
    extract::{Path, Query, State},
};
use reelfolio_core::content::HreflangUrls;
use reelfolio_model::Page;
use serde::{Deserialize, Serialize};

use super::LocaleQuery;
use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};

pub async fn list_pages(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<Vec<Page>>> {
    let locale = state.locale(query.locale.as_deref());
    Ok(Json(state.pages.pages(locale).await?))
}

pub async fn page_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<Page>> {
    let locale = state.locale(query.locale.as_deref());
    state
        .pages
        .page_by_slug(&slug, locale)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Page {slug} not found")))
}

#[derive(Debug, Deserialize)]
pub struct SiteUrlQuery {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct SiteUrlsResponse {
    pub canonical: String,
    pub alternates: HreflangUrls,
}

/// Canonical and per-locale alternate URLs for a site path.
pub async fn site_urls(
    State(state): State<AppState>,
    Query(query): Query<SiteUrlQuery>,
) -> Json<SiteUrlsResponse> {
    Json(SiteUrlsResponse {
        canonical: state.site.canonical_url(&query.path),
        alternates: state.site.hreflang_urls(&query.path),
    })
}
