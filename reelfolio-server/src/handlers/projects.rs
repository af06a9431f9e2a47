use axum::{
    Json,
    extract::{Path, Query, State},
};
use reelfolio_core::content::AdjacentProjects;
use reelfolio_model::ProjectView;
use serde::Deserialize;

use super::LocaleQuery;
use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct FeaturedQuery {
    pub locale: Option<String>,
    pub limit: Option<usize>,
}

pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<Vec<ProjectView>>> {
    let locale = state.locale(query.locale.as_deref());
    Ok(Json(state.projects.list_projects(locale).await?))
}

pub async fn featured_projects(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> AppResult<Json<Vec<ProjectView>>> {
    let locale = state.locale(query.locale.as_deref());
    let projects = state
        .projects
        .featured_projects(query.limit.unwrap_or(0), locale)
        .await?;
    Ok(Json(projects))
}

pub async fn project_slugs(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.projects.project_slugs().await?))
}

pub async fn project_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<ProjectView>> {
    let locale = state.locale(query.locale.as_deref());
    state
        .projects
        .project_by_slug(&slug, locale)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Project {slug} not found")))
}

pub async fn adjacent_projects(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<AdjacentProjects>> {
    let locale = state.locale(query.locale.as_deref());
    Ok(Json(state.projects.adjacent_projects(&slug, locale).await?))
}
