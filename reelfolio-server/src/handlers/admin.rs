//! Handlers behind the admin allowlist. The middleware has already
//! resolved the bearer token into an [`AdminIdentity`]; every action
//! re-checks it.

use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use reelfolio_core::admin::UploadFile;
use reelfolio_core::auth::AdminIdentity;
use reelfolio_core::sync::SyncReport;
use reelfolio_model::{
    ContactSubmission, GalleryDraft, GalleryId, Page, PhotoId, PortfolioGallery,
    PortfolioPhoto, Project, ProjectDraft, ProjectId,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::handlers::LocaleQuery;
use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};

pub async fn me(Extension(who): Extension<AdminIdentity>) -> Json<AdminIdentity> {
    Json(who)
}

// Projects

pub async fn list_projects(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(state.admin.list_projects(&who).await?))
}

pub async fn get_project(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<ProjectId>,
) -> AppResult<Json<Project>> {
    Ok(Json(state.admin.get_project(&who, id).await?))
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Json(draft): Json<ProjectDraft>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.admin.create_project(&who, draft).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<ProjectId>,
    Json(draft): Json<ProjectDraft>,
) -> AppResult<Json<Project>> {
    Ok(Json(state.admin.update_project(&who, id, draft).await?))
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub published: bool,
}

pub async fn publish_project(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<ProjectId>,
    Json(body): Json<PublishRequest>,
) -> AppResult<StatusCode> {
    state.admin.publish_project(&who, id, body.published).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_project(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<ProjectId>,
) -> AppResult<StatusCode> {
    state.admin.delete_project(&who, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_cover(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<ProjectId>,
    multipart: Multipart,
) -> AppResult<Json<Project>> {
    let file = read_files(multipart, "file")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::bad_request("No file provided"))?;
    Ok(Json(state.admin.upload_cover(&who, id, file).await?))
}

pub async fn upload_project_gallery(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<ProjectId>,
    multipart: Multipart,
) -> AppResult<Json<Project>> {
    let files = read_files(multipart, "files").await?;
    Ok(Json(state.admin.upload_gallery(&who, id, files).await?))
}

#[derive(Debug, Deserialize)]
pub struct SignedUrlQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct SignedUrlResponse {
    pub url: String,
}

/// Short-lived URL for a private object in the projects bucket.
pub async fn signed_url(
    State(state): State<AppState>,
    Extension(_who): Extension<AdminIdentity>,
    Query(query): Query<SignedUrlQuery>,
) -> AppResult<Json<SignedUrlResponse>> {
    if query.path.trim().is_empty() {
        return Err(AppError::bad_request("Missing path"));
    }
    let url = state
        .urls
        .signed_object_url(
            state.storage.as_ref(),
            &state.buckets.projects,
            &query.path,
            state.signed_url_ttl,
        )
        .await;
    Ok(Json(SignedUrlResponse { url }))
}

// Galleries

pub async fn list_galleries(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
) -> AppResult<Json<Vec<PortfolioGallery>>> {
    Ok(Json(state.admin.list_galleries(&who).await?))
}

pub async fn create_gallery(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Json(draft): Json<GalleryDraft>,
) -> AppResult<(StatusCode, Json<PortfolioGallery>)> {
    let gallery = state.admin.create_gallery(&who, draft).await?;
    Ok((StatusCode::CREATED, Json(gallery)))
}

pub async fn update_gallery(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<GalleryId>,
    Json(draft): Json<GalleryDraft>,
) -> AppResult<Json<PortfolioGallery>> {
    Ok(Json(state.admin.update_gallery(&who, id, draft).await?))
}

pub async fn delete_gallery(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<GalleryId>,
) -> AppResult<StatusCode> {
    state.admin.delete_gallery(&who, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn sync_gallery(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<GalleryId>,
) -> AppResult<Json<SyncReport>> {
    Ok(Json(state.admin.sync_gallery(&who, id).await?))
}

pub async fn upload_photos(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<GalleryId>,
    multipart: Multipart,
) -> AppResult<Json<Value>> {
    let files = read_files(multipart, "files").await?;
    let uploaded = state.admin.upload_portfolio_photos(&who, id, files).await?;
    Ok(Json(json!({ "uploaded": uploaded })))
}

// Photos

#[derive(Debug, Default, Deserialize)]
pub struct AdminPhotosQuery {
    pub gallery: Option<GalleryId>,
}

pub async fn list_photos(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Query(query): Query<AdminPhotosQuery>,
) -> AppResult<Json<Vec<PortfolioPhoto>>> {
    Ok(Json(state.admin.list_photos(&who, query.gallery).await?))
}

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub is_visible: bool,
}

pub async fn set_photo_visibility(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<PhotoId>,
    Json(body): Json<VisibilityRequest>,
) -> AppResult<StatusCode> {
    state
        .admin
        .set_photo_visibility(&who, id, body.is_visible)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<PhotoId>,
}

pub async fn reorder_photos(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Json(body): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    state.admin.reorder_photos(&who, &body.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub gallery_id: GalleryId,
}

pub async fn move_photo(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<PhotoId>,
    Json(body): Json<MoveRequest>,
) -> AppResult<StatusCode> {
    state.admin.move_photo(&who, id, body.gallery_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_photo(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<PhotoId>,
) -> AppResult<StatusCode> {
    state.admin.delete_photo(&who, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Pages

#[derive(Debug, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

pub async fn save_page(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
    Json(body): Json<PageRequest>,
) -> AppResult<Json<Page>> {
    let locale = state.locale(query.locale.as_deref());
    let page = state
        .admin
        .save_page(&who, &slug, locale, &body.title, &body.content)
        .await?;
    Ok(Json(page))
}

// Videos

#[derive(Debug, Deserialize)]
pub struct VideoIdRequest {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct VideoIdResponse {
    pub id: String,
}

pub async fn hidden_videos(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.admin.hidden_video_ids(&who).await?))
}

pub async fn hide_video(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Json(body): Json<VideoIdRequest>,
) -> AppResult<Json<VideoIdResponse>> {
    let id = state.admin.hide_video(&who, &body.id).await?;
    Ok(Json(VideoIdResponse { id }))
}

pub async fn unhide_video(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<String>,
) -> AppResult<Json<VideoIdResponse>> {
    let id = state.admin.unhide_video(&who, &id).await?;
    Ok(Json(VideoIdResponse { id }))
}

pub async fn custom_videos(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.admin.custom_video_ids(&who).await?))
}

pub async fn add_custom_video(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Json(body): Json<VideoIdRequest>,
) -> AppResult<Json<VideoIdResponse>> {
    let id = state.admin.add_custom_video(&who, &body.id).await?;
    Ok(Json(VideoIdResponse { id }))
}

pub async fn remove_custom_video(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Path(id): Path<String>,
) -> AppResult<Json<VideoIdResponse>> {
    let id = state.admin.remove_custom_video(&who, &id).await?;
    Ok(Json(VideoIdResponse { id }))
}

// Contact

#[derive(Debug, Default, Deserialize)]
pub struct ContactListQuery {
    pub limit: Option<i64>,
}

pub async fn contact_submissions(
    State(state): State<AppState>,
    Extension(who): Extension<AdminIdentity>,
    Query(query): Query<ContactListQuery>,
) -> AppResult<Json<Vec<ContactSubmission>>> {
    let limit = query.limit.unwrap_or(100);
    Ok(Json(state.admin.contact_submissions(&who, limit).await?))
}

/// Collects every multipart part named `field` as an [`UploadFile`].
async fn read_files(mut multipart: Multipart, field: &str) -> AppResult<Vec<UploadFile>> {
    let mut files = Vec::new();
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let file_name = part.file_name().unwrap_or_default().to_string();
        let content_type = part.content_type().map(str::to_string);
        let bytes = part
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            continue;
        }
        let mut file = UploadFile::new(file_name, bytes.to_vec());
        if let Some(ct) = content_type {
            file = file.with_content_type(ct);
        }
        files.push(file);
    }
    Ok(files)
}
