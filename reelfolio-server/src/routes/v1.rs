use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
};

use crate::handlers::{admin, contact, media, pages, portfolio, projects};
use crate::infra::app_state::AppState;
use crate::infra::middleware::admin_auth_middleware;

/// Upload requests may carry several full-size images.
const UPLOAD_BODY_LIMIT: usize = 50 * 1024 * 1024;

pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(create_public_routes())
        .nest("/admin", create_admin_routes(state))
}

fn create_public_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(projects::list_projects))
        .route("/projects/featured", get(projects::featured_projects))
        .route("/projects/slugs", get(projects::project_slugs))
        .route("/projects/{slug}", get(projects::project_by_slug))
        .route("/projects/{slug}/adjacent", get(projects::adjacent_projects))
        .route("/pages", get(pages::list_pages))
        .route("/pages/{slug}", get(pages::page_by_slug))
        .route("/site/urls", get(pages::site_urls))
        .route("/portfolio/galleries", get(portfolio::list_galleries))
        .route("/portfolio/photos", get(portfolio::list_photos))
        .route("/portfolio/gallery", get(portfolio::folder_gallery))
        .route("/backstage", get(media::backstage))
        .route("/videos", get(media::work_videos))
        .route("/contact", post(contact::submit_contact))
}

/// Every route here requires an allowlisted bearer token.
fn create_admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(admin::me))
        .route(
            "/projects",
            get(admin::list_projects).post(admin::create_project),
        )
        .route(
            "/projects/{id}",
            get(admin::get_project)
                .put(admin::update_project)
                .delete(admin::delete_project),
        )
        .route("/projects/{id}/publish", put(admin::publish_project))
        .route("/projects/{id}/cover", post(admin::upload_cover))
        .route("/projects/{id}/gallery", post(admin::upload_project_gallery))
        .route("/signed-url", get(admin::signed_url))
        .route(
            "/galleries",
            get(admin::list_galleries).post(admin::create_gallery),
        )
        .route(
            "/galleries/{id}",
            put(admin::update_gallery).delete(admin::delete_gallery),
        )
        .route("/galleries/{id}/sync", post(admin::sync_gallery))
        .route("/galleries/{id}/photos", post(admin::upload_photos))
        .route("/photos", get(admin::list_photos))
        .route("/photos/reorder", put(admin::reorder_photos))
        .route(
            "/photos/{id}",
            patch(admin::set_photo_visibility).delete(admin::delete_photo),
        )
        .route("/photos/{id}/move", put(admin::move_photo))
        .route("/pages/{slug}", put(admin::save_page))
        .route(
            "/videos/hidden",
            get(admin::hidden_videos).post(admin::hide_video),
        )
        .route(
            "/videos/hidden/{id}",
            delete(admin::unhide_video),
        )
        .route(
            "/videos/custom",
            get(admin::custom_videos).post(admin::add_custom_video),
        )
        .route(
            "/videos/custom/{id}",
            delete(admin::remove_custom_video),
        )
        .route("/contact", get(admin::contact_submissions))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .route_layer(middleware::from_fn_with_state(
            state,
            admin_auth_middleware,
        ))
}
