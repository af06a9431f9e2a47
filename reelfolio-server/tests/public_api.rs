mod common;

use axum::http::StatusCode;
use common::{ADMIN_TOKEN, STORAGE_URL, build_test_app};
use serde_json::{Value, json};

#[tokio::test]
async fn health_reports_disabled_database() {
    let app = build_test_app();
    let response = app.server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "disabled");
    assert_eq!(body["storage"], true);
}

#[tokio::test]
async fn contact_submission_is_stored() {
    let app = build_test_app();
    let response = app
        .server
        .post("/api/v1/contact")
        .json(&json!({
            "name": "Ana",
            "email_or_whatsapp": "ana@example.com",
            "message": "Hola"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["ok"], true);

    let listed = app
        .server
        .get("/api/v1/admin/contact")
        .authorization_bearer(ADMIN_TOKEN)
        .await;
    listed.assert_status_ok();
    let rows: Vec<Value> = listed.json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Ana");
}

#[tokio::test]
async fn contact_submission_requires_every_field() {
    let app = build_test_app();
    let response = app
        .server
        .post("/api/v1/contact")
        .json(&json!({ "name": "Ana", "message": "  " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn unknown_project_is_not_found() {
    let app = build_test_app();
    app.server
        .get("/api/v1/projects/missing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let list: Vec<Value> = app.server.get("/api/v1/projects").await.json();
    assert!(list.is_empty());
}

#[tokio::test]
async fn default_gallery_is_listed() {
    let app = build_test_app();
    let galleries: Vec<Value> =
        app.server.get("/api/v1/portfolio/galleries").await.json();
    assert_eq!(galleries.len(), 1);
    assert_eq!(galleries[0]["slug"], "portfolio");
}

#[tokio::test]
async fn site_urls_cover_both_locales() {
    let app = build_test_app();
    let body: Value = app
        .server
        .get("/api/v1/site/urls")
        .add_query_param("path", "/work")
        .await
        .json();
    assert_eq!(body["canonical"], "https://reel.test/work");
    assert_eq!(body["alternates"]["es"], "https://reel.test/es/work");
    assert_eq!(body["alternates"]["en"], "https://reel.test/en/work");
}

#[tokio::test]
async fn videos_come_from_the_reel_source() {
    let app = build_test_app();
    let videos: Vec<Value> = app.server.get("/api/v1/videos").await.json();
    let ids: Vec<&str> = videos.iter().filter_map(|v| v["id"].as_str()).collect();
    assert_eq!(ids, ["111", "222"]);
}

#[tokio::test]
async fn proxy_serves_project_objects_with_cache_headers() {
    let app = build_test_app();
    app.storage.put("projects", "backstage/shoot one.jpg", b"jpeg".to_vec()).await;

    let response = app
        .server
        .get("/api/proxy-image")
        .add_query_param("path", "backstage/shoot one.jpg")
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.header("cache-control"),
        "public, max-age=86400, s-maxage=86400"
    );
    assert_eq!(response.header("content-type"), "application/octet-stream");
    assert_eq!(response.as_bytes().as_ref(), b"jpeg");
}

#[tokio::test]
async fn proxy_forbids_foreign_urls() {
    let app = build_test_app();
    let response = app
        .server
        .get("/api/proxy-image")
        .add_query_param("url", "https://elsewhere.test/a.jpg")
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Forbidden");
    assert_eq!(body["error"]["status"], 403);
}

#[tokio::test]
async fn proxy_rejects_unsafe_paths() {
    let app = build_test_app();
    app.server
        .get("/api/proxy-image")
        .add_query_param("path", "../secrets/key.jpg")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .get("/api/proxy-image")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn proxy_reports_missing_objects() {
    let app = build_test_app();
    let url = format!("{STORAGE_URL}/storage/v1/object/public/projects/x/none.jpg");
    app.server
        .get("/api/proxy-image")
        .add_query_param("url", url)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
