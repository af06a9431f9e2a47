use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use reelfolio_core::AppUnitOfWork;
use reelfolio_core::auth::{AdminAllowlist, StaticTokenAuth};
use reelfolio_core::storage::InMemoryObjectStorage;
use reelfolio_core::video::{ProviderError, VideoSource};
use reelfolio_model::VimeoVideo;
use reelfolio_server::{
    AppState, create_app,
    infra::app_state::{StateComponents, StateSettings},
};

pub const STORAGE_URL: &str = "https://store.test";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const VISITOR_TOKEN: &str = "visitor-token";
pub const ADMIN_EMAIL: &str = "director@example.com";

/// Fixed two-video reel.
#[derive(Debug)]
pub struct FixedVideos;

#[async_trait]
impl VideoSource for FixedVideos {
    async fn portfolio_videos(&self) -> Result<Vec<VimeoVideo>, ProviderError> {
        Ok(vec![video("111", "Reel"), video("222", "Spot")])
    }

    async fn thumbnail_for(
        &self,
        id: &str,
    ) -> Result<Option<String>, ProviderError> {
        Ok(Some(format!("https://i.vimeocdn.test/{id}.jpg")))
    }
}

fn video(id: &str, name: &str) -> VimeoVideo {
    VimeoVideo {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: None,
        link: format!("https://vimeo.com/{id}"),
        duration: 60,
        release_time: None,
    }
}

// Code is used by test modules, but not in this scope
#[allow(unused)]
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<InMemoryObjectStorage>,
    pub state: AppState,
}

/// In-memory repositories and storage, one allowlisted admin token and one
/// signed-in but unlisted visitor token.
#[allow(unused)]
pub fn build_test_app() -> TestApp {
    let storage = Arc::new(InMemoryObjectStorage::new(STORAGE_URL));
    let auth = StaticTokenAuth::new()
        .with_token(ADMIN_TOKEN, ADMIN_EMAIL)
        .with_token(VISITOR_TOKEN, "visitor@example.com");

    let components = StateComponents {
        unit_of_work: Arc::new(AppUnitOfWork::in_memory()),
        storage: storage.clone(),
        auth: Arc::new(auth),
        video_source: Arc::new(FixedVideos),
        postgres: None,
        legacy_projects: None,
    };
    let settings = StateSettings {
        storage_url: Some(STORAGE_URL.to_string()),
        allowlist: AdminAllowlist::new([ADMIN_EMAIL]),
        site_url: Some("https://reel.test".to_string()),
        ..StateSettings::default()
    };
    let state = AppState::assemble(components, settings);
    let server = TestServer::new(create_app(state.clone())).unwrap();

    TestApp {
        server,
        storage,
        state,
    }
}
