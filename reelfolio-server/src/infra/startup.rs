use std::sync::Arc;

use anyhow::Context;
use reelfolio_config::Config;
use reelfolio_core::AppUnitOfWork;
use reelfolio_core::auth::{AuthClient, StaticTokenAuth, SupabaseAuthClient};
use reelfolio_core::content::LegacyProjects;
use reelfolio_core::database::{DatabaseContext, PoolSettings};
use reelfolio_core::storage::{
    InMemoryObjectStorage, ObjectStorage, SupabaseStorageClient,
};
use reelfolio_core::video::{VideoSource, VimeoClient};
use tracing::{info, warn};

use super::app_state::{AppState, StateComponents, StateSettings};

pub fn pool_settings(config: &Config) -> PoolSettings {
    PoolSettings {
        max_connections: config.database.max_connections,
        ..PoolSettings::default()
    }
}

/// Wire every collaborator from configuration. Missing pieces degrade to
/// in-memory stand-ins rather than failing startup.
pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let (unit_of_work, postgres, legacy_projects) = match &config.database.url {
        Some(url) => {
            let context =
                DatabaseContext::connect_postgres(url, pool_settings(config))
                    .await
                    .context("failed to initialize database")?;
            info!("database connected and migrated");
            (context.unit_of_work(), Some(context.postgres()), None)
        }
        None => {
            let legacy =
                LegacyProjects::new(config.content.legacy_projects_path.clone());
            info!(path = %legacy.path().display(), "no database configured, serving legacy projects");
            (Arc::new(AppUnitOfWork::in_memory()), None, Some(legacy))
        }
    };

    let timeout = config.storage.request_timeout;
    let (storage, auth): (Arc<dyn ObjectStorage>, Arc<dyn AuthClient>) =
        match &config.storage.url {
            Some(url) => {
                let service_key =
                    config.storage.service_key.clone().unwrap_or_default();
                let storage = SupabaseStorageClient::new(url, service_key, timeout)
                    .context("failed to build storage client")?;
                let anon_key = config
                    .storage
                    .anon_key
                    .clone()
                    .or_else(|| config.storage.service_key.clone())
                    .unwrap_or_default();
                let auth = SupabaseAuthClient::new(url, anon_key, timeout)
                    .context("failed to build auth client")?;
                let storage: Arc<dyn ObjectStorage> = Arc::new(storage);
                let auth: Arc<dyn AuthClient> = Arc::new(auth);
                (storage, auth)
            }
            None => {
                warn!("storage not configured; admin sign-in is disabled");
                let storage: Arc<dyn ObjectStorage> =
                    Arc::new(InMemoryObjectStorage::new(""));
                let auth: Arc<dyn AuthClient> = Arc::new(StaticTokenAuth::new());
                (storage, auth)
            }
        };

    let video_source: Arc<dyn VideoSource> = Arc::new(
        VimeoClient::new(config.video.vimeo_token.clone(), timeout)
            .context("failed to build video client")?,
    );

    let components = StateComponents {
        unit_of_work,
        storage,
        auth,
        video_source,
        postgres,
        legacy_projects,
    };
    Ok(AppState::assemble(components, StateSettings::from_config(config)))
}
