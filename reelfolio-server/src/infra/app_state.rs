use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reelfolio_config::Config;
use reelfolio_core::AppUnitOfWork;
use reelfolio_core::admin::AdminActions;
use reelfolio_core::auth::{AdminAllowlist, AuthClient};
use reelfolio_core::contact::ContactService;
use reelfolio_core::content::{
    BackstageLister, LegacyProjects, PageCatalog, PortfolioFolders,
    PosterResolver, ProjectCatalog, ProjectSource, SiteUrls,
};
use reelfolio_core::database::PostgresDatabase;
use reelfolio_core::database::ports::galleries::GalleriesRepository;
use reelfolio_core::storage::{
    Buckets, DEFAULT_SIGNED_URL_TTL, ObjectStorage, StorageUrls, UrlCache,
};
use reelfolio_core::sync::PortfolioSync;
use reelfolio_core::video::{VideoLibrary, VideoSource};
use reelfolio_model::Locale;

/// Values read from [`Config`] that shape the services.
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub storage_url: Option<String>,
    pub buckets: Buckets,
    pub portfolio_bucket: String,
    pub portfolio_folder: Option<String>,
    pub signed_url_ttl: Duration,
    pub url_cache: UrlCache,
    pub allowlist: AdminAllowlist,
    pub site_url: Option<String>,
    pub default_locale: Locale,
}

impl Default for StateSettings {
    fn default() -> Self {
        let buckets = Buckets::default();
        Self {
            storage_url: None,
            portfolio_bucket: buckets.projects.clone(),
            buckets,
            portfolio_folder: None,
            signed_url_ttl: DEFAULT_SIGNED_URL_TTL,
            url_cache: UrlCache::default(),
            allowlist: AdminAllowlist::default(),
            site_url: None,
            default_locale: Locale::default(),
        }
    }
}

impl StateSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            storage_url: config.storage.url.clone(),
            buckets: Buckets {
                site: config.storage.site_bucket.clone(),
                projects: config.storage.projects_bucket.clone(),
            },
            portfolio_bucket: config.storage.portfolio_bucket().to_string(),
            portfolio_folder: config.storage.portfolio_folder.clone(),
            signed_url_ttl: config.storage.signed_url_ttl,
            url_cache: UrlCache::new(
                config.cache.url_capacity,
                config.cache.url_ttl,
            ),
            allowlist: AdminAllowlist::new(&config.admin.emails),
            site_url: config.site.url.clone(),
            default_locale: config.site.default_locale,
        }
    }
}

/// Collaborators handed to [`AppState::assemble`].
#[derive(Clone)]
pub struct StateComponents {
    pub unit_of_work: Arc<AppUnitOfWork>,
    pub storage: Arc<dyn ObjectStorage>,
    pub auth: Arc<dyn AuthClient>,
    pub video_source: Arc<dyn VideoSource>,
    pub postgres: Option<Arc<PostgresDatabase>>,
    /// Serves projects from JSON instead of the projects repository.
    pub legacy_projects: Option<LegacyProjects>,
}

impl fmt::Debug for StateComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateComponents")
            .field("unit_of_work", &self.unit_of_work)
            .field("storage", &self.storage)
            .field("auth", &self.auth)
            .field("postgres", &self.postgres.is_some())
            .field("legacy_projects", &self.legacy_projects)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub unit_of_work: Arc<AppUnitOfWork>,
    pub postgres: Option<Arc<PostgresDatabase>>,
    pub storage: Arc<dyn ObjectStorage>,
    pub urls: StorageUrls,
    pub buckets: Buckets,
    pub signed_url_ttl: Duration,
    pub default_locale: Locale,
    pub projects: Arc<ProjectCatalog>,
    pub pages: Arc<PageCatalog>,
    pub galleries: Arc<dyn GalleriesRepository>,
    pub portfolio: Arc<PortfolioSync>,
    pub portfolio_folders: Arc<PortfolioFolders>,
    pub backstage: Arc<BackstageLister>,
    pub videos: Arc<VideoLibrary>,
    pub site: Arc<SiteUrls>,
    pub contact: Arc<ContactService>,
    pub admin: Arc<AdminActions>,
    pub auth: Arc<dyn AuthClient>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("buckets", &self.buckets)
            .field("postgres", &self.postgres.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn assemble(components: StateComponents, settings: StateSettings) -> Self {
        let StateComponents {
            unit_of_work,
            storage,
            auth,
            video_source,
            postgres,
            legacy_projects,
        } = components;
        let urls =
            StorageUrls::new(settings.storage_url.as_deref(), settings.url_cache.clone());
        let buckets = settings.buckets.clone();

        let posters = PosterResolver::new(
            urls.clone(),
            buckets.site.clone(),
            Some(video_source.clone()),
            settings.url_cache.clone(),
        );
        let source = match legacy_projects {
            Some(legacy) => ProjectSource::Legacy(legacy),
            None => ProjectSource::Database(unit_of_work.projects.clone()),
        };
        let projects =
            ProjectCatalog::new(source, urls.clone(), buckets.site.clone(), posters);

        let portfolio = PortfolioSync::new(
            storage.clone(),
            unit_of_work.photos.clone(),
            urls.clone(),
            settings.portfolio_bucket.clone(),
        );
        let videos =
            VideoLibrary::new(video_source, unit_of_work.video_ids.clone());
        let admin = AdminActions::new(
            unit_of_work.as_ref().clone(),
            storage.clone(),
            urls.clone(),
            buckets.clone(),
            portfolio.clone(),
            videos.clone(),
            settings.allowlist.clone(),
        );

        Self {
            pages: Arc::new(PageCatalog::new(unit_of_work.pages.clone())),
            galleries: unit_of_work.galleries.clone(),
            portfolio_folders: Arc::new(PortfolioFolders::new(
                storage.clone(),
                urls.clone(),
                settings.portfolio_bucket.clone(),
                settings.portfolio_folder.as_deref(),
            )),
            backstage: Arc::new(BackstageLister::new(
                storage.clone(),
                urls.clone(),
                buckets.projects.clone(),
            )),
            contact: Arc::new(ContactService::new(unit_of_work.contact.clone())),
            site: Arc::new(SiteUrls::new(settings.site_url.as_deref())),
            projects: Arc::new(projects),
            portfolio: Arc::new(portfolio),
            videos: Arc::new(videos),
            admin: Arc::new(admin),
            unit_of_work,
            postgres,
            storage,
            urls,
            buckets,
            signed_url_ttl: settings.signed_url_ttl,
            default_locale: settings.default_locale,
            auth,
        }
    }

    /// `?locale=` value, or the configured default when absent or unknown.
    pub fn locale(&self, raw: Option<&str>) -> Locale {
        raw.and_then(|l| l.parse().ok())
            .unwrap_or(self.default_locale)
    }
}
