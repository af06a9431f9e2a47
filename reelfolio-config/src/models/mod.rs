//! Resolved configuration, after layering env, file and defaults.

pub mod sources;

use std::path::PathBuf;
use std::time::Duration;

use reelfolio_model::Locale;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub cache: CacheConfig,
    pub admin: AdminConfig,
    pub video: VideoConfig,
    pub site: SiteConfig,
    pub content: ContentConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `None` runs the server on in-memory repositories.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Project base URL; `None` leaves stored paths unresolved.
    pub url: Option<String>,
    pub service_key: Option<String>,
    pub anon_key: Option<String>,
    /// Covers and project gallery uploads.
    pub site_bucket: String,
    /// Portfolio photos, backstage folders and proxied images.
    pub projects_bucket: String,
    pub portfolio_bucket: Option<String>,
    pub portfolio_folder: Option<String>,
    pub signed_url_ttl: Duration,
    pub request_timeout: Duration,
}

impl StorageConfig {
    pub fn portfolio_bucket(&self) -> &str {
        self.portfolio_bucket
            .as_deref()
            .unwrap_or(&self.projects_bucket)
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("url", &self.url)
            .field("service_key", &self.service_key.as_ref().map(|_| "<redacted>"))
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<redacted>"))
            .field("site_bucket", &self.site_bucket)
            .field("projects_bucket", &self.projects_bucket)
            .field("portfolio_bucket", &self.portfolio_bucket)
            .field("portfolio_folder", &self.portfolio_folder)
            .field("signed_url_ttl", &self.signed_url_ttl)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub url_capacity: u64,
    pub url_ttl: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminConfig {
    /// Lower-cased; empty admits nobody.
    pub emails: Vec<String>,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct VideoConfig {
    pub vimeo_token: Option<String>,
}

impl std::fmt::Debug for VideoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoConfig")
            .field("vimeo_token", &self.vimeo_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub url: Option<String>,
    pub default_locale: Locale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// JSON project list served when no database is configured.
    pub legacy_projects_path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
