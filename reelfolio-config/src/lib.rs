//! Configuration for the Reelfolio server.
//!
//! [`ConfigLoader`] layers environment variables (after `.env`) over an
//! optional `reelfolio.toml`, over built-in defaults, and reports the
//! degraded-but-valid situations it finds as [`ConfigWarnings`].

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    AdminConfig, CacheConfig, Config, ConfigMetadata, ContentConfig,
    DatabaseConfig, ServerConfig, SiteConfig, StorageConfig, VideoConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
