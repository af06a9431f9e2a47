use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use once_cell::sync::Lazy;
use reelfolio_model::Locale;
use thiserror::Error;
use url::Url;

use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{
    AdminConfig, CacheConfig, Config, ConfigMetadata, ContentConfig,
    DatabaseConfig, ServerConfig, SiteConfig, StorageConfig, VideoConfig,
};
use crate::validation::{self, ConfigWarnings};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("reelfolio.toml"),
        PathBuf::from("config/reelfolio.toml"),
    ]
});

const DEFAULT_SIGNED_URL_TTL: Duration = Duration::from_secs(60 * 60);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_URL_CACHE_CAPACITY: u64 = 4096;
const DEFAULT_URL_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid duration for {field}: '{value}'")]
    InvalidDuration {
        field: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("invalid URL for {field}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported default locale '{value}'")]
    InvalidLocale { value: String },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_from(EnvConfig::gather(), env_file_loaded)
    }

    /// Resolve against an already gathered environment.
    pub fn load_from(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file, config_path) = self.load_file_config(&env)?;
        let mut warnings = ConfigWarnings::default();
        if config_path.is_none() {
            warnings.push_with_hint(
                "No reelfolio.toml detected; using environment variables and defaults",
                "Create reelfolio.toml or point REELFOLIO_CONFIG at one",
            );
        }
        let metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
        };
        let config = compose_config(file.unwrap_or_default(), env, metadata)?;
        warnings.extend(validation::degraded_settings(&config));
        Ok(ConfigLoad { config, warnings })
    }

    /// An explicit or `REELFOLIO_CONFIG` path must exist; default locations
    /// are optional.
    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let required = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());
        let path = match required {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(path) => path.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file: FileConfig =
            toml::from_str(&contents).map_err(|source| {
                ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;
        Ok((Some(file), Some(path)))
    }
}

fn duration(
    field: &'static str,
    raw: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigLoadError> {
    match raw {
        None => Ok(default),
        Some(value) => humantime::parse_duration(&value).map_err(|source| {
            ConfigLoadError::InvalidDuration {
                field,
                value,
                source,
            }
        }),
    }
}

/// Parsed and stripped of any trailing slash.
fn base_url(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<String>, ConfigLoadError> {
    let Some(raw) = raw.map(|r| r.trim().to_string()).filter(|r| !r.is_empty())
    else {
        return Ok(None);
    };
    Url::parse(&raw)
        .map_err(|source| ConfigLoadError::InvalidUrl { field, source })?;
    Ok(Some(raw.trim_end_matches('/').to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Environment over file over defaults, field by field.
fn compose_config(
    file: FileConfig,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<Config, ConfigLoadError> {
    let FileConfig {
        server: file_server,
        database: file_database,
        storage: file_storage,
        cache: file_cache,
        admin: file_admin,
        video: file_video,
        site: file_site,
        content: file_content,
    } = file;

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| "0.0.0.0".to_string()),
        port: env.server_port.or(file_server.port).unwrap_or(3000),
    };

    let database = DatabaseConfig {
        url: non_blank(env.database_url.or(file_database.url)),
        max_connections: env
            .database_max_connections
            .or(file_database.max_connections)
            .unwrap_or(10),
    };

    let storage = StorageConfig {
        url: base_url("storage.url", env.storage_url.or(file_storage.url))?,
        service_key: non_blank(
            env.storage_service_key.or(file_storage.service_key),
        ),
        anon_key: non_blank(env.storage_anon_key.or(file_storage.anon_key)),
        site_bucket: non_blank(env.site_bucket.or(file_storage.site_bucket))
            .unwrap_or_else(|| "public".to_string()),
        projects_bucket: non_blank(
            env.projects_bucket.or(file_storage.projects_bucket),
        )
        .unwrap_or_else(|| "projects".to_string()),
        portfolio_bucket: non_blank(
            env.portfolio_bucket.or(file_storage.portfolio_bucket),
        ),
        portfolio_folder: non_blank(
            env.portfolio_folder.or(file_storage.portfolio_folder),
        ),
        signed_url_ttl: duration(
            "storage.signed_url_ttl",
            env.signed_url_ttl.or(file_storage.signed_url_ttl),
            DEFAULT_SIGNED_URL_TTL,
        )?,
        request_timeout: duration(
            "storage.request_timeout",
            env.request_timeout.or(file_storage.request_timeout),
            DEFAULT_REQUEST_TIMEOUT,
        )?,
    };

    let cache = CacheConfig {
        url_capacity: env
            .url_cache_capacity
            .or(file_cache.url_capacity)
            .unwrap_or(DEFAULT_URL_CACHE_CAPACITY),
        url_ttl: duration(
            "cache.url_ttl",
            env.url_cache_ttl.or(file_cache.url_ttl),
            DEFAULT_URL_CACHE_TTL,
        )?,
    };

    let admin = AdminConfig {
        emails: env
            .admin_emails
            .or(file_admin.emails)
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect(),
    };

    let video = VideoConfig {
        vimeo_token: non_blank(env.vimeo_token.or(file_video.vimeo_token)),
    };

    let default_locale = match non_blank(
        env.default_locale.or(file_site.default_locale),
    ) {
        None => Locale::default(),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigLoadError::InvalidLocale { value })?,
    };
    let site = SiteConfig {
        url: base_url("site.url", env.site_url.or(file_site.url))?,
        default_locale,
    };

    let content = ContentConfig {
        legacy_projects_path: env
            .legacy_projects_path
            .or(file_content.legacy_projects_path)
            .unwrap_or_else(|| PathBuf::from("content/projects.json")),
    };

    Ok(Config {
        server,
        database,
        storage,
        cache,
        admin,
        video,
        site,
        content,
        metadata,
    })
}
