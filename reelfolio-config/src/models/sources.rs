use std::path::PathBuf;

use serde::Deserialize;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub storage: FileStorageConfig,
    #[serde(default)]
    pub cache: FileCacheConfig,
    #[serde(default)]
    pub admin: FileAdminConfig,
    #[serde(default)]
    pub video: FileVideoConfig,
    #[serde(default)]
    pub site: FileSiteConfig,
    #[serde(default)]
    pub content: FileContentConfig,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileDatabaseConfig {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
}

/// Durations are humantime strings such as `"1h"` or `"15s"`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileStorageConfig {
    pub url: Option<String>,
    pub service_key: Option<String>,
    pub anon_key: Option<String>,
    pub site_bucket: Option<String>,
    pub projects_bucket: Option<String>,
    pub portfolio_bucket: Option<String>,
    pub portfolio_folder: Option<String>,
    pub signed_url_ttl: Option<String>,
    pub request_timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileCacheConfig {
    pub url_capacity: Option<u64>,
    pub url_ttl: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileAdminConfig {
    pub emails: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileVideoConfig {
    pub vimeo_token: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileSiteConfig {
    pub url: Option<String>,
    pub default_locale: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileContentConfig {
    pub legacy_projects_path: Option<PathBuf>,
}

/// Environment-derived configuration values. Blank variables read as unset.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub database_max_connections: Option<u32>,
    pub storage_url: Option<String>,
    pub storage_service_key: Option<String>,
    pub storage_anon_key: Option<String>,
    pub site_bucket: Option<String>,
    pub projects_bucket: Option<String>,
    pub portfolio_bucket: Option<String>,
    pub portfolio_folder: Option<String>,
    pub signed_url_ttl: Option<String>,
    pub request_timeout: Option<String>,
    pub url_cache_capacity: Option<u64>,
    pub url_cache_ttl: Option<String>,
    pub admin_emails: Option<Vec<String>>,
    pub vimeo_token: Option<String>,
    pub site_url: Option<String>,
    pub default_locale: Option<String>,
    pub legacy_projects_path: Option<PathBuf>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let first = |names: &[&str]| names.iter().find_map(|name| var(name));

        Self {
            config_path: var("REELFOLIO_CONFIG").map(PathBuf::from),
            server_host: var("SERVER_HOST"),
            server_port: first(&["SERVER_PORT", "PORT"])
                .and_then(|s| s.parse().ok()),
            database_url: var("DATABASE_URL"),
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok()),
            storage_url: first(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]),
            storage_service_key: var("SUPABASE_SERVICE_ROLE_KEY"),
            storage_anon_key: first(&[
                "SUPABASE_ANON_KEY",
                "NEXT_PUBLIC_SUPABASE_ANON_KEY",
            ]),
            site_bucket: var("SUPABASE_STORAGE_BUCKET"),
            projects_bucket: var("SUPABASE_PROJECTS_BUCKET"),
            portfolio_bucket: var("PORTFOLIO_GALLERY_BUCKET"),
            portfolio_folder: var("PORTFOLIO_GALLERY_FOLDER"),
            signed_url_ttl: var("SIGNED_URL_TTL"),
            request_timeout: var("REQUEST_TIMEOUT"),
            url_cache_capacity: var("URL_CACHE_CAPACITY")
                .and_then(|s| s.parse().ok()),
            url_cache_ttl: var("URL_CACHE_TTL"),
            admin_emails: var("ADMIN_EMAILS").map(|raw| parse_csv(&raw)),
            vimeo_token: var("VIMEO_ACCESS_TOKEN"),
            site_url: first(&["SITE_URL", "NEXT_PUBLIC_SITE_URL"]),
            default_locale: var("DEFAULT_LOCALE"),
            legacy_projects_path: var("LEGACY_PROJECTS_PATH").map(PathBuf::from),
        }
    }
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn public_fallback_names_are_read() {
        let env = env(&[
            ("NEXT_PUBLIC_SUPABASE_URL", "https://demo.supabase.co"),
            ("PORT", "8080"),
            ("ADMIN_EMAILS", "a@x.com, ,b@x.com"),
            ("VIMEO_ACCESS_TOKEN", "   "),
        ]);
        assert_eq!(env.storage_url.as_deref(), Some("https://demo.supabase.co"));
        assert_eq!(env.server_port, Some(8080));
        assert_eq!(
            env.admin_emails,
            Some(vec!["a@x.com".to_string(), "b@x.com".to_string()])
        );
        assert_eq!(env.vimeo_token, None);
    }

    #[test]
    fn primary_name_wins_over_fallback() {
        let env = env(&[
            ("SUPABASE_URL", "https://primary.supabase.co"),
            ("NEXT_PUBLIC_SUPABASE_URL", "https://public.supabase.co"),
        ]);
        assert_eq!(
            env.storage_url.as_deref(),
            Some("https://primary.supabase.co")
        );
    }
}
