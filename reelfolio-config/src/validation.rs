//! Non-fatal findings about a loaded configuration.

use crate::models::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigWarnings {
    items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint(
        &mut self,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.items.iter().any(|w| w.message.contains(needle))
    }
}

/// Settings that are valid but leave part of the site degraded.
pub fn degraded_settings(config: &Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    if config.storage.url.is_none() {
        warnings.push_with_hint(
            "Storage URL is not set; image paths will be served unresolved",
            "Set SUPABASE_URL or [storage].url",
        );
    } else if config.storage.service_key.is_none() {
        warnings.push_with_hint(
            "Storage service key is not set; uploads and private listings will fail",
            "Set SUPABASE_SERVICE_ROLE_KEY or [storage].service_key",
        );
    }

    if config.database.url.is_none() {
        warnings.push_with_hint(
            "Database URL is not set; serving in-memory data and legacy projects",
            "Set DATABASE_URL or [database].url",
        );
    }

    if config.admin.emails.is_empty() {
        warnings.push_with_hint(
            "Admin allowlist is empty; every admin action will be rejected",
            "Set ADMIN_EMAILS to a comma-separated list",
        );
    }

    if config.video.vimeo_token.is_none() {
        warnings.push("Vimeo token is not set; the work listing will be empty");
    }

    warnings
}
