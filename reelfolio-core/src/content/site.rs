use reelfolio_model::Locale;
use serde::Serialize;

pub const DEFAULT_SITE_URL: &str = "https://pablogoldberg.com";

/// Absolute alternate URLs for the two locales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HreflangUrls {
    pub es: String,
    pub en: String,
}

impl HreflangUrls {
    pub fn for_locale(&self, locale: Locale) -> &str {
        match locale {
            Locale::Es => &self.es,
            Locale::En => &self.en,
        }
    }
}

/// Canonical and alternate URLs rooted at the public site address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    base: String,
}

impl Default for SiteUrls {
    fn default() -> Self {
        Self::new(None)
    }
}

fn leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

impl SiteUrls {
    /// Blank or missing bases fall back to the production address.
    pub fn new(base: Option<&str>) -> Self {
        let base = base
            .map(|b| b.trim().trim_end_matches('/'))
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_SITE_URL);
        Self {
            base: base.to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn canonical_url(&self, path: &str) -> String {
        format!("{}{}", self.base, leading_slash(path))
    }

    /// `path` is given without its locale prefix (`""`, `/work`, ...).
    pub fn hreflang_urls(&self, path: &str) -> HreflangUrls {
        let path = leading_slash(path);
        HreflangUrls {
            es: format!("{}/es{path}", self.base),
            en: format!("{}/en{path}", self.base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_avoids_double_slash() {
        let site = SiteUrls::new(Some("https://example.com/"));
        assert_eq!(site.canonical_url("/work"), "https://example.com/work");
        assert_eq!(site.canonical_url("about"), "https://example.com/about");
    }

    #[test]
    fn hreflang_prefixes_locale() {
        let urls = SiteUrls::default().hreflang_urls("/work/bestefar");
        assert_eq!(urls.es, "https://pablogoldberg.com/es/work/bestefar");
        assert_eq!(urls.en, "https://pablogoldberg.com/en/work/bestefar");
        assert_eq!(
            SiteUrls::default().hreflang_urls("").for_locale(Locale::En),
            "https://pablogoldberg.com/en/"
        );
    }
}
