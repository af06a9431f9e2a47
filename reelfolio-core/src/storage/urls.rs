//! Display URLs for stored objects.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reelfolio_model::RenderSize;
use tracing::warn;

use super::client::ObjectStorage;
use super::url_cache::UrlCache;

pub const DEFAULT_SIGNED_URL_TTL: Duration = Duration::from_secs(60 * 60);

static PROXY_ROOT_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9-]+$").expect("static proxy segment pattern")
});

/// Percent-encode each `/`-separated segment independently. A leading `/`
/// is dropped.
pub fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Paths accepted by the image proxy: no `..`, at least two segments, and a
/// first segment made of `[a-z0-9-]` only.
pub fn is_safe_proxy_path(path: &str) -> bool {
    let decoded = match urlencoding::decode(path) {
        Ok(decoded) => decoded,
        Err(_) => return false,
    };
    let decoded = decoded.trim();
    if decoded.is_empty() || decoded.contains("..") {
        return false;
    }
    let parts: Vec<&str> = decoded.split('/').filter(|p| !p.is_empty()).collect();
    parts.len() >= 2 && PROXY_ROOT_SEGMENT.is_match(parts[0])
}

/// Builds public, transformed and signed URLs for one storage deployment.
#[derive(Debug, Clone)]
pub struct StorageUrls {
    base_url: Option<String>,
    cache: UrlCache,
}

impl StorageUrls {
    pub fn new(base_url: Option<&str>, cache: UrlCache) -> Self {
        let base_url = base_url
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty());
        Self { base_url, cache }
    }

    /// Builder with no storage deployment; every URL degrades.
    pub fn unconfigured() -> Self {
        Self::new(None, UrlCache::default())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn cache(&self) -> &UrlCache {
        &self.cache
    }

    /// `{base}/storage/v1/object/public/{bucket}/` or `None` without a base.
    pub fn public_prefix(&self, bucket: Option<&str>) -> Option<String> {
        let base = self.base_url.as_deref()?;
        Some(match bucket {
            Some(bucket) => format!(
                "{base}/storage/v1/object/public/{}/",
                bucket.trim_end_matches('/')
            ),
            None => format!("{base}/storage/v1/object/public/"),
        })
    }

    /// Public object URL. Empty path gives an empty string; a missing base
    /// URL gives the raw path back.
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        match self.public_prefix(Some(bucket)) {
            Some(prefix) => format!("{prefix}{}", encode_path(path)),
            None => path.to_string(),
        }
    }

    /// Transformed rendition through the image render endpoint. Empty when
    /// the path is empty or no base URL is configured.
    pub fn render_image_url(
        &self,
        bucket: &str,
        path: &str,
        size: RenderSize,
    ) -> String {
        if path.is_empty() {
            return String::new();
        }
        let key = UrlCache::key(bucket, path, size.as_str());
        self.cache.get_or_compute(key, || {
            let Some(base) = self.base_url.as_deref() else {
                return String::new();
            };
            format!(
                "{base}/storage/v1/render/image/public/{}/{}?width={}&quality={}",
                bucket.trim_end_matches('/'),
                encode_path(path),
                size.width(),
                size.quality()
            )
        })
    }

    pub fn thumb_url(&self, bucket: &str, path: &str) -> String {
        self.render_image_url(bucket, path, RenderSize::Thumb)
    }

    pub fn large_url(&self, bucket: &str, path: &str) -> String {
        self.render_image_url(bucket, path, RenderSize::Large)
    }

    /// Whether `url` points into this deployment's public object space.
    pub fn is_public_object_url(&self, url: &str) -> bool {
        self.public_prefix(None)
            .is_some_and(|prefix| url.starts_with(&prefix))
    }

    /// Upstream URL for a proxied `?path=` request, re-encoding each decoded
    /// segment. `None` for unsafe paths or when storage is not configured.
    pub fn proxy_target_url(&self, bucket: &str, path: &str) -> Option<String> {
        if !is_safe_proxy_path(path) {
            return None;
        }
        let prefix = self.public_prefix(Some(bucket))?;
        let encoded = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| {
                let decoded = urlencoding::decode(segment)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| segment.to_string());
                urlencoding::encode(&decoded).into_owned()
            })
            .collect::<Vec<_>>()
            .join("/");
        Some(format!("{prefix}{encoded}"))
    }

    /// Ask storage for a signed URL, falling back to the public URL on any
    /// failure or empty answer. Never retried.
    pub async fn signed_object_url(
        &self,
        storage: &dyn ObjectStorage,
        bucket: &str,
        path: &str,
        ttl: Duration,
    ) -> String {
        if path.is_empty() {
            return String::new();
        }
        let key = path.trim_start_matches('/');
        match storage.create_signed_url(bucket, key, ttl).await {
            Ok(url) if !url.is_empty() => url,
            Ok(_) => self.public_object_url(bucket, path),
            Err(err) => {
                warn!(bucket, path, error = %err, "signed url failed, using public url");
                self.public_object_url(bucket, path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryObjectStorage;

    const BASE: &str = "https://demo.supabase.co";

    fn urls() -> StorageUrls {
        StorageUrls::new(Some("https://demo.supabase.co/"), UrlCache::default())
    }

    #[test]
    fn public_url_encodes_segments_independently() {
        assert_eq!(
            urls().public_object_url("bucket/", "/a/b c.jpg"),
            format!("{BASE}/storage/v1/object/public/bucket/a/b%20c.jpg")
        );
    }

    #[test]
    fn public_url_degrades_without_base() {
        let urls = StorageUrls::unconfigured();
        assert_eq!(urls.public_object_url("public", "a/b.jpg"), "a/b.jpg");
        assert_eq!(urls.public_object_url("public", ""), "");
        assert_eq!(urls.thumb_url("public", "a/b.jpg"), "");
    }

    #[test]
    fn render_urls_carry_size_parameters() {
        let urls = urls();
        assert_eq!(
            urls.thumb_url("projects", "portfolio/a.jpg"),
            format!(
                "{BASE}/storage/v1/render/image/public/projects/portfolio/a.jpg?width=600&quality=60"
            )
        );
        assert!(urls.large_url("projects", "a.jpg").ends_with("?width=1600&quality=70"));
        assert_eq!(urls.thumb_url("projects", ""), "");
    }

    #[test]
    fn cached_and_uncached_render_urls_match() {
        let cached = urls();
        let first = cached.thumb_url("projects", "x/y.png");
        let second = cached.thumb_url("projects", "x/y.png");
        let fresh = urls().thumb_url("projects", "x/y.png");
        assert_eq!(first, second);
        assert_eq!(first, fresh);
    }

    #[test]
    fn proxy_paths_are_validated() {
        assert!(is_safe_proxy_path("bestefar/thumbs/photo.jpg"));
        assert!(is_safe_proxy_path("/bestefar/photo.jpg"));
        assert!(!is_safe_proxy_path("photo.jpg"));
        assert!(!is_safe_proxy_path("../etc/passwd"));
        assert!(!is_safe_proxy_path("a/%2e%2e/b"));
        assert!(!is_safe_proxy_path("Upper/photo.jpg"));
        assert!(!is_safe_proxy_path(""));
    }

    #[test]
    fn proxy_target_reencodes_segments() {
        assert_eq!(
            urls().proxy_target_url("projects", "slug/my%20photo.jpg"),
            Some(format!(
                "{BASE}/storage/v1/object/public/projects/slug/my%20photo.jpg"
            ))
        );
        assert_eq!(urls().proxy_target_url("projects", "x.jpg"), None);
        assert_eq!(
            StorageUrls::unconfigured().proxy_target_url("projects", "a/b.jpg"),
            None
        );
    }

    #[test]
    fn public_object_url_guard() {
        let urls = urls();
        assert!(urls.is_public_object_url(&format!(
            "{BASE}/storage/v1/object/public/projects/a.jpg"
        )));
        assert!(!urls.is_public_object_url("https://evil.example/a.jpg"));
        assert!(!StorageUrls::unconfigured().is_public_object_url("a.jpg"));
    }

    #[tokio::test]
    async fn signed_url_falls_back_to_public() {
        let storage = InMemoryObjectStorage::new(BASE);
        storage.fail_signing(true);
        let url = urls()
            .signed_object_url(&storage, "public", "a/b.jpg", DEFAULT_SIGNED_URL_TTL)
            .await;
        assert_eq!(url, format!("{BASE}/storage/v1/object/public/public/a/b.jpg"));
    }

    #[tokio::test]
    async fn signed_url_is_used_when_available() {
        let storage = InMemoryObjectStorage::new(BASE);
        let url = urls()
            .signed_object_url(&storage, "public", "a/b.jpg", DEFAULT_SIGNED_URL_TTL)
            .await;
        assert!(url.contains("/object/sign/public/a/b.jpg"), "{url}");
    }
}
