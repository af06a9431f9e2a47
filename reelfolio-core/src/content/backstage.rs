use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::image::{to_large_path, to_thumb_path};
use crate::storage::{ListOptions, ObjectStorage, StorageUrls};

pub const DEFAULT_BACKSTAGE_LIMIT: usize = 12;
const BACKSTAGE_PAGE_SIZE: u32 = 200;
const BACKSTAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackstageImage {
    pub thumb_url: String,
    pub large_url: String,
    /// Served when the renditions have not been generated.
    pub original_url: String,
    pub alt: String,
}

fn is_backstage_image(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        BACKSTAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
    })
}

fn alt_text(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or_default();
    let stem = match file.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => file,
    };
    if stem.is_empty() {
        "Backstage".to_string()
    } else {
        stem.to_string()
    }
}

/// Behind-the-scenes stills stored under `{folder}/backstage`.
#[derive(Clone)]
pub struct BackstageLister {
    storage: Arc<dyn ObjectStorage>,
    urls: StorageUrls,
    bucket: String,
}

impl std::fmt::Debug for BackstageLister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackstageLister")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl BackstageLister {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        urls: StorageUrls,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            urls,
            bucket: bucket.into(),
        }
    }

    /// Up to `limit` images, deduplicated by case-insensitive name and sorted.
    pub async fn backstage_images(
        &self,
        folder: &str,
        limit: usize,
    ) -> Vec<BackstageImage> {
        let folder = folder.trim().trim_end_matches('/');
        if folder.is_empty() {
            return Vec::new();
        }
        let prefix = format!("{folder}/backstage");
        let listing = match self
            .storage
            .list(&self.bucket, &prefix, ListOptions::with_limit(BACKSTAGE_PAGE_SIZE))
            .await
        {
            Ok(listing) => listing,
            Err(err) => {
                debug!(prefix = %prefix, error = %err, "backstage listing unavailable");
                return Vec::new();
            }
        };

        let mut by_name: BTreeMap<String, String> = BTreeMap::new();
        for object in listing {
            let name = object.name;
            if name.is_empty() || name.starts_with('.') || !is_backstage_image(&name) {
                continue;
            }
            by_name
                .entry(name.to_lowercase())
                .or_insert_with(|| format!("{prefix}/{name}"));
        }
        let mut paths: Vec<String> = by_name.into_values().collect();
        paths.sort();
        paths.truncate(limit);

        paths
            .iter()
            .map(|path| BackstageImage {
                thumb_url: self.urls.public_object_url(&self.bucket, &to_thumb_path(path)),
                large_url: self.urls.public_object_url(&self.bucket, &to_large_path(path)),
                original_url: self.urls.public_object_url(&self.bucket, path),
                alt: alt_text(path),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryObjectStorage, UrlCache};

    const BASE: &str = "https://demo.supabase.co";

    #[tokio::test]
    async fn lists_dedupes_and_truncates() {
        let storage = Arc::new(InMemoryObjectStorage::new(BASE));
        for name in ["c.jpg", "A.PNG", "b.webp", ".hidden.jpg", "notes.txt", "a.png"] {
            storage
                .put("projects", &format!("bestefar/backstage/{name}"), b"x".to_vec())
                .await;
        }
        let lister = BackstageLister::new(
            storage,
            StorageUrls::new(Some(BASE), UrlCache::default()),
            "projects",
        );

        let images = lister.backstage_images("bestefar/", 2).await;
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].alt, "A");
        assert_eq!(
            images[0].thumb_url,
            format!("{BASE}/storage/v1/object/public/projects/bestefar/backstage/thumb/A.jpg")
        );
        assert_eq!(
            images[0].large_url,
            format!("{BASE}/storage/v1/object/public/projects/bestefar/backstage/large/A.jpg")
        );
        assert_eq!(images[1].alt, "b");

        assert!(lister.backstage_images("  ", 12).await.is_empty());
        assert!(lister.backstage_images("unknown", 12).await.is_empty());
    }
}
