use std::sync::Arc;

use tracing::debug;

use crate::storage::{ListOptions, ObjectStorage, StorageUrls};
use crate::sync::{SYNC_PAGE_SIZE, is_gallery_image, join_storage_path};

/// Folders tried in order when none is configured.
pub const DEFAULT_PORTFOLIO_FOLDERS: [&str; 3] =
    ["portfolio", "uploads/portfolio", "uploads"];

/// Bare image URLs straight from a storage folder, for the photo wall that
/// predates gallery rows.
#[derive(Clone)]
pub struct PortfolioFolders {
    storage: Arc<dyn ObjectStorage>,
    urls: StorageUrls,
    bucket: String,
    folders: Vec<String>,
}

impl std::fmt::Debug for PortfolioFolders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioFolders")
            .field("bucket", &self.bucket)
            .field("folders", &self.folders)
            .finish_non_exhaustive()
    }
}

impl PortfolioFolders {
    /// `folder` overrides the default candidates when set.
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        urls: StorageUrls,
        bucket: impl Into<String>,
        folder: Option<&str>,
    ) -> Self {
        let folders = match folder.map(str::trim).filter(|f| !f.is_empty()) {
            Some(folder) => vec![folder.to_string()],
            None => DEFAULT_PORTFOLIO_FOLDERS.iter().map(|f| f.to_string()).collect(),
        };
        Self {
            storage,
            urls,
            bucket: bucket.into(),
            folders,
        }
    }

    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    /// Public URLs from the first candidate folder holding any images.
    pub async fn gallery_urls(&self) -> Vec<String> {
        for folder in &self.folders {
            let listing = match self
                .storage
                .list(&self.bucket, folder, ListOptions::with_limit(SYNC_PAGE_SIZE))
                .await
            {
                Ok(listing) => listing,
                Err(err) => {
                    debug!(folder = %folder, error = %err, "portfolio folder unavailable");
                    continue;
                }
            };
            let mut names: Vec<String> = listing
                .into_iter()
                .filter(|o| !o.is_folder() && is_gallery_image(&o.name))
                .map(|o| o.name)
                .collect();
            if names.is_empty() {
                continue;
            }
            names.sort();
            return names
                .iter()
                .map(|name| {
                    self.urls
                        .public_object_url(&self.bucket, &join_storage_path(folder, name))
                })
                .collect();
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryObjectStorage, UrlCache};

    const BASE: &str = "https://demo.supabase.co";

    #[tokio::test]
    async fn first_folder_with_images_wins() {
        let storage = Arc::new(InMemoryObjectStorage::new(BASE));
        storage.put("projects", "uploads/portfolio/readme.md", b"x".to_vec()).await;
        storage.put("projects", "uploads/b.jpg", b"x".to_vec()).await;
        storage.put("projects", "uploads/a.jpg", b"x".to_vec()).await;
        let urls = StorageUrls::new(Some(BASE), UrlCache::default());

        let folders = PortfolioFolders::new(storage.clone(), urls.clone(), "projects", None);
        assert_eq!(
            folders.gallery_urls().await,
            vec![
                format!("{BASE}/storage/v1/object/public/projects/uploads/a.jpg"),
                format!("{BASE}/storage/v1/object/public/projects/uploads/b.jpg"),
            ]
        );

        let pinned = PortfolioFolders::new(storage, urls, "projects", Some("portfolio"));
        assert_eq!(pinned.folders(), ["portfolio".to_string()]);
        assert!(pinned.gallery_urls().await.is_empty());
    }
}
