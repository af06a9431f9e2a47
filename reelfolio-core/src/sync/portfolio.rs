use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use reelfolio_model::{GalleryId, NewPortfolioPhoto, PortfolioPhoto};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::database::ports::photos::PhotosRepository;
use crate::error::Result;
use crate::storage::{ListOptions, ObjectStorage, StorageUrls};

/// Legacy folder synced into the default gallery.
pub const DEFAULT_PORTFOLIO_PREFIX: &str = "portfolio";
pub const SYNC_PAGE_SIZE: u32 = 500;

static GALLERY_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(jpe?g|png|webp|gif)$")
        .expect("gallery image pattern should compile")
});

static REPEATED_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/+").expect("slash pattern should compile"));

pub fn is_gallery_image(name: &str) -> bool {
    GALLERY_IMAGE.is_match(name)
}

/// `prefix/name` with runs of `/` collapsed.
pub fn join_storage_path(prefix: &str, name: &str) -> String {
    REPEATED_SLASHES
        .replace_all(&format!("{prefix}/{name}"), "/")
        .into_owned()
}

/// Outcome of one sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Image files found in the listing.
    pub listed: usize,
    pub inserted: usize,
    pub already_known: usize,
    /// Rows whose file is no longer listed. Reported only; never removed.
    pub stale: usize,
}

#[derive(Clone)]
pub struct PortfolioSync {
    storage: Arc<dyn ObjectStorage>,
    photos: Arc<dyn PhotosRepository>,
    urls: StorageUrls,
    bucket: String,
}

impl std::fmt::Debug for PortfolioSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioSync")
            .field("storage", &self.storage)
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl PortfolioSync {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        photos: Arc<dyn PhotosRepository>,
        urls: StorageUrls,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            photos,
            urls,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Image paths under `prefix`, sorted. A failed listing reads as empty.
    async fn list_images(&self, prefix: &str) -> Vec<String> {
        let listing = match self
            .storage
            .list(&self.bucket, prefix, ListOptions::with_limit(SYNC_PAGE_SIZE))
            .await
        {
            Ok(listing) => listing,
            Err(err) => {
                warn!(bucket = %self.bucket, prefix, error = %err, "storage listing failed, skipping sync");
                return Vec::new();
            }
        };
        let mut names: Vec<String> = listing
            .into_iter()
            .filter(|o| !o.is_folder() && is_gallery_image(&o.name))
            .map(|o| o.name)
            .collect();
        names.sort();
        names
            .iter()
            .map(|name| join_storage_path(prefix, name))
            .collect()
    }

    /// Insert a row for every listed image `gallery` does not know yet,
    /// appended after its current highest `order`.
    pub async fn sync_gallery(
        &self,
        gallery: GalleryId,
        prefix: &str,
    ) -> Result<SyncReport> {
        let listed = self.list_images(prefix).await;
        // Paths recorded in any gallery, or in none, count as known.
        let known: HashSet<String> =
            self.photos.all_storage_paths().await?.into_iter().collect();
        let mut next_order = self
            .photos
            .max_order(gallery)
            .await?
            .map_or(0, |max| max + 1);

        let mut report = SyncReport {
            listed: listed.len(),
            ..SyncReport::default()
        };

        for path in &listed {
            if known.contains(path) {
                report.already_known += 1;
                continue;
            }
            let url = self.urls.public_object_url(&self.bucket, path);
            self.photos
                .insert(NewPortfolioPhoto::visible(gallery, path, url, next_order))
                .await?;
            debug!(gallery = %gallery, path = %path, order = next_order, "recorded new photo");
            next_order += 1;
            report.inserted += 1;
        }

        let listed: HashSet<&str> = listed.iter().map(String::as_str).collect();
        let folder = match prefix.trim_matches('/') {
            "" => String::new(),
            trimmed => format!("{trimmed}/"),
        };
        report.stale = self
            .photos
            .storage_paths(gallery)
            .await?
            .iter()
            .filter(|path| {
                path.starts_with(&folder) && !listed.contains(path.as_str())
            })
            .count();
        if report.stale > 0 {
            warn!(gallery = %gallery, prefix, stale = report.stale, "photo rows without a stored file");
        }
        if report.inserted > 0 {
            info!(gallery = %gallery, prefix, inserted = report.inserted, "portfolio sync inserted photos");
        }
        Ok(report)
    }

    pub async fn sync_default_gallery(&self) -> Result<SyncReport> {
        self.sync_gallery(GalleryId::DEFAULT, DEFAULT_PORTFOLIO_PREFIX)
            .await
    }

    async fn sync_before_read(&self) {
        if let Err(err) = self.sync_default_gallery().await {
            warn!(error = %err, "default gallery sync failed before read");
        }
    }

    /// Visible photos, ordered, after syncing the default gallery.
    pub async fn public_photos(
        &self,
        gallery: Option<GalleryId>,
    ) -> Result<Vec<PortfolioPhoto>> {
        self.sync_before_read().await;
        self.photos.list(gallery, true).await
    }

    /// Every photo including hidden ones, ordered, after syncing the default
    /// gallery.
    pub async fn admin_photos(
        &self,
        gallery: Option<GalleryId>,
    ) -> Result<Vec<PortfolioPhoto>> {
        self.sync_before_read().await;
        self.photos.list(gallery, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::infrastructure::memory::InMemoryPhotosRepository;
    use crate::storage::{InMemoryObjectStorage, UrlCache};

    const BASE: &str = "https://demo.supabase.co";

    async fn fixture() -> (Arc<InMemoryObjectStorage>, Arc<InMemoryPhotosRepository>, PortfolioSync) {
        let storage = Arc::new(InMemoryObjectStorage::new(BASE));
        storage.put("projects", "portfolio/b.JPG", b"b".to_vec()).await;
        storage.put("projects", "portfolio/a.png", b"a".to_vec()).await;
        storage.put("projects", "portfolio/notes.txt", b"n".to_vec()).await;
        storage.put("projects", "portfolio/thumb/a.jpg", b"t".to_vec()).await;
        let photos = Arc::new(InMemoryPhotosRepository::new());
        let sync = PortfolioSync::new(
            storage.clone(),
            photos.clone(),
            StorageUrls::new(Some(BASE), UrlCache::default()),
            "projects",
        );
        (storage, photos, sync)
    }

    #[test]
    fn joins_and_filters_names() {
        assert_eq!(join_storage_path("portfolio/", "a.jpg"), "portfolio/a.jpg");
        assert_eq!(join_storage_path("a//b", "/c.jpg"), "a/b/c.jpg");
        assert!(is_gallery_image("x.JPEG"));
        assert!(is_gallery_image("x.webp"));
        assert!(!is_gallery_image("x.avif"));
        assert!(!is_gallery_image("jpg"));
    }

    #[tokio::test]
    async fn second_pass_inserts_nothing() {
        let (_, photos, sync) = fixture().await;
        let first = sync.sync_default_gallery().await.expect("first sync");
        assert_eq!(first.listed, 2);
        assert_eq!(first.inserted, 2);

        let second = sync.sync_default_gallery().await.expect("second sync");
        assert_eq!(second.inserted, 0);
        assert_eq!(second.already_known, 2);

        let rows = photos
            .list(Some(GalleryId::DEFAULT), false)
            .await
            .expect("rows");
        let paths: Vec<_> = rows.iter().map(|p| p.storage_path.as_str()).collect();
        assert_eq!(paths, vec!["portfolio/a.png", "portfolio/b.JPG"]);
        assert_eq!(rows[0].order, 0);
        assert_eq!(rows[1].order, 1);
        assert_eq!(
            rows[0].public_url,
            format!("{BASE}/storage/v1/object/public/projects/portfolio/a.png")
        );
    }

    #[tokio::test]
    async fn new_files_append_after_existing_order() {
        let (storage, photos, sync) = fixture().await;
        photos
            .insert(NewPortfolioPhoto::visible(
                GalleryId::DEFAULT,
                "portfolio/a.png",
                "u",
                7,
            ))
            .await
            .expect("seed row");
        storage.put("projects", "portfolio/c.gif", b"c".to_vec()).await;

        let report = sync.sync_default_gallery().await.expect("sync");
        assert_eq!(report.inserted, 2);
        let orders: Vec<i32> = photos
            .list(Some(GalleryId::DEFAULT), false)
            .await
            .expect("rows")
            .iter()
            .map(|p| p.order)
            .collect();
        assert_eq!(orders, vec![7, 8, 9]);
    }

    #[tokio::test]
    async fn removed_files_are_reported_not_deleted() {
        let (storage, photos, sync) = fixture().await;
        sync.sync_default_gallery().await.expect("sync");
        storage
            .remove("projects", &["portfolio/a.png".to_string()])
            .await
            .expect("remove");

        let report = sync.sync_default_gallery().await.expect("resync");
        assert_eq!(report.stale, 1);
        assert_eq!(
            photos.list(None, false).await.expect("rows").len(),
            2
        );
    }

    #[tokio::test]
    async fn sibling_folders_are_not_counted_stale() {
        let (_, photos, sync) = fixture().await;
        photos
            .insert(NewPortfolioPhoto::visible(
                GalleryId::DEFAULT,
                "portfolio-2/x.jpg",
                "u",
                0,
            ))
            .await
            .expect("seed row");

        let report = sync.sync_default_gallery().await.expect("sync");
        assert_eq!(report.stale, 0);
        assert_eq!(report.inserted, 2);
    }

    #[tokio::test]
    async fn paths_known_to_another_gallery_are_skipped() {
        let (_, photos, sync) = fixture().await;
        let other = GalleryId::new();
        photos
            .insert(NewPortfolioPhoto::visible(other, "portfolio/a.png", "u", 0))
            .await
            .expect("seed row");

        let report = sync.sync_default_gallery().await.expect("sync");
        assert_eq!(report.inserted, 1);
        assert_eq!(report.already_known, 1);
        assert_eq!(report.stale, 0);
        assert_eq!(photos.list(None, false).await.expect("rows").len(), 2);
    }

    #[tokio::test]
    async fn listing_failure_inserts_nothing() {
        let (storage, _, sync) = fixture().await;
        storage.fail_listing(true);
        let report = sync.sync_default_gallery().await.expect("sync");
        assert_eq!(report, SyncReport::default());
    }

    #[tokio::test]
    async fn public_reads_hide_invisible_rows() {
        let (_, photos, sync) = fixture().await;
        let all = sync.admin_photos(None).await.expect("admin read");
        assert_eq!(all.len(), 2);
        photos
            .set_visibility(all[0].id, false)
            .await
            .expect("hide");
        let visible = sync.public_photos(None).await.expect("public read");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, all[1].id);
    }
}
