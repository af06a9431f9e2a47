use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use reelfolio_model::{GalleryId, PortfolioGallery};
use tokio::sync::Mutex;

use crate::database::ports::galleries::GalleriesRepository;
use crate::error::{ContentError, Result};

#[derive(Debug)]
pub struct InMemoryGalleriesRepository {
    galleries: Mutex<HashMap<GalleryId, PortfolioGallery>>,
}

impl InMemoryGalleriesRepository {
    /// Starts with the default `portfolio` gallery, matching a freshly
    /// migrated database.
    pub fn new() -> Self {
        let default = PortfolioGallery {
            id: GalleryId::DEFAULT,
            name: "Portfolio".into(),
            slug: "portfolio".into(),
            order: 0,
            is_visible: true,
            created_at: Utc::now(),
        };
        Self {
            galleries: Mutex::new(HashMap::from([(default.id, default)])),
        }
    }
}

impl Default for InMemoryGalleriesRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GalleriesRepository for InMemoryGalleriesRepository {
    async fn list(&self) -> Result<Vec<PortfolioGallery>> {
        let galleries = self.galleries.lock().await;
        let mut rows: Vec<PortfolioGallery> =
            galleries.values().cloned().collect();
        rows.sort_by(|a, b| {
            a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at))
        });
        Ok(rows)
    }

    async fn get(&self, id: GalleryId) -> Result<Option<PortfolioGallery>> {
        Ok(self.galleries.lock().await.get(&id).cloned())
    }

    async fn insert(&self, gallery: &PortfolioGallery) -> Result<()> {
        let mut galleries = self.galleries.lock().await;
        if galleries.values().any(|g| g.slug == gallery.slug) {
            return Err(ContentError::InvalidInput(format!(
                "gallery slug {} already exists",
                gallery.slug
            )));
        }
        galleries.insert(gallery.id, gallery.clone());
        Ok(())
    }

    async fn update(&self, gallery: &PortfolioGallery) -> Result<bool> {
        let mut galleries = self.galleries.lock().await;
        if galleries
            .values()
            .any(|g| g.id != gallery.id && g.slug == gallery.slug)
        {
            return Err(ContentError::InvalidInput(format!(
                "gallery slug {} already exists",
                gallery.slug
            )));
        }
        match galleries.get_mut(&gallery.id) {
            Some(existing) => {
                *existing = PortfolioGallery {
                    created_at: existing.created_at,
                    ..gallery.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: GalleryId) -> Result<bool> {
        Ok(self.galleries.lock().await.remove(&id).is_some())
    }
}
