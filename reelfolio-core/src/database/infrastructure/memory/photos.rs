use std::collections::HashMap;

use async_trait::async_trait;
use reelfolio_model::{GalleryId, NewPortfolioPhoto, PhotoId, PortfolioPhoto};
use tokio::sync::Mutex;

use crate::database::ports::photos::PhotosRepository;
use crate::error::{ContentError, Result};

#[derive(Debug, Default)]
pub struct InMemoryPhotosRepository {
    photos: Mutex<HashMap<PhotoId, PortfolioPhoto>>,
}

impl InMemoryPhotosRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PhotosRepository for InMemoryPhotosRepository {
    async fn storage_paths(&self, gallery: GalleryId) -> Result<Vec<String>> {
        let photos = self.photos.lock().await;
        Ok(photos
            .values()
            .filter(|p| p.gallery_id == Some(gallery))
            .map(|p| p.storage_path.clone())
            .collect())
    }

    async fn all_storage_paths(&self) -> Result<Vec<String>> {
        let photos = self.photos.lock().await;
        Ok(photos.values().map(|p| p.storage_path.clone()).collect())
    }

    async fn max_order(&self, gallery: GalleryId) -> Result<Option<i32>> {
        let photos = self.photos.lock().await;
        Ok(photos
            .values()
            .filter(|p| p.gallery_id == Some(gallery))
            .map(|p| p.order)
            .max())
    }

    async fn insert(&self, photo: NewPortfolioPhoto) -> Result<PortfolioPhoto> {
        let mut photos = self.photos.lock().await;
        if photos.values().any(|p| {
            p.gallery_id == photo.gallery_id
                && p.storage_path == photo.storage_path
        }) {
            return Err(ContentError::InvalidInput(format!(
                "photo {} already recorded",
                photo.storage_path
            )));
        }
        let row = photo.into_photo();
        photos.insert(row.id, row.clone());
        Ok(row)
    }

    async fn detach_gallery(&self, gallery: GalleryId) -> Result<u64> {
        let mut detached = 0;
        for photo in self.photos.lock().await.values_mut() {
            if photo.gallery_id == Some(gallery) {
                photo.gallery_id = None;
                detached += 1;
            }
        }
        Ok(detached)
    }

    async fn list(
        &self,
        gallery: Option<GalleryId>,
        visible_only: bool,
    ) -> Result<Vec<PortfolioPhoto>> {
        let photos = self.photos.lock().await;
        let mut rows: Vec<PortfolioPhoto> = photos
            .values()
            .filter(|p| gallery.is_none() || p.gallery_id == gallery)
            .filter(|p| !visible_only || p.is_visible)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at))
        });
        Ok(rows)
    }

    async fn get(&self, id: PhotoId) -> Result<Option<PortfolioPhoto>> {
        Ok(self.photos.lock().await.get(&id).cloned())
    }

    async fn set_visibility(&self, id: PhotoId, visible: bool) -> Result<bool> {
        let mut photos = self.photos.lock().await;
        Ok(photos.get_mut(&id).map(|p| p.is_visible = visible).is_some())
    }

    async fn set_order(&self, id: PhotoId, order: i32) -> Result<bool> {
        let mut photos = self.photos.lock().await;
        Ok(photos.get_mut(&id).map(|p| p.order = order).is_some())
    }

    async fn move_to_gallery(
        &self,
        id: PhotoId,
        gallery: GalleryId,
        order: i32,
    ) -> Result<bool> {
        let mut photos = self.photos.lock().await;
        Ok(photos
            .get_mut(&id)
            .map(|p| {
                p.gallery_id = Some(gallery);
                p.order = order;
            })
            .is_some())
    }

    async fn delete(&self, id: PhotoId) -> Result<Option<PortfolioPhoto>> {
        Ok(self.photos.lock().await.remove(&id))
    }
}
