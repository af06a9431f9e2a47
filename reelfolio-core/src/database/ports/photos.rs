use async_trait::async_trait;
use reelfolio_model::{GalleryId, NewPortfolioPhoto, PhotoId, PortfolioPhoto};

use crate::Result;

#[async_trait]
pub trait PhotosRepository: Send + Sync {
    /// `storage_path` of every row already recorded for a gallery.
    async fn storage_paths(&self, gallery: GalleryId) -> Result<Vec<String>>;
    /// `storage_path` of every row in any gallery, or in none.
    async fn all_storage_paths(&self) -> Result<Vec<String>>;
    async fn max_order(&self, gallery: GalleryId) -> Result<Option<i32>>;
    async fn insert(&self, photo: NewPortfolioPhoto) -> Result<PortfolioPhoto>;

    /// Photos ordered by `order`, optionally scoped to one gallery.
    async fn list(
        &self,
        gallery: Option<GalleryId>,
        visible_only: bool,
    ) -> Result<Vec<PortfolioPhoto>>;
    async fn get(&self, id: PhotoId) -> Result<Option<PortfolioPhoto>>;
    async fn set_visibility(&self, id: PhotoId, visible: bool) -> Result<bool>;
    async fn set_order(&self, id: PhotoId, order: i32) -> Result<bool>;
    async fn move_to_gallery(
        &self,
        id: PhotoId,
        gallery: GalleryId,
        order: i32,
    ) -> Result<bool>;
    /// Clear `gallery_id` on every photo of a gallery about to be deleted.
    async fn detach_gallery(&self, gallery: GalleryId) -> Result<u64>;
    /// Removes the row, returning it when it existed.
    async fn delete(&self, id: PhotoId) -> Result<Option<PortfolioPhoto>>;
}
