use async_trait::async_trait;
use reelfolio_model::{GalleryId, PortfolioGallery};

use crate::Result;

#[async_trait]
pub trait GalleriesRepository: Send + Sync {
    /// All galleries, `order` ascending.
    async fn list(&self) -> Result<Vec<PortfolioGallery>>;
    async fn get(&self, id: GalleryId) -> Result<Option<PortfolioGallery>>;
    async fn insert(&self, gallery: &PortfolioGallery) -> Result<()>;
    async fn update(&self, gallery: &PortfolioGallery) -> Result<bool>;
    async fn delete(&self, id: GalleryId) -> Result<bool>;
}
