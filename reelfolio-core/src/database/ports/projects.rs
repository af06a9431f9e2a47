use async_trait::async_trait;
use reelfolio_model::{Locale, Project, ProjectId};

use crate::Result;

#[async_trait]
pub trait ProjectsRepository: Send + Sync {
    /// Published projects of a locale, `order` desc then `year` desc, nulls
    /// last on both.
    async fn list_published(&self, locale: Locale) -> Result<Vec<Project>>;
    async fn list_featured(
        &self,
        locale: Locale,
        limit: usize,
    ) -> Result<Vec<Project>>;
    async fn find_published_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<Project>>;
    async fn list_published_slugs(&self) -> Result<Vec<String>>;

    /// Every project, newest first.
    async fn list_all(&self) -> Result<Vec<Project>>;
    async fn get(&self, id: ProjectId) -> Result<Option<Project>>;
    async fn insert(&self, project: &Project) -> Result<()>;
    async fn update(&self, project: &Project) -> Result<bool>;
    async fn set_published(&self, id: ProjectId, published: bool)
    -> Result<bool>;
    async fn set_cover_path(&self, id: ProjectId, path: &str) -> Result<bool>;
    async fn set_gallery_paths(
        &self,
        id: ProjectId,
        image_paths: &[String],
        video_paths: &[String],
    ) -> Result<bool>;
    async fn delete(&self, id: ProjectId) -> Result<bool>;
}
