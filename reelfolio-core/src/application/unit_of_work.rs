use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::infrastructure::memory::{
    InMemoryContactRepository, InMemoryGalleriesRepository,
    InMemoryPagesRepository, InMemoryPhotosRepository,
    InMemoryProjectsRepository, InMemoryVideoIdsRepository,
};
use crate::database::ports::{
    contact::ContactRepository, galleries::GalleriesRepository,
    pages::PagesRepository, photos::PhotosRepository,
    projects::ProjectsRepository, video_ids::VideoIdsRepository,
};
#[cfg(feature = "database")]
use crate::database::{
    infrastructure::postgres::{
        PostgresContactRepository, PostgresGalleriesRepository,
        PostgresPagesRepository, PostgresPhotosRepository,
        PostgresProjectsRepository, PostgresVideoIdsRepository,
    },
    postgres::PostgresDatabase,
};

/// Aggregates the repository ports used by the content services.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub projects: Arc<dyn ProjectsRepository>,
    pub galleries: Arc<dyn GalleriesRepository>,
    pub photos: Arc<dyn PhotosRepository>,
    pub pages: Arc<dyn PagesRepository>,
    pub video_ids: Arc<dyn VideoIdsRepository>,
    pub contact: Arc<dyn ContactRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("projects", &type_name_of_val(self.projects.as_ref()))
            .field("galleries", &type_name_of_val(self.galleries.as_ref()))
            .field("photos", &type_name_of_val(self.photos.as_ref()))
            .field("pages", &type_name_of_val(self.pages.as_ref()))
            .field("video_ids", &type_name_of_val(self.video_ids.as_ref()))
            .field("contact", &type_name_of_val(self.contact.as_ref()))
            .finish()
    }
}

impl AppUnitOfWork {
    /// Every port backed by process memory.
    pub fn in_memory() -> Self {
        Self {
            projects: Arc::new(InMemoryProjectsRepository::new()),
            galleries: Arc::new(InMemoryGalleriesRepository::new()),
            photos: Arc::new(InMemoryPhotosRepository::new()),
            pages: Arc::new(InMemoryPagesRepository::new()),
            video_ids: Arc::new(InMemoryVideoIdsRepository::new()),
            contact: Arc::new(InMemoryContactRepository::new()),
        }
    }
}

#[derive(Default)]
pub struct AppUnitOfWorkBuilder {
    projects: Option<Arc<dyn ProjectsRepository>>,
    galleries: Option<Arc<dyn GalleriesRepository>>,
    photos: Option<Arc<dyn PhotosRepository>>,
    pages: Option<Arc<dyn PagesRepository>>,
    video_ids: Option<Arc<dyn VideoIdsRepository>>,
    contact: Option<Arc<dyn ContactRepository>>,
}

impl fmt::Debug for AppUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWorkBuilder")
            .field("projects", &self.projects.is_some())
            .field("galleries", &self.galleries.is_some())
            .field("photos", &self.photos.is_some())
            .field("pages", &self.pages.is_some())
            .field("video_ids", &self.video_ids.is_some())
            .field("contact", &self.contact.is_some())
            .finish()
    }
}

impl AppUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(mut self, repo: Arc<dyn ProjectsRepository>) -> Self {
        self.projects = Some(repo);
        self
    }
    pub fn with_galleries(
        mut self,
        repo: Arc<dyn GalleriesRepository>,
    ) -> Self {
        self.galleries = Some(repo);
        self
    }
    pub fn with_photos(mut self, repo: Arc<dyn PhotosRepository>) -> Self {
        self.photos = Some(repo);
        self
    }
    pub fn with_pages(mut self, repo: Arc<dyn PagesRepository>) -> Self {
        self.pages = Some(repo);
        self
    }
    pub fn with_video_ids(
        mut self,
        repo: Arc<dyn VideoIdsRepository>,
    ) -> Self {
        self.video_ids = Some(repo);
        self
    }
    pub fn with_contact(mut self, repo: Arc<dyn ContactRepository>) -> Self {
        self.contact = Some(repo);
        self
    }

    /// Build a validated AppUnitOfWork. Returns a string error naming the
    /// first missing repository.
    pub fn build(self) -> Result<AppUnitOfWork, String> {
        Ok(AppUnitOfWork {
            projects: self
                .projects
                .ok_or_else(|| "missing ProjectsRepository".to_string())?,
            galleries: self
                .galleries
                .ok_or_else(|| "missing GalleriesRepository".to_string())?,
            photos: self
                .photos
                .ok_or_else(|| "missing PhotosRepository".to_string())?,
            pages: self
                .pages
                .ok_or_else(|| "missing PagesRepository".to_string())?,
            video_ids: self
                .video_ids
                .ok_or_else(|| "missing VideoIdsRepository".to_string())?,
            contact: self
                .contact
                .ok_or_else(|| "missing ContactRepository".to_string())?,
        })
    }
}

#[cfg(feature = "database")]
impl AppUnitOfWork {
    /// Compose all Postgres-backed repositories into a unit of work.
    pub fn from_postgres(db: Arc<PostgresDatabase>) -> Result<Self, String> {
        AppUnitOfWorkBuilder::new().with_postgres(db).build()
    }
}

#[cfg(feature = "database")]
impl AppUnitOfWorkBuilder {
    pub fn with_postgres(mut self, db: Arc<PostgresDatabase>) -> Self {
        let pool = db.pool().clone();

        let projects: Arc<dyn ProjectsRepository> =
            Arc::new(PostgresProjectsRepository::new(pool.clone()));
        self.projects = Some(projects);

        let galleries: Arc<dyn GalleriesRepository> =
            Arc::new(PostgresGalleriesRepository::new(pool.clone()));
        self.galleries = Some(galleries);

        let photos: Arc<dyn PhotosRepository> =
            Arc::new(PostgresPhotosRepository::new(pool.clone()));
        self.photos = Some(photos);

        let pages: Arc<dyn PagesRepository> =
            Arc::new(PostgresPagesRepository::new(pool.clone()));
        self.pages = Some(pages);

        let video_ids: Arc<dyn VideoIdsRepository> =
            Arc::new(PostgresVideoIdsRepository::new(pool.clone()));
        self.video_ids = Some(video_ids);

        let contact: Arc<dyn ContactRepository> =
            Arc::new(PostgresContactRepository::new(pool));
        self.contact = Some(contact);

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_reports_missing_repository() {
        let err = AppUnitOfWorkBuilder::new()
            .with_projects(Arc::new(InMemoryProjectsRepository::new()))
            .build()
            .expect_err("incomplete builder");
        assert_eq!(err, "missing GalleriesRepository");
    }

    #[test]
    fn debug_lists_every_port() {
        let rendered = format!("{:?}", AppUnitOfWork::in_memory());
        for port in ["projects", "galleries", "photos", "pages", "video_ids", "contact"] {
            assert!(rendered.contains(port), "{rendered}");
        }
    }
}
