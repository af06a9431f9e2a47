use std::sync::Arc;

use reelfolio_model::{GalleryItem, Locale, Project, ProjectView};
use serde::Serialize;
use tracing::debug;

use super::legacy::LegacyProjects;
use super::poster::{PosterResolver, is_absolute_url};
use super::video_url::parse_video_url;
use crate::database::ports::projects::ProjectsRepository;
use crate::error::Result;
use crate::storage::StorageUrls;

pub const DEFAULT_FEATURED_LIMIT: usize = 6;
const EXCERPT_CHARS: usize = 300;

/// Where project rows come from.
#[derive(Clone)]
pub enum ProjectSource {
    Database(Arc<dyn ProjectsRepository>),
    /// Static export used when no database is configured.
    Legacy(LegacyProjects),
}

impl std::fmt::Debug for ProjectSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectSource::Database(_) => f.write_str("Database"),
            ProjectSource::Legacy(legacy) => {
                f.debug_tuple("Legacy").field(&legacy.path()).finish()
            }
        }
    }
}

/// Neighbours of a project in the published listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdjacentProjects {
    pub prev: Option<ProjectView>,
    pub next: Option<ProjectView>,
}

/// Summary when present, else the first 300 characters of the description.
pub fn excerpt(project: &Project) -> String {
    match project.summary.as_deref() {
        Some(summary) if !summary.trim().is_empty() => summary.to_string(),
        _ => project
            .description
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(EXCERPT_CHARS)
            .collect(),
    }
}

/// Read-side project queries producing display-ready views.
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    source: ProjectSource,
    urls: StorageUrls,
    bucket: String,
    posters: PosterResolver,
}

impl ProjectCatalog {
    pub fn new(
        source: ProjectSource,
        urls: StorageUrls,
        bucket: impl Into<String>,
        posters: PosterResolver,
    ) -> Self {
        Self {
            source,
            urls,
            bucket: bucket.into(),
            posters,
        }
    }

    fn display_url(&self, path: &str) -> String {
        if is_absolute_url(path) {
            path.to_string()
        } else {
            self.urls.public_object_url(&self.bucket, path)
        }
    }

    pub async fn view(&self, project: Project) -> ProjectView {
        let cover = project
            .cover_image_path
            .as_deref()
            .filter(|p| !p.trim().is_empty());
        let cover_url = cover.map(|p| self.display_url(p));
        let cover_thumb_url = cover
            .map(|p| {
                if is_absolute_url(p) {
                    p.to_string()
                } else {
                    self.urls.thumb_url(&self.bucket, p)
                }
            })
            .filter(|u| !u.is_empty());

        let mut paths = project.gallery_image_paths.clone();
        paths.sort();
        let gallery: Vec<GalleryItem> = paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| GalleryItem {
                url: self.display_url(&path),
                path,
                order: i as u32,
            })
            .collect();

        let primary_video =
            project.video_url.as_deref().and_then(parse_video_url);
        let poster_url = self
            .posters
            .poster_url(&project, primary_video.as_ref(), &gallery)
            .await;

        ProjectView {
            excerpt: excerpt(&project),
            cover_url,
            cover_thumb_url,
            gallery,
            primary_video,
            poster_url,
            project,
        }
    }

    async fn views(&self, projects: Vec<Project>) -> Vec<ProjectView> {
        let mut views = Vec::with_capacity(projects.len());
        for project in projects {
            views.push(self.view(project).await);
        }
        views
    }

    /// Published projects for `locale`, falling back to the default locale
    /// when it has none.
    async fn published(&self, locale: Locale) -> Result<Vec<Project>> {
        match &self.source {
            ProjectSource::Database(repo) => {
                let rows = repo.list_published(locale).await?;
                if rows.is_empty() && !locale.is_default() {
                    debug!(%locale, "no projects for locale, using default");
                    return repo.list_published(Locale::default()).await;
                }
                Ok(rows)
            }
            ProjectSource::Legacy(legacy) => Ok(legacy.projects()),
        }
    }

    pub async fn list_projects(&self, locale: Locale) -> Result<Vec<ProjectView>> {
        let projects = self.published(locale).await?;
        Ok(self.views(projects).await)
    }

    pub async fn project_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<ProjectView>> {
        let project = match &self.source {
            ProjectSource::Database(repo) => {
                match repo.find_published_by_slug(slug, locale).await? {
                    Some(project) => Some(project),
                    None if !locale.is_default() => {
                        repo.find_published_by_slug(slug, Locale::default())
                            .await?
                    }
                    None => None,
                }
            }
            ProjectSource::Legacy(legacy) => legacy.find(slug),
        };
        Ok(match project {
            Some(project) => Some(self.view(project).await),
            None => None,
        })
    }

    /// `limit` of zero means the default of six.
    pub async fn featured_projects(
        &self,
        limit: usize,
        locale: Locale,
    ) -> Result<Vec<ProjectView>> {
        let limit = if limit == 0 { DEFAULT_FEATURED_LIMIT } else { limit };
        let projects = match &self.source {
            ProjectSource::Database(repo) => {
                let rows = repo.list_featured(locale, limit).await?;
                if rows.is_empty() && !locale.is_default() {
                    repo.list_featured(Locale::default(), limit).await?
                } else {
                    rows
                }
            }
            ProjectSource::Legacy(legacy) => legacy
                .projects()
                .into_iter()
                .filter(|p| p.is_featured)
                .take(limit)
                .collect(),
        };
        Ok(self.views(projects).await)
    }

    pub async fn project_slugs(&self) -> Result<Vec<String>> {
        match &self.source {
            ProjectSource::Database(repo) => repo.list_published_slugs().await,
            ProjectSource::Legacy(legacy) => {
                Ok(legacy.read().into_iter().map(|p| p.slug).collect())
            }
        }
    }

    /// Previous and next project around `slug` in the published order.
    pub async fn adjacent_projects(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<AdjacentProjects> {
        let projects = self.published(locale).await?;
        let Some(index) = projects.iter().position(|p| p.slug == slug) else {
            return Ok(AdjacentProjects::default());
        };
        let prev = match index.checked_sub(1).and_then(|i| projects.get(i)) {
            Some(p) => Some(self.view(p.clone()).await),
            None => None,
        };
        let next = match projects.get(index + 1) {
            Some(p) => Some(self.view(p.clone()).await),
            None => None,
        };
        Ok(AdjacentProjects { prev, next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::infrastructure::memory::InMemoryProjectsRepository;
    use crate::storage::UrlCache;
    use reelfolio_model::ProjectDraft;

    const BASE: &str = "https://demo.supabase.co";

    fn catalog(repo: Arc<InMemoryProjectsRepository>) -> ProjectCatalog {
        let urls = StorageUrls::new(Some(BASE), UrlCache::default());
        ProjectCatalog::new(
            ProjectSource::Database(repo),
            urls.clone(),
            "public",
            PosterResolver::new(urls, "public", None, UrlCache::default()),
        )
    }

    fn published(slug: &str, locale: Locale, order: i32) -> Project {
        let mut project = Project::from_draft(ProjectDraft {
            slug: slug.into(),
            title: slug.into(),
            locale,
            order: Some(order),
            ..ProjectDraft::default()
        });
        project.published = true;
        project
    }

    #[test]
    fn excerpt_prefers_summary() {
        let mut project = published("a", Locale::Es, 0);
        project.description = Some("x".repeat(400));
        assert_eq!(excerpt(&project).len(), 300);
        project.summary = Some("short".into());
        assert_eq!(excerpt(&project), "short");
        project.summary = Some("   ".into());
        assert_eq!(excerpt(&project).len(), 300);
    }

    #[tokio::test]
    async fn view_derives_urls_and_video() {
        let repo = Arc::new(InMemoryProjectsRepository::new());
        let mut project = published("bestefar", Locale::Es, 1);
        project.cover_image_path = Some("covers/bestefar/cover.jpg".into());
        project.gallery_image_paths =
            vec!["gallery/bestefar/b.jpg".into(), "gallery/bestefar/a b.jpg".into()];
        project.video_url = Some("https://vimeo.com/123".into());

        let view = catalog(repo).view(project).await;
        assert_eq!(
            view.cover_url.as_deref(),
            Some("https://demo.supabase.co/storage/v1/object/public/public/covers/bestefar/cover.jpg")
        );
        assert!(view
            .cover_thumb_url
            .as_deref()
            .is_some_and(|u| u.contains("/render/image/public/public/covers/bestefar/cover.jpg?width=600")));
        assert_eq!(view.gallery[0].path, "gallery/bestefar/a b.jpg");
        assert!(view.gallery[0].url.ends_with("/gallery/bestefar/a%20b.jpg"));
        assert_eq!(view.gallery[1].order, 1);
        assert_eq!(view.primary_video, Some(reelfolio_model::VideoRef::Vimeo("123".into())));
        assert!(view.poster_url.is_some());
    }

    #[tokio::test]
    async fn english_falls_back_to_spanish() {
        let repo = Arc::new(InMemoryProjectsRepository::new());
        repo.insert(&published("uno", Locale::Es, 1)).await.unwrap();
        let catalog = catalog(repo);
        assert_eq!(catalog.list_projects(Locale::En).await.unwrap().len(), 1);
        assert!(catalog
            .project_by_slug("uno", Locale::En)
            .await
            .unwrap()
            .is_some());
        assert!(catalog
            .project_by_slug("missing", Locale::En)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn adjacent_follows_listing_order() {
        let repo = Arc::new(InMemoryProjectsRepository::new());
        repo.insert(&published("a", Locale::Es, 3)).await.unwrap();
        repo.insert(&published("b", Locale::Es, 2)).await.unwrap();
        repo.insert(&published("c", Locale::Es, 1)).await.unwrap();
        let catalog = catalog(repo);

        let middle = catalog.adjacent_projects("b", Locale::Es).await.unwrap();
        assert_eq!(middle.prev.as_ref().map(|p| p.slug()), Some("a"));
        assert_eq!(middle.next.as_ref().map(|p| p.slug()), Some("c"));

        let first = catalog.adjacent_projects("a", Locale::Es).await.unwrap();
        assert!(first.prev.is_none());
        let unknown = catalog.adjacent_projects("zz", Locale::Es).await.unwrap();
        assert_eq!(unknown, AdjacentProjects::default());
    }

    #[tokio::test]
    async fn featured_defaults_to_six() {
        let repo = Arc::new(InMemoryProjectsRepository::new());
        for i in 0..8 {
            let mut project = published(&format!("p{i}"), Locale::Es, i);
            project.is_featured = true;
            repo.insert(&project).await.unwrap();
        }
        let catalog = catalog(repo);
        assert_eq!(catalog.featured_projects(0, Locale::Es).await.unwrap().len(), 6);
        assert_eq!(catalog.featured_projects(2, Locale::Es).await.unwrap().len(), 2);
    }
}
