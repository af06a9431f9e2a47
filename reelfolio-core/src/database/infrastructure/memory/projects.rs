use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use reelfolio_model::{Locale, Project, ProjectId};
use tokio::sync::Mutex;

use crate::database::ports::projects::ProjectsRepository;
use crate::error::{ContentError, Result};

#[derive(Debug, Default)]
pub struct InMemoryProjectsRepository {
    projects: Mutex<HashMap<ProjectId, Project>>,
}

impl InMemoryProjectsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `None` sorts after every value, larger values first.
fn desc_nulls_last(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn published_order(a: &Project, b: &Project) -> Ordering {
    desc_nulls_last(a.order, b.order)
        .then_with(|| desc_nulls_last(a.year, b.year))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

#[async_trait]
impl ProjectsRepository for InMemoryProjectsRepository {
    async fn list_published(&self, locale: Locale) -> Result<Vec<Project>> {
        let projects = self.projects.lock().await;
        let mut rows: Vec<Project> = projects
            .values()
            .filter(|p| p.published && p.locale == locale)
            .cloned()
            .collect();
        rows.sort_by(published_order);
        Ok(rows)
    }

    async fn list_featured(
        &self,
        locale: Locale,
        limit: usize,
    ) -> Result<Vec<Project>> {
        let mut rows = self.list_published(locale).await?;
        rows.retain(|p| p.is_featured);
        rows.truncate(limit);
        Ok(rows)
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<Project>> {
        let projects = self.projects.lock().await;
        Ok(projects
            .values()
            .find(|p| p.published && p.slug == slug && p.locale == locale)
            .cloned())
    }

    async fn list_published_slugs(&self) -> Result<Vec<String>> {
        let projects = self.projects.lock().await;
        let mut slugs: Vec<String> = projects
            .values()
            .filter(|p| p.published)
            .map(|p| p.slug.clone())
            .collect();
        slugs.sort();
        slugs.dedup();
        Ok(slugs)
    }

    async fn list_all(&self) -> Result<Vec<Project>> {
        let projects = self.projects.lock().await;
        let mut rows: Vec<Project> = projects.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        Ok(self.projects.lock().await.get(&id).cloned())
    }

    async fn insert(&self, project: &Project) -> Result<()> {
        let mut projects = self.projects.lock().await;
        if projects
            .values()
            .any(|p| p.slug == project.slug && p.locale == project.locale)
        {
            return Err(ContentError::InvalidInput(format!(
                "project {} already exists for locale {}",
                project.slug, project.locale
            )));
        }
        projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<bool> {
        let mut projects = self.projects.lock().await;
        if projects.values().any(|p| {
            p.id != project.id
                && p.slug == project.slug
                && p.locale == project.locale
        }) {
            return Err(ContentError::InvalidInput(format!(
                "project {} already exists for locale {}",
                project.slug, project.locale
            )));
        }
        let Some(existing) = projects.get_mut(&project.id) else {
            return Ok(false);
        };
        let cover = existing.cover_image_path.take();
        let images = std::mem::take(&mut existing.gallery_image_paths);
        let videos = std::mem::take(&mut existing.gallery_video_paths);
        let created_at = existing.created_at;
        *existing = Project {
            cover_image_path: cover,
            gallery_image_paths: images,
            gallery_video_paths: videos,
            created_at,
            ..project.clone()
        };
        Ok(true)
    }

    async fn set_published(
        &self,
        id: ProjectId,
        published: bool,
    ) -> Result<bool> {
        let mut projects = self.projects.lock().await;
        Ok(projects
            .get_mut(&id)
            .map(|p| p.published = published)
            .is_some())
    }

    async fn set_cover_path(&self, id: ProjectId, path: &str) -> Result<bool> {
        let mut projects = self.projects.lock().await;
        Ok(projects
            .get_mut(&id)
            .map(|p| p.cover_image_path = Some(path.to_string()))
            .is_some())
    }

    async fn set_gallery_paths(
        &self,
        id: ProjectId,
        image_paths: &[String],
        video_paths: &[String],
    ) -> Result<bool> {
        let mut projects = self.projects.lock().await;
        Ok(projects
            .get_mut(&id)
            .map(|p| {
                p.gallery_image_paths = image_paths.to_vec();
                p.gallery_video_paths = video_paths.to_vec();
            })
            .is_some())
    }

    async fn delete(&self, id: ProjectId) -> Result<bool> {
        Ok(self.projects.lock().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelfolio_model::ProjectDraft;

    fn project(slug: &str, order: Option<i32>, year: Option<i32>) -> Project {
        let mut project = Project::from_draft(ProjectDraft {
            slug: slug.into(),
            title: slug.to_uppercase(),
            order,
            year,
            ..ProjectDraft::default()
        });
        project.published = true;
        project
    }

    #[tokio::test]
    async fn published_listing_orders_nulls_last() {
        let repo = InMemoryProjectsRepository::new();
        repo.insert(&project("a", None, Some(2020))).await.unwrap();
        repo.insert(&project("b", Some(1), None)).await.unwrap();
        repo.insert(&project("c", Some(5), Some(2019))).await.unwrap();
        repo.insert(&project("d", None, Some(2023))).await.unwrap();
        let mut hidden = project("e", Some(9), None);
        hidden.published = false;
        repo.insert(&hidden).await.unwrap();

        let slugs: Vec<String> = repo
            .list_published(Locale::Es)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["c", "b", "d", "a"]);
    }

    #[tokio::test]
    async fn duplicate_slug_per_locale_is_rejected() {
        let repo = InMemoryProjectsRepository::new();
        repo.insert(&project("a", None, None)).await.unwrap();
        assert!(repo.insert(&project("a", None, None)).await.is_err());

        let mut english = project("a", None, None);
        english.locale = Locale::En;
        repo.insert(&english).await.unwrap();
    }
}
