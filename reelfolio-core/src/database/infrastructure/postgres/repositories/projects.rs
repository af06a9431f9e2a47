use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reelfolio_model::{Locale, Project, ProjectId};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::parse_locale;
use crate::database::ports::projects::ProjectsRepository;
use crate::error::{ContentError, Result};

const PROJECT_COLUMNS: &str = r#"
    id, slug, locale, title, summary, description, credits, year, "order",
    client, piece_type, duration, video_url, external_link, cover_image_path,
    gallery_image_paths, gallery_video_paths, tags, is_featured, published,
    created_at
"#;

const PUBLISHED_ORDER: &str =
    r#"ORDER BY "order" DESC NULLS LAST, year DESC NULLS LAST, created_at DESC"#;

#[derive(Debug, Clone)]
pub struct PostgresProjectsRepository {
    pool: PgPool,
}

impl PostgresProjectsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Project> {
        let read = |e: sqlx::Error| {
            ContentError::Internal(format!("Failed to read project row: {e}"))
        };
        let id: Uuid = row.try_get("id").map_err(read)?;
        let locale: String = row.try_get("locale").map_err(read)?;
        let created_at: DateTime<Utc> =
            row.try_get("created_at").map_err(read)?;
        Ok(Project {
            id: ProjectId(id),
            slug: row.try_get("slug").map_err(read)?,
            locale: parse_locale(&locale),
            title: row.try_get("title").map_err(read)?,
            summary: row.try_get("summary").map_err(read)?,
            description: row.try_get("description").map_err(read)?,
            credits: row.try_get("credits").map_err(read)?,
            year: row.try_get("year").map_err(read)?,
            order: row.try_get("order").map_err(read)?,
            client: row.try_get("client").map_err(read)?,
            piece_type: row.try_get("piece_type").map_err(read)?,
            duration: row.try_get("duration").map_err(read)?,
            video_url: row.try_get("video_url").map_err(read)?,
            external_link: row.try_get("external_link").map_err(read)?,
            cover_image_path: row.try_get("cover_image_path").map_err(read)?,
            gallery_image_paths: row
                .try_get("gallery_image_paths")
                .map_err(read)?,
            gallery_video_paths: row
                .try_get("gallery_video_paths")
                .map_err(read)?,
            tags: row.try_get("tags").map_err(read)?,
            is_featured: row.try_get("is_featured").map_err(read)?,
            published: row.try_get("published").map_err(read)?,
            created_at,
        })
    }

    fn map_rows(rows: Vec<PgRow>) -> Result<Vec<Project>> {
        rows.iter().map(Self::map_row).collect()
    }
}

#[async_trait]
impl ProjectsRepository for PostgresProjectsRepository {
    async fn list_published(&self, locale: Locale) -> Result<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE published = TRUE AND locale = $1 {PUBLISHED_ORDER}"
        );
        let rows = sqlx::query(&sql)
            .bind(locale.as_str())
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                ContentError::Internal(format!("Failed to list projects: {e}"))
            })?;
        Self::map_rows(rows)
    }

    async fn list_featured(
        &self,
        locale: Locale,
        limit: usize,
    ) -> Result<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE published = TRUE AND is_featured = TRUE AND locale = $1 \
             {PUBLISHED_ORDER} LIMIT $2"
        );
        let rows = sqlx::query(&sql)
            .bind(locale.as_str())
            .bind(limit as i64)
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                ContentError::Internal(format!(
                    "Failed to list featured projects: {e}"
                ))
            })?;
        Self::map_rows(rows)
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE published = TRUE AND slug = $1 AND locale = $2 LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(slug)
            .bind(locale.as_str())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                ContentError::Internal(format!(
                    "Failed to load project {slug}: {e}"
                ))
            })?;
        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_published_slugs(&self) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT slug
            FROM projects
            WHERE published = TRUE
            ORDER BY slug
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to list project slugs: {e}"))
        })?;
        rows.iter()
            .map(|row| {
                row.try_get("slug").map_err(|e| {
                    ContentError::Internal(format!("Failed to read slug: {e}"))
                })
            })
            .collect()
    }

    async fn list_all(&self) -> Result<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                ContentError::Internal(format!("Failed to list projects: {e}"))
            })?;
        Self::map_rows(rows)
    }

    async fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        let sql =
            format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.to_uuid())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                ContentError::Internal(format!("Failed to load project: {e}"))
            })?;
        row.as_ref().map(Self::map_row).transpose()
    }

    async fn insert(&self, project: &Project) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, slug, locale, title, summary, description, credits, year,
                "order", client, piece_type, duration, video_url,
                external_link, cover_image_path, gallery_image_paths,
                gallery_video_paths, tags, is_featured, published, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21
            )
            "#,
        )
        .bind(project.id.to_uuid())
        .bind(&project.slug)
        .bind(project.locale.as_str())
        .bind(&project.title)
        .bind(&project.summary)
        .bind(&project.description)
        .bind(&project.credits)
        .bind(project.year)
        .bind(project.order)
        .bind(&project.client)
        .bind(&project.piece_type)
        .bind(&project.duration)
        .bind(&project.video_url)
        .bind(&project.external_link)
        .bind(&project.cover_image_path)
        .bind(&project.gallery_image_paths)
        .bind(&project.gallery_video_paths)
        .bind(&project.tags)
        .bind(project.is_featured)
        .bind(project.published)
        .bind(project.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to insert project: {e}"))
        })?;
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                slug = $2, locale = $3, title = $4, summary = $5,
                description = $6, credits = $7, year = $8, "order" = $9,
                client = $10, piece_type = $11, duration = $12,
                video_url = $13, external_link = $14, tags = $15,
                is_featured = $16, published = $17
            WHERE id = $1
            "#,
        )
        .bind(project.id.to_uuid())
        .bind(&project.slug)
        .bind(project.locale.as_str())
        .bind(&project.title)
        .bind(&project.summary)
        .bind(&project.description)
        .bind(&project.credits)
        .bind(project.year)
        .bind(project.order)
        .bind(&project.client)
        .bind(&project.piece_type)
        .bind(&project.duration)
        .bind(&project.video_url)
        .bind(&project.external_link)
        .bind(&project.tags)
        .bind(project.is_featured)
        .bind(project.published)
        .execute(self.pool())
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to update project: {e}"))
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_published(
        &self,
        id: ProjectId,
        published: bool,
    ) -> Result<bool> {
        let result =
            sqlx::query("UPDATE projects SET published = $2 WHERE id = $1")
                .bind(id.to_uuid())
                .bind(published)
                .execute(self.pool())
                .await
                .map_err(|e| {
                    ContentError::Internal(format!(
                        "Failed to publish project: {e}"
                    ))
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_cover_path(&self, id: ProjectId, path: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE projects SET cover_image_path = $2 WHERE id = $1",
        )
        .bind(id.to_uuid())
        .bind(path)
        .execute(self.pool())
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to set project cover: {e}"))
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_gallery_paths(
        &self,
        id: ProjectId,
        image_paths: &[String],
        video_paths: &[String],
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET gallery_image_paths = $2, gallery_video_paths = $3
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .bind(image_paths)
        .bind(video_paths)
        .execute(self.pool())
        .await
        .map_err(|e| {
            ContentError::Internal(format!(
                "Failed to update project gallery: {e}"
            ))
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ProjectId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.to_uuid())
            .execute(self.pool())
            .await
            .map_err(|e| {
                ContentError::Internal(format!("Failed to delete project: {e}"))
            })?;
        Ok(result.rows_affected() > 0)
    }
}
