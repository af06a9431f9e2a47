use async_trait::async_trait;
use reelfolio_model::{GalleryId, PortfolioGallery};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::database::ports::galleries::GalleriesRepository;
use crate::error::{ContentError, Result};

#[derive(Debug, Clone)]
pub struct PostgresGalleriesRepository {
    pool: PgPool,
}

impl PostgresGalleriesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<PortfolioGallery> {
        let read = |e: sqlx::Error| {
            ContentError::Internal(format!("Failed to read gallery row: {e}"))
        };
        let id: Uuid = row.try_get("id").map_err(read)?;
        Ok(PortfolioGallery {
            id: GalleryId(id),
            name: row.try_get("name").map_err(read)?,
            slug: row.try_get("slug").map_err(read)?,
            order: row.try_get("order").map_err(read)?,
            is_visible: row.try_get("is_visible").map_err(read)?,
            created_at: row.try_get("created_at").map_err(read)?,
        })
    }
}

#[async_trait]
impl GalleriesRepository for PostgresGalleriesRepository {
    async fn list(&self) -> Result<Vec<PortfolioGallery>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, slug, "order", is_visible, created_at
            FROM portfolio_galleries
            ORDER BY "order" ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to list galleries: {e}"))
        })?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn get(&self, id: GalleryId) -> Result<Option<PortfolioGallery>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, slug, "order", is_visible, created_at
            FROM portfolio_galleries
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to load gallery: {e}"))
        })?;
        row.as_ref().map(Self::map_row).transpose()
    }

    async fn insert(&self, gallery: &PortfolioGallery) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO portfolio_galleries
                (id, name, slug, "order", is_visible, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(gallery.id.to_uuid())
        .bind(&gallery.name)
        .bind(&gallery.slug)
        .bind(gallery.order)
        .bind(gallery.is_visible)
        .bind(gallery.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to insert gallery: {e}"))
        })?;
        Ok(())
    }

    async fn update(&self, gallery: &PortfolioGallery) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE portfolio_galleries
            SET name = $2, slug = $3, "order" = $4, is_visible = $5
            WHERE id = $1
            "#,
        )
        .bind(gallery.id.to_uuid())
        .bind(&gallery.name)
        .bind(&gallery.slug)
        .bind(gallery.order)
        .bind(gallery.is_visible)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to update gallery: {e}"))
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: GalleryId) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM portfolio_galleries WHERE id = $1")
                .bind(id.to_uuid())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    ContentError::Internal(format!(
                        "Failed to delete gallery: {e}"
                    ))
                })?;
        Ok(result.rows_affected() > 0)
    }
}
