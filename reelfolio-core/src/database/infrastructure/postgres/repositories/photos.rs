use async_trait::async_trait;
use reelfolio_model::{GalleryId, NewPortfolioPhoto, PhotoId, PortfolioPhoto};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::database::ports::photos::PhotosRepository;
use crate::error::{ContentError, Result};

const PHOTO_COLUMNS: &str = r#"
    id, storage_path, public_url, is_visible, "order", gallery_id, created_at
"#;

#[derive(Debug, Clone)]
pub struct PostgresPhotosRepository {
    pool: PgPool,
}

impl PostgresPhotosRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<PortfolioPhoto> {
        let read = |e: sqlx::Error| {
            ContentError::Internal(format!("Failed to read photo row: {e}"))
        };
        let id: Uuid = row.try_get("id").map_err(read)?;
        let gallery_id: Option<Uuid> = row.try_get("gallery_id").map_err(read)?;
        Ok(PortfolioPhoto {
            id: PhotoId(id),
            storage_path: row.try_get("storage_path").map_err(read)?,
            public_url: row.try_get("public_url").map_err(read)?,
            is_visible: row.try_get("is_visible").map_err(read)?,
            order: row.try_get("order").map_err(read)?,
            gallery_id: gallery_id.map(GalleryId),
            created_at: row.try_get("created_at").map_err(read)?,
        })
    }
}

#[async_trait]
impl PhotosRepository for PostgresPhotosRepository {
    async fn storage_paths(&self, gallery: GalleryId) -> Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT storage_path FROM portfolio_photos WHERE gallery_id = $1",
        )
        .bind(gallery.to_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!(
                "Failed to load recorded photo paths: {e}"
            ))
        })?;
        rows.iter()
            .map(|row| {
                row.try_get("storage_path").map_err(|e| {
                    ContentError::Internal(format!(
                        "Failed to read storage_path: {e}"
                    ))
                })
            })
            .collect()
    }

    async fn all_storage_paths(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT DISTINCT storage_path FROM portfolio_photos")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ContentError::Internal(format!(
                    "Failed to load recorded photo paths: {e}"
                ))
            })?;
        rows.iter()
            .map(|row| {
                row.try_get("storage_path").map_err(|e| {
                    ContentError::Internal(format!(
                        "Failed to read storage_path: {e}"
                    ))
                })
            })
            .collect()
    }

    async fn max_order(&self, gallery: GalleryId) -> Result<Option<i32>> {
        let row = sqlx::query(
            r#"SELECT MAX("order") AS max_order FROM portfolio_photos WHERE gallery_id = $1"#,
        )
        .bind(gallery.to_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to load max photo order: {e}"))
        })?;
        row.try_get("max_order").map_err(|e| {
            ContentError::Internal(format!("Failed to read max_order: {e}"))
        })
    }

    async fn insert(&self, photo: NewPortfolioPhoto) -> Result<PortfolioPhoto> {
        let sql = format!(
            "INSERT INTO portfolio_photos \
                 (id, storage_path, public_url, is_visible, \"order\", gallery_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PHOTO_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(PhotoId::new().to_uuid())
            .bind(&photo.storage_path)
            .bind(&photo.public_url)
            .bind(photo.is_visible)
            .bind(photo.order)
            .bind(photo.gallery_id.map(|g| g.to_uuid()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                ContentError::Internal(format!(
                    "Failed to insert photo {}: {e}",
                    photo.storage_path
                ))
            })?;
        Self::map_row(&row)
    }

    async fn list(
        &self,
        gallery: Option<GalleryId>,
        visible_only: bool,
    ) -> Result<Vec<PortfolioPhoto>> {
        let sql = format!(
            "SELECT {PHOTO_COLUMNS} FROM portfolio_photos \
             WHERE ($1::uuid IS NULL OR gallery_id = $1) \
               AND ($2 = FALSE OR is_visible = TRUE) \
             ORDER BY \"order\" ASC, created_at ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(gallery.map(|g| g.to_uuid()))
            .bind(visible_only)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ContentError::Internal(format!("Failed to list photos: {e}"))
            })?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn get(&self, id: PhotoId) -> Result<Option<PortfolioPhoto>> {
        let sql =
            format!("SELECT {PHOTO_COLUMNS} FROM portfolio_photos WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.to_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                ContentError::Internal(format!("Failed to load photo: {e}"))
            })?;
        row.as_ref().map(Self::map_row).transpose()
    }

    async fn set_visibility(&self, id: PhotoId, visible: bool) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE portfolio_photos SET is_visible = $2 WHERE id = $1",
        )
        .bind(id.to_uuid())
        .bind(visible)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!(
                "Failed to update photo visibility: {e}"
            ))
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_order(&self, id: PhotoId, order: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"UPDATE portfolio_photos SET "order" = $2 WHERE id = $1"#,
        )
        .bind(id.to_uuid())
        .bind(order)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to reorder photo: {e}"))
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn move_to_gallery(
        &self,
        id: PhotoId,
        gallery: GalleryId,
        order: i32,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE portfolio_photos
            SET gallery_id = $2, "order" = $3
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .bind(gallery.to_uuid())
        .bind(order)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to move photo: {e}"))
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn detach_gallery(&self, gallery: GalleryId) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE portfolio_photos SET gallery_id = NULL WHERE gallery_id = $1",
        )
        .bind(gallery.to_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to detach photos: {e}"))
        })?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: PhotoId) -> Result<Option<PortfolioPhoto>> {
        let sql = format!(
            "DELETE FROM portfolio_photos WHERE id = $1 RETURNING {PHOTO_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id.to_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                ContentError::Internal(format!("Failed to delete photo: {e}"))
            })?;
        row.as_ref().map(Self::map_row).transpose()
    }
}
