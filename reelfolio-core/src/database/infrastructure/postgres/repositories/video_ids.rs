use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::database::ports::video_ids::VideoIdsRepository;
use crate::error::{ContentError, Result};

/// Backed by `hidden_vimeo_ids` and `custom_vimeo_ids`, one `vimeo_id`
/// column each.
#[derive(Debug, Clone)]
pub struct PostgresVideoIdsRepository {
    pool: PgPool,
}

#[derive(Debug, Clone, Copy)]
enum IdSet {
    Hidden,
    Custom,
}

impl IdSet {
    fn table(self) -> &'static str {
        match self {
            IdSet::Hidden => "hidden_vimeo_ids",
            IdSet::Custom => "custom_vimeo_ids",
        }
    }
}

impl PostgresVideoIdsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ids(&self, set: IdSet) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT vimeo_id FROM {} ORDER BY created_at ASC",
            set.table()
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ContentError::Internal(format!(
                    "Failed to load {}: {e}",
                    set.table()
                ))
            })?;
        rows.iter()
            .map(|row| {
                row.try_get("vimeo_id").map_err(|e| {
                    ContentError::Internal(format!("Failed to read vimeo_id: {e}"))
                })
            })
            .collect()
    }

    async fn add(&self, set: IdSet, id: &str) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} (vimeo_id) VALUES ($1) ON CONFLICT (vimeo_id) DO NOTHING",
            set.table()
        );
        sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                ContentError::Internal(format!(
                    "Failed to add to {}: {e}",
                    set.table()
                ))
            })?;
        Ok(())
    }

    async fn remove(&self, set: IdSet, id: &str) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE vimeo_id = $1", set.table());
        sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                ContentError::Internal(format!(
                    "Failed to remove from {}: {e}",
                    set.table()
                ))
            })?;
        Ok(())
    }
}

#[async_trait]
impl VideoIdsRepository for PostgresVideoIdsRepository {
    async fn hidden_ids(&self) -> Result<Vec<String>> {
        self.ids(IdSet::Hidden).await
    }

    async fn custom_ids(&self) -> Result<Vec<String>> {
        self.ids(IdSet::Custom).await
    }

    async fn hide(&self, id: &str) -> Result<()> {
        self.add(IdSet::Hidden, id).await
    }

    async fn unhide(&self, id: &str) -> Result<()> {
        self.remove(IdSet::Hidden, id).await
    }

    async fn add_custom(&self, id: &str) -> Result<()> {
        self.add(IdSet::Custom, id).await
    }

    async fn remove_custom(&self, id: &str) -> Result<()> {
        self.remove(IdSet::Custom, id).await
    }
}
