use async_trait::async_trait;
use reelfolio_model::{ContactSubmission, NewContactSubmission};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::database::ports::contact::ContactRepository;
use crate::error::{ContentError, Result};

#[derive(Debug, Clone)]
pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<ContactSubmission> {
        let read = |e: sqlx::Error| {
            ContentError::Internal(format!("Failed to read contact row: {e}"))
        };
        Ok(ContactSubmission {
            id: row.try_get("id").map_err(read)?,
            name: row.try_get("name").map_err(read)?,
            email_or_whatsapp: row.try_get("email_or_whatsapp").map_err(read)?,
            message: row.try_get("message").map_err(read)?,
            created_at: row.try_get("created_at").map_err(read)?,
        })
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn insert(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission> {
        let row = sqlx::query(
            r#"
            INSERT INTO contact_submissions (name, email_or_whatsapp, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email_or_whatsapp, message, created_at
            "#,
        )
        .bind(&submission.name)
        .bind(&submission.email_or_whatsapp)
        .bind(&submission.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!(
                "Failed to store contact submission: {e}"
            ))
        })?;
        Self::map_row(&row)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ContactSubmission>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email_or_whatsapp, message, created_at
            FROM contact_submissions
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!(
                "Failed to list contact submissions: {e}"
            ))
        })?;
        rows.iter().map(Self::map_row).collect()
    }
}
