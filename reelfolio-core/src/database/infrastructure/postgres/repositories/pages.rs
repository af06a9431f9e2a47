use async_trait::async_trait;
use reelfolio_model::{Locale, Page};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::parse_locale;
use crate::database::ports::pages::PagesRepository;
use crate::error::{ContentError, Result};

#[derive(Debug, Clone)]
pub struct PostgresPagesRepository {
    pool: PgPool,
}

impl PostgresPagesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<Page> {
        let read = |e: sqlx::Error| {
            ContentError::Internal(format!("Failed to read page row: {e}"))
        };
        let locale: String = row.try_get("locale").map_err(read)?;
        Ok(Page {
            slug: row.try_get("slug").map_err(read)?,
            locale: parse_locale(&locale),
            title: row.try_get("title").map_err(read)?,
            content: row.try_get("content").map_err(read)?,
        })
    }
}

#[async_trait]
impl PagesRepository for PostgresPagesRepository {
    async fn list(&self, locale: Locale) -> Result<Vec<Page>> {
        let rows = sqlx::query(
            r#"
            SELECT slug, locale, title, content
            FROM pages
            WHERE locale = $1
            ORDER BY slug
            "#,
        )
        .bind(locale.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to list pages: {e}"))
        })?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn get(&self, slug: &str, locale: Locale) -> Result<Option<Page>> {
        let row = sqlx::query(
            r#"
            SELECT slug, locale, title, content
            FROM pages
            WHERE slug = $1 AND locale = $2
            "#,
        )
        .bind(slug)
        .bind(locale.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to load page {slug}: {e}"))
        })?;
        row.as_ref().map(Self::map_row).transpose()
    }

    async fn upsert(&self, page: &Page) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pages (slug, locale, title, content, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (slug, locale) DO UPDATE SET
                title = EXCLUDED.title,
                content = EXCLUDED.content,
                updated_at = NOW()
            "#,
        )
        .bind(&page.slug)
        .bind(page.locale.as_str())
        .bind(&page.title)
        .bind(&page.content)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            ContentError::Internal(format!("Failed to save page: {e}"))
        })?;
        Ok(())
    }
}
