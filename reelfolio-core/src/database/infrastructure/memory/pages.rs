use std::collections::HashMap;

use async_trait::async_trait;
use reelfolio_model::{Locale, Page};
use tokio::sync::Mutex;

use crate::database::ports::pages::PagesRepository;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct InMemoryPagesRepository {
    pages: Mutex<HashMap<(String, Locale), Page>>,
}

impl InMemoryPagesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PagesRepository for InMemoryPagesRepository {
    async fn list(&self, locale: Locale) -> Result<Vec<Page>> {
        let pages = self.pages.lock().await;
        let mut rows: Vec<Page> = pages
            .values()
            .filter(|p| p.locale == locale)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(rows)
    }

    async fn get(&self, slug: &str, locale: Locale) -> Result<Option<Page>> {
        let pages = self.pages.lock().await;
        Ok(pages.get(&(slug.to_string(), locale)).cloned())
    }

    async fn upsert(&self, page: &Page) -> Result<()> {
        self.pages
            .lock()
            .await
            .insert((page.slug.clone(), page.locale), page.clone());
        Ok(())
    }
}
