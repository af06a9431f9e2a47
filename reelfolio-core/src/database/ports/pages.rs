use async_trait::async_trait;
use reelfolio_model::{Locale, Page};

use crate::Result;

#[async_trait]
pub trait PagesRepository: Send + Sync {
    async fn list(&self, locale: Locale) -> Result<Vec<Page>>;
    async fn get(&self, slug: &str, locale: Locale) -> Result<Option<Page>>;
    async fn upsert(&self, page: &Page) -> Result<()>;
}
