use async_trait::async_trait;

use crate::Result;

/// The two video id sets curated by admins: ids hidden from the work
/// listing and extra ids pinned to it. Ids are stored digits-only.
#[async_trait]
pub trait VideoIdsRepository: Send + Sync {
    async fn hidden_ids(&self) -> Result<Vec<String>>;
    async fn custom_ids(&self) -> Result<Vec<String>>;
    async fn hide(&self, id: &str) -> Result<()>;
    async fn unhide(&self, id: &str) -> Result<()>;
    async fn add_custom(&self, id: &str) -> Result<()>;
    async fn remove_custom(&self, id: &str) -> Result<()>;
}
