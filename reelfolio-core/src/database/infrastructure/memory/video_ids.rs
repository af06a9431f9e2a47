use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::database::ports::video_ids::VideoIdsRepository;
use crate::error::Result;

/// Insertion-ordered id sets.
#[derive(Debug, Default)]
pub struct InMemoryVideoIdsRepository {
    hidden: Mutex<Vec<String>>,
    custom: Mutex<Vec<String>>,
}

impl InMemoryVideoIdsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

async fn add(set: &Mutex<Vec<String>>, id: &str) {
    let mut ids = set.lock().await;
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}

async fn remove(set: &Mutex<Vec<String>>, id: &str) {
    set.lock().await.retain(|existing| existing != id);
}

#[async_trait]
impl VideoIdsRepository for InMemoryVideoIdsRepository {
    async fn hidden_ids(&self) -> Result<Vec<String>> {
        Ok(self.hidden.lock().await.clone())
    }

    async fn custom_ids(&self) -> Result<Vec<String>> {
        Ok(self.custom.lock().await.clone())
    }

    async fn hide(&self, id: &str) -> Result<()> {
        add(&self.hidden, id).await;
        Ok(())
    }

    async fn unhide(&self, id: &str) -> Result<()> {
        remove(&self.hidden, id).await;
        Ok(())
    }

    async fn add_custom(&self, id: &str) -> Result<()> {
        add(&self.custom, id).await;
        Ok(())
    }

    async fn remove_custom(&self, id: &str) -> Result<()> {
        remove(&self.custom, id).await;
        Ok(())
    }
}
