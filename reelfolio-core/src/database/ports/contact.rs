use async_trait::async_trait;
use reelfolio_model::{ContactSubmission, NewContactSubmission};

use crate::Result;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission>;
    /// Newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<ContactSubmission>>;
}
