use async_trait::async_trait;
use chrono::Utc;
use reelfolio_model::{ContactSubmission, NewContactSubmission};
use tokio::sync::Mutex;

use crate::database::ports::contact::ContactRepository;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    submissions: Mutex<Vec<ContactSubmission>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn insert(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission> {
        let mut submissions = self.submissions.lock().await;
        let row = ContactSubmission {
            id: submissions.len() as i64 + 1,
            name: submission.name,
            email_or_whatsapp: submission.email_or_whatsapp,
            message: submission.message,
            created_at: Utc::now(),
        };
        submissions.push(row.clone());
        Ok(row)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ContactSubmission>> {
        let submissions = self.submissions.lock().await;
        Ok(submissions
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}
