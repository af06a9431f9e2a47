//! Contact form intake. Submissions are stored; relaying them by email is
//! left to whatever reads the table.

use std::sync::Arc;

use reelfolio_model::{ContactSubmission, NewContactSubmission};
use tracing::info;

use crate::database::ports::contact::ContactRepository;
use crate::error::Result;

#[derive(Clone)]
pub struct ContactService {
    submissions: Arc<dyn ContactRepository>,
}

impl std::fmt::Debug for ContactService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactService").finish_non_exhaustive()
    }
}

impl ContactService {
    pub fn new(submissions: Arc<dyn ContactRepository>) -> Self {
        Self { submissions }
    }

    /// Every field is trimmed and required.
    pub async fn submit_contact(
        &self,
        name: &str,
        email_or_whatsapp: &str,
        message: &str,
    ) -> Result<ContactSubmission> {
        let submission =
            NewContactSubmission::new(name, email_or_whatsapp, message)?;
        let stored = self.submissions.insert(submission).await?;
        info!(id = stored.id, "contact submission stored");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentError;
    use crate::database::infrastructure::memory::InMemoryContactRepository;

    #[tokio::test]
    async fn stores_trimmed_submission() {
        let repo = Arc::new(InMemoryContactRepository::new());
        let service = ContactService::new(repo.clone());
        let stored = service
            .submit_contact(" Ana ", "+34 600 000 000", " Hola ")
            .await
            .expect("submit");
        assert_eq!(stored.name, "Ana");
        assert_eq!(stored.message, "Hola");
        assert_eq!(repo.list_recent(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_fields_are_invalid_input() {
        let service =
            ContactService::new(Arc::new(InMemoryContactRepository::new()));
        let err = service
            .submit_contact("Ana", "", "Hola")
            .await
            .expect_err("missing contact");
        assert!(matches!(err, ContentError::InvalidInput(_)));
    }
}
