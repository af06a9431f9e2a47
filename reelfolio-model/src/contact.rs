use chrono::{DateTime, Utc};

use crate::error::{ModelError, Result};

/// Validated contact form input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewContactSubmission {
    pub name: String,
    pub email_or_whatsapp: String,
    pub message: String,
}

impl NewContactSubmission {
    /// Trim every field and reject the submission when any is empty.
    pub fn new(name: &str, email_or_whatsapp: &str, message: &str) -> Result<Self> {
        let name = name.trim();
        let email_or_whatsapp = email_or_whatsapp.trim();
        let message = message.trim();
        if name.is_empty() || email_or_whatsapp.is_empty() || message.is_empty()
        {
            return Err(ModelError::Validation(
                "name, email_or_whatsapp and message are required".into(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            email_or_whatsapp: email_or_whatsapp.to_string(),
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email_or_whatsapp: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        assert!(NewContactSubmission::new("Ana", "  ", "hola").is_err());
        assert!(NewContactSubmission::new("", "a@b.c", "hola").is_err());
    }

    #[test]
    fn fields_are_trimmed() {
        let s = NewContactSubmission::new(" Ana ", "a@b.c\n", " hola ")
            .expect("valid submission");
        assert_eq!(s.name, "Ana");
        assert_eq!(s.email_or_whatsapp, "a@b.c");
        assert_eq!(s.message, "hola");
    }
}
