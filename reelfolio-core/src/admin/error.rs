use serde::Serialize;
use thiserror::Error;

use crate::error::ContentError;
use crate::storage::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionErrorKind {
    Forbidden,
    NotFound,
    #[default]
    Failed,
}

/// Failure reported back to the admin UI as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{error}")]
pub struct ActionError {
    pub error: String,
    #[serde(skip)]
    pub kind: ActionErrorKind,
}

pub type ActionResult<T> = std::result::Result<T, ActionError>;

impl ActionError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: ActionErrorKind::Failed,
        }
    }

    pub fn forbidden() -> Self {
        Self {
            error: "Not authorized".to_string(),
            kind: ActionErrorKind::Forbidden,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self {
            error: format!("{} not found", what.into()),
            kind: ActionErrorKind::NotFound,
        }
    }
}

impl From<ContentError> for ActionError {
    fn from(err: ContentError) -> Self {
        let kind = match &err {
            ContentError::Forbidden(_) | ContentError::Unauthorized(_) => {
                ActionErrorKind::Forbidden
            }
            ContentError::NotFound(_) => ActionErrorKind::NotFound,
            _ => ActionErrorKind::Failed,
        };
        Self {
            error: match err {
                ContentError::InvalidInput(msg)
                | ContentError::NotFound(msg)
                | ContentError::Internal(msg) => msg,
                other => other.to_string(),
            },
            kind,
        }
    }
}

impl From<StorageError> for ActionError {
    fn from(err: StorageError) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_error_field_only() {
        let json = serde_json::to_value(ActionError::not_found("Project"))
            .expect("serialize");
        assert_eq!(json, serde_json::json!({ "error": "Project not found" }));
    }

    #[test]
    fn invalid_input_keeps_bare_message() {
        let err: ActionError =
            ContentError::InvalidInput("Title is required".into()).into();
        assert_eq!(err.error, "Title is required");
        assert_eq!(err.kind, ActionErrorKind::Failed);
    }
}
