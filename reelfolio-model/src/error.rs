use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidLocale(String),
    InvalidVariant(String),
    Validation(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidLocale(raw) => {
                write!(f, "unsupported locale: {raw}")
            }
            ModelError::InvalidVariant(raw) => {
                write!(f, "unknown image variant: {raw}")
            }
            ModelError::Validation(msg) => write!(f, "validation: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
