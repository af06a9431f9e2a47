//! Core data model definitions shared across Reelfolio crates.
#![allow(missing_docs)]

pub mod contact;
pub mod error;
pub mod ids;
pub mod image;
pub mod locale;
pub mod page;
pub mod portfolio;
pub mod project;
pub mod video;

// Intentionally curated re-exports for downstream consumers.
pub use contact::{ContactSubmission, NewContactSubmission};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{GalleryId, PhotoId, ProjectId};
pub use image::{ImageVariant, RenderSize};
pub use locale::Locale;
pub use page::Page;
pub use portfolio::{
    GalleryDraft, NewPortfolioPhoto, PortfolioGallery, PortfolioPhoto,
};
pub use project::{GalleryItem, Project, ProjectDraft, ProjectView};
pub use video::{VideoRef, VimeoVideo};
