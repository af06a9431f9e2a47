//! Allowlist-gated mutations behind the admin UI.
//!
//! Every action takes the caller's [`AdminIdentity`](crate::auth::AdminIdentity)
//! and fails with [`ActionError`] when its email is not allowlisted. Uploads
//! and the row updates that follow them are not transactional: a failed row
//! update can leave an orphaned object in storage.

pub mod actions;
pub mod error;
pub mod naming;

pub use actions::{AdminActions, UploadFile};
pub use error::{ActionError, ActionErrorKind, ActionResult};
pub use naming::{parse_tags, slugify, unique_storage_name};
