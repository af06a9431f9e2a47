//! # Reelfolio Core
//!
//! Content services for the Reelfolio portfolio backend.
//!
//! - [`image`]: thumbnail/large/thumbs path derivation for stored images
//! - [`storage`]: object storage client, display URLs and their memo
//! - [`sync`]: one-way reconciliation of storage listings into photo rows
//! - [`content`]: read-side accessors used by the public API
//! - [`admin`]: allowlist-gated mutations
//! - [`database`]: repository ports with Postgres and in-memory adapters
//!
//! ## Feature Flags
//!
//! - `database`: Postgres adapters (sqlx) and the embedded migrations

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod admin;
pub mod application;
pub mod auth;
pub mod contact;
pub mod content;
pub mod database;
pub mod error;
pub mod image;
pub mod storage;
pub mod sync;
pub mod video;

pub use application::unit_of_work::{AppUnitOfWork, AppUnitOfWorkBuilder};
pub use error::{ContentError, Result};

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
