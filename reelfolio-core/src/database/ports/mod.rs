//! Repository ports (interfaces) grouped by content area.
//! Postgres adapters live under `database::infrastructure::postgres`, the
//! in-memory adapters used by tests and database-less runs under
//! `database::infrastructure::memory`.

pub mod contact;
pub mod galleries;
pub mod pages;
pub mod photos;
pub mod projects;
pub mod video_ids;
