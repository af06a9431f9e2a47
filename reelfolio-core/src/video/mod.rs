//! Video host integration: the account's video listing, the curated
//! hidden/custom id sets, and thumbnail lookup.

pub mod library;
pub mod vimeo;

pub use library::{VideoLibrary, normalize_video_id};
pub use vimeo::{ProviderError, VideoSource, VimeoClient, pick_thumbnail};
