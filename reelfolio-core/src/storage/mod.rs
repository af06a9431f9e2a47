//! Object storage: the HTTP client port, URL derivation and its memo.

pub mod client;
pub mod memory;
pub mod url_cache;
pub mod urls;

pub use client::{
    FetchedObject, ListOptions, ObjectStorage, StorageError, StorageObject,
    SupabaseStorageClient, UploadOptions,
};
pub use memory::InMemoryObjectStorage;
pub use url_cache::UrlCache;
pub use urls::{
    DEFAULT_SIGNED_URL_TTL, StorageUrls, encode_path, is_safe_proxy_path,
};

/// Bucket names used by the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    /// Covers and project gallery uploads.
    pub site: String,
    /// Portfolio photos, backstage folders and proxied project images.
    pub projects: String,
}

impl Default for Buckets {
    fn default() -> Self {
        Self {
            site: "public".to_string(),
            projects: "projects".to_string(),
        }
    }
}
