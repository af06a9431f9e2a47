use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::client::{
    FetchedObject, ListOptions, ObjectStorage, StorageError, StorageObject,
    UploadOptions,
};
use super::urls::encode_path;

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

/// Object storage kept in process memory. Used by tests and by local runs
/// without a storage deployment.
#[derive(Debug)]
pub struct InMemoryObjectStorage {
    base_url: String,
    objects: Mutex<BTreeMap<(String, String), StoredObject>>,
    fail_listing: AtomicBool,
    fail_signing: AtomicBool,
    fail_uploads: AtomicBool,
}

impl InMemoryObjectStorage {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: Mutex::new(BTreeMap::new()),
            fail_listing: AtomicBool::new(false),
            fail_signing: AtomicBool::new(false),
            fail_uploads: AtomicBool::new(false),
        }
    }

    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub fn fail_signing(&self, fail: bool) {
        self.fail_signing.store(fail, Ordering::SeqCst);
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub async fn put(&self, bucket: &str, path: &str, bytes: impl Into<Vec<u8>>) {
        self.objects.lock().await.insert(
            (bucket.to_string(), normalize(path)),
            StoredObject {
                bytes: bytes.into(),
                content_type: None,
            },
        );
    }

    pub async fn contains(&self, bucket: &str, path: &str) -> bool {
        self.objects
            .lock()
            .await
            .contains_key(&(bucket.to_string(), normalize(path)))
    }

    /// Every key stored in `bucket`, sorted.
    pub async fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .await
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, path)| path.clone())
            .collect()
    }
}

fn normalize(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn list(
        &self,
        bucket: &str,
        prefix: &str,
        options: ListOptions,
    ) -> Result<Vec<StorageObject>, StorageError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(StorageError::Api {
                status: 500,
                message: "listing unavailable".into(),
            });
        }
        let prefix = prefix.trim_matches('/');
        let scope = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}/")
        };

        let objects = self.objects.lock().await;
        let mut folders = BTreeSet::new();
        let mut files = BTreeSet::new();
        for (b, path) in objects.keys() {
            if b != bucket {
                continue;
            }
            let Some(rest) = path.strip_prefix(&scope) else {
                continue;
            };
            match rest.split_once('/') {
                Some((folder, _)) => {
                    folders.insert(folder.to_string());
                }
                None => {
                    files.insert(rest.to_string());
                }
            }
        }

        let mut entries: Vec<StorageObject> = folders
            .into_iter()
            .map(|name| StorageObject {
                name,
                id: None,
                updated_at: None,
            })
            .chain(files.into_iter().map(StorageObject::file))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries
            .into_iter()
            .skip(options.offset as usize)
            .take(options.limit as usize)
            .collect())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        body: Vec<u8>,
        options: UploadOptions,
    ) -> Result<String, StorageError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Api {
                status: 500,
                message: "upload rejected".into(),
            });
        }
        let key = (bucket.to_string(), normalize(path));
        let mut objects = self.objects.lock().await;
        if !options.upsert && objects.contains_key(&key) {
            return Err(StorageError::Api {
                status: 409,
                message: "The resource already exists".into(),
            });
        }
        let stored = format!("{}/{}", key.0, key.1);
        objects.insert(
            key,
            StoredObject {
                bytes: body,
                content_type: options.content_type,
            },
        );
        Ok(stored)
    }

    async fn remove(
        &self,
        bucket: &str,
        paths: &[String],
    ) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().await;
        for path in paths {
            objects.remove(&(bucket.to_string(), normalize(path)));
        }
        Ok(())
    }

    async fn create_signed_url(
        &self,
        bucket: &str,
        path: &str,
        _expires_in: Duration,
    ) -> Result<String, StorageError> {
        if self.fail_signing.load(Ordering::SeqCst) {
            return Err(StorageError::Api {
                status: 400,
                message: "signing unavailable".into(),
            });
        }
        Ok(format!(
            "{}/storage/v1/object/sign/{bucket}/{}?token=memory",
            self.base_url,
            encode_path(path)
        ))
    }

    async fn fetch_url(&self, url: &str) -> Result<FetchedObject, StorageError> {
        let prefix = format!("{}/storage/v1/object/public/", self.base_url);
        let rest = url
            .strip_prefix(&prefix)
            .ok_or_else(|| StorageError::NotFound(url.to_string()))?;
        let (bucket, path) = rest
            .split_once('/')
            .ok_or_else(|| StorageError::NotFound(url.to_string()))?;
        let path = path
            .split('/')
            .map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect::<Vec<_>>()
            .join("/");
        let objects = self.objects.lock().await;
        let stored = objects
            .get(&(bucket.to_string(), path))
            .ok_or_else(|| StorageError::NotFound(url.to_string()))?;
        Ok(FetchedObject {
            content_type: stored.content_type.clone(),
            bytes: stored.bytes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listing_is_non_recursive() {
        let storage = InMemoryObjectStorage::new("http://storage.test");
        storage.put("projects", "portfolio/b.jpg", b"b".to_vec()).await;
        storage.put("projects", "portfolio/a.jpg", b"a".to_vec()).await;
        storage
            .put("projects", "portfolio/thumb/a.jpg", b"t".to_vec())
            .await;
        storage.put("projects", "other/c.jpg", b"c".to_vec()).await;

        let listing = storage
            .list("projects", "portfolio", ListOptions::with_limit(500))
            .await
            .expect("listing");
        let names: Vec<_> = listing.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "thumb"]);
        assert!(listing[2].is_folder());
    }

    #[tokio::test]
    async fn upload_without_upsert_conflicts() {
        let storage = InMemoryObjectStorage::new("http://storage.test");
        storage
            .upload("public", "a.jpg", vec![1], UploadOptions::default())
            .await
            .expect("first upload");
        let err = storage
            .upload("public", "a.jpg", vec![2], UploadOptions::default())
            .await
            .expect_err("duplicate");
        assert!(matches!(err, StorageError::Api { status: 409, .. }));
        storage
            .upload("public", "a.jpg", vec![3], UploadOptions::upsert())
            .await
            .expect("upsert");
    }

    #[tokio::test]
    async fn fetches_by_public_url() {
        let storage = InMemoryObjectStorage::new("http://storage.test");
        storage.put("projects", "slug/my photo.jpg", b"img".to_vec()).await;
        let fetched = storage
            .fetch_url(
                "http://storage.test/storage/v1/object/public/projects/slug/my%20photo.jpg",
            )
            .await
            .expect("fetch");
        assert_eq!(fetched.bytes, b"img");
    }
}
