use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

use super::urls::encode_path;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object storage is not configured")]
    NotConfigured,

    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage responded with {status}: {message}")]
    Api { status: u16, message: String },

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("invalid storage response: {0}")]
    InvalidResponse(String),
}

/// Entry returned by a bucket listing. Folders come back with no `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageObject {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl StorageObject {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Some(uuid::Uuid::new_v4().to_string()),
            updated_at: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: u32,
    pub offset: u32,
}

impl ListOptions {
    pub fn with_limit(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::with_limit(100)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    pub upsert: bool,
    /// Seconds, sent as `max-age`.
    pub cache_control: Option<u64>,
    pub content_type: Option<String>,
}

impl UploadOptions {
    pub fn upsert() -> Self {
        Self {
            upsert: true,
            ..Self::default()
        }
    }

    pub fn with_cache_control(mut self, seconds: u64) -> Self {
        self.cache_control = Some(seconds);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Bytes fetched from public storage, as served to the image proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedObject {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Port over an S3-like object store with a `storage/v1` HTTP surface.
#[async_trait]
pub trait ObjectStorage: Send + Sync + fmt::Debug {
    /// Non-recursive listing of `prefix` inside `bucket`, sorted by name.
    async fn list(
        &self,
        bucket: &str,
        prefix: &str,
        options: ListOptions,
    ) -> Result<Vec<StorageObject>, StorageError>;

    /// Store `body` under `path`; returns the object key.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        body: Vec<u8>,
        options: UploadOptions,
    ) -> Result<String, StorageError>;

    async fn remove(
        &self,
        bucket: &str,
        paths: &[String],
    ) -> Result<(), StorageError>;

    async fn create_signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;

    /// GET an absolute public object URL.
    async fn fetch_url(&self, url: &str) -> Result<FetchedObject, StorageError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Supabase-compatible storage client authenticated with a service key.
#[derive(Clone)]
pub struct SupabaseStorageClient {
    http: Client,
    base_url: String,
    service_key: String,
}

impl fmt::Debug for SupabaseStorageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseStorageClient")
            .field("base_url", &self.base_url)
            .field("has_service_key", &!self.service_key.is_empty())
            .finish()
    }
}

impl SupabaseStorageClient {
    pub fn new(
        base_url: &str,
        service_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(StorageError::NotConfigured);
        }
        let http = Client::builder().timeout(timeout).build()?;
        info!(base_url = %base_url, "object storage client ready");
        Ok(Self {
            http,
            base_url,
            service_key: service_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, tail: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, tail)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        if self.service_key.is_empty() {
            return builder;
        }
        builder
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }

    async fn check(
        response: Response,
        subject: &str,
    ) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(subject.to_string()));
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or(text);
        Err(StorageError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorageClient {
    async fn list(
        &self,
        bucket: &str,
        prefix: &str,
        options: ListOptions,
    ) -> Result<Vec<StorageObject>, StorageError> {
        let url = self.endpoint(&format!("object/list/{bucket}"));
        let body = json!({
            "prefix": prefix.trim_matches('/'),
            "limit": options.limit,
            "offset": options.offset,
            "sortBy": { "column": "name", "order": "asc" },
        });
        let response = self
            .authorized(self.http.post(url))
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response, prefix).await?;
        let objects: Vec<StorageObject> = response.json().await?;
        debug!(bucket, prefix, count = objects.len(), "listed storage prefix");
        Ok(objects)
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        body: Vec<u8>,
        options: UploadOptions,
    ) -> Result<String, StorageError> {
        let key = path.trim_start_matches('/');
        let url = self.endpoint(&format!("object/{bucket}/{}", encode_path(key)));
        let mut request = self
            .authorized(self.http.post(url))
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(body);
        if let Some(seconds) = options.cache_control {
            request =
                request.header(header::CACHE_CONTROL, format!("max-age={seconds}"));
        }
        if let Some(content_type) = options.content_type.as_deref() {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let response = Self::check(request.send().await?, key).await?;
        let parsed: UploadResponse = response.json().await?;
        debug!(bucket, key, "uploaded object");
        Ok(parsed.key.unwrap_or_else(|| format!("{bucket}/{key}")))
    }

    async fn remove(
        &self,
        bucket: &str,
        paths: &[String],
    ) -> Result<(), StorageError> {
        if paths.is_empty() {
            return Ok(());
        }
        let url = self.endpoint(&format!("object/{bucket}"));
        let response = self
            .authorized(self.http.delete(url))
            .json(&json!({ "prefixes": paths }))
            .send()
            .await?;
        Self::check(response, bucket).await?;
        debug!(bucket, count = paths.len(), "removed objects");
        Ok(())
    }

    async fn create_signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let key = path.trim_start_matches('/');
        let url =
            self.endpoint(&format!("object/sign/{bucket}/{}", encode_path(key)));
        let response = self
            .authorized(self.http.post(url))
            .json(&json!({ "expiresIn": expires_in.as_secs() }))
            .send()
            .await?;
        let response = Self::check(response, key).await?;
        let parsed: SignResponse = response.json().await?;
        let signed = parsed
            .signed_url
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                StorageError::InvalidResponse("missing signedURL".into())
            })?;
        if signed.starts_with("http://") || signed.starts_with("https://") {
            Ok(signed)
        } else {
            Ok(format!(
                "{}/storage/v1/{}",
                self.base_url,
                signed.trim_start_matches('/')
            ))
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<FetchedObject, StorageError> {
        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "image/*")
            .send()
            .await?;
        let response = Self::check(response, url).await?;
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok(FetchedObject {
            content_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_url_is_not_configured() {
        let err = SupabaseStorageClient::new("  ", "key", Duration::from_secs(5))
            .expect_err("blank base must be rejected");
        assert!(matches!(err, StorageError::NotConfigured));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = SupabaseStorageClient::new(
            "https://demo.supabase.co/",
            "key",
            Duration::from_secs(5),
        )
        .expect("client");
        assert_eq!(client.base_url(), "https://demo.supabase.co");
        assert_eq!(
            client.endpoint("object/list/projects"),
            "https://demo.supabase.co/storage/v1/object/list/projects"
        );
    }

    #[test]
    fn folders_have_no_id() {
        let listing: Vec<StorageObject> = serde_json::from_str(
            r#"[{"name":"thumb","id":null},{"name":"a.jpg","id":"1"}]"#,
        )
        .expect("listing json");
        assert!(listing[0].is_folder());
        assert!(!listing[1].is_folder());
    }
}
