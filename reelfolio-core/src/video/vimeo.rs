use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reelfolio_model::VimeoVideo;
use serde::Deserialize;
use tracing::{debug, warn};

const VIMEO_API_BASE: &str = "https://api.vimeo.com";
const VIMEO_OEMBED_BASE: &str = "https://vimeo.com/api/oembed.json";
const PAGE_SIZE: u32 = 40;
const PREFERRED_THUMB_WIDTH: u32 = 640;

static VIDEO_URI_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/videos/(\d+)").expect("video uri pattern should compile")
});

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid access token")]
    InvalidToken,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Anything that can list the account's videos, newest first.
#[async_trait]
pub trait VideoSource: Send + Sync + fmt::Debug {
    async fn portfolio_videos(&self) -> Result<Vec<VimeoVideo>, ProviderError>;

    /// Thumbnail URL for a single video, used when a project has no cover.
    async fn thumbnail_for(
        &self,
        id: &str,
    ) -> Result<Option<String>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct PictureSize {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    link: String,
}

#[derive(Debug, Default, Deserialize)]
struct Pictures {
    #[serde(default)]
    sizes: Vec<PictureSize>,
}

#[derive(Debug, Deserialize)]
struct ApiVideo {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    duration: Option<u64>,
    #[serde(default)]
    release_time: Option<String>,
    #[serde(default)]
    pictures: Option<Pictures>,
}

#[derive(Debug, Deserialize)]
struct VideoPage {
    #[serde(default)]
    data: Vec<ApiVideo>,
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    thumbnail_url: Option<String>,
}

fn id_from_uri(uri: &str) -> String {
    VIDEO_URI_ID
        .captures(uri)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Widest first; the first size at least 640 px wide, else the widest.
pub fn pick_thumbnail<'a>(
    sizes: impl IntoIterator<Item = (u32, &'a str)>,
) -> Option<String> {
    let mut sizes: Vec<(u32, &str)> = sizes.into_iter().collect();
    sizes.sort_by(|a, b| b.0.cmp(&a.0));
    sizes
        .iter()
        .find(|(width, _)| *width >= PREFERRED_THUMB_WIDTH)
        .or_else(|| sizes.first())
        .map(|(_, link)| link.to_string())
        .filter(|link| !link.is_empty())
}

impl From<ApiVideo> for VimeoVideo {
    fn from(video: ApiVideo) -> Self {
        let id = id_from_uri(&video.uri);
        let thumbnail = video.pictures.as_ref().and_then(|p| {
            pick_thumbnail(p.sizes.iter().map(|s| (s.width, s.link.as_str())))
        });
        VimeoVideo {
            link: video
                .link
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| format!("https://vimeo.com/{id}")),
            id,
            name: video.name.unwrap_or_default(),
            thumbnail,
            duration: video.duration.unwrap_or(0),
            release_time: video.release_time,
        }
    }
}

/// Read-only Vimeo API client authenticated with a personal access token.
#[derive(Clone)]
pub struct VimeoClient {
    http: reqwest::Client,
    token: Option<String>,
    api_base: String,
    oembed_base: String,
}

impl fmt::Debug for VimeoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VimeoClient")
            .field("api_base", &self.api_base)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl VimeoClient {
    pub fn new(
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            token: token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            api_base: VIMEO_API_BASE.to_string(),
            oembed_base: VIMEO_OEMBED_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_oembed_base(mut self, base: impl Into<String>) -> Self {
        self.oembed_base = base.into();
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn oembed_url(&self, id: &str) -> String {
        let target = format!("https://vimeo.com/video/{id}");
        format!("{}?url={}", self.oembed_base, urlencoding::encode(&target))
    }

    fn status_error(status: reqwest::StatusCode) -> ProviderError {
        match status.as_u16() {
            401 | 403 => ProviderError::InvalidToken,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited,
            _ => ProviderError::ApiError(format!(
                "Vimeo request failed with status {status}"
            )),
        }
    }
}

#[async_trait]
impl VideoSource for VimeoClient {
    async fn portfolio_videos(&self) -> Result<Vec<VimeoVideo>, ProviderError> {
        let Some(token) = self.token.as_deref() else {
            debug!("no video token configured, skipping listing");
            return Ok(Vec::new());
        };
        let response = self
            .http
            .get(format!("{}/me/videos", self.api_base))
            .query(&[("per_page", PAGE_SIZE.to_string()), ("sort", "date".into())])
            .bearer_auth(token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status));
        }
        let page: VideoPage = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
        Ok(page.data.into_iter().map(VimeoVideo::from).collect())
    }

    async fn thumbnail_for(
        &self,
        id: &str,
    ) -> Result<Option<String>, ProviderError> {
        let response = self.http.get(self.oembed_url(id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(video_id = id, %status, "oEmbed lookup failed");
            return Err(Self::status_error(status));
        }
        let body: OEmbedResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
        Ok(body
            .thumbnail_url
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_prefers_first_wide_enough_size() {
        let sizes = [(295, "s"), (1920, "xl"), (640, "m"), (1280, "l")];
        assert_eq!(pick_thumbnail(sizes), Some("xl".to_string()));
        assert_eq!(
            pick_thumbnail([(100, "a"), (200, "b")]),
            Some("b".to_string())
        );
        assert_eq!(pick_thumbnail(Vec::<(u32, &str)>::new()), None);
    }

    #[test]
    fn api_video_maps_to_model() {
        let page: VideoPage = serde_json::from_str(
            r#"{"data":[
                {"uri":"/videos/12345","name":"Reel","duration":90,
                 "release_time":"2024-01-01T00:00:00+00:00",
                 "pictures":{"sizes":[{"width":200,"link":"small"},{"width":960,"link":"big"}]}},
                {"uri":"/videos/777"}
            ]}"#,
        )
        .expect("page json");
        let videos: Vec<VimeoVideo> =
            page.data.into_iter().map(VimeoVideo::from).collect();
        assert_eq!(videos[0].id, "12345");
        assert_eq!(videos[0].thumbnail.as_deref(), Some("big"));
        assert_eq!(videos[0].duration, 90);
        assert_eq!(videos[1].link, "https://vimeo.com/777");
        assert_eq!(videos[1].name, "");
        assert_eq!(videos[1].thumbnail, None);
    }

    #[test]
    fn oembed_url_encodes_target() {
        let client = VimeoClient::new(None, Duration::from_secs(5))
            .expect("client");
        assert_eq!(
            client.oembed_url("42"),
            "https://vimeo.com/api/oembed.json?url=https%3A%2F%2Fvimeo.com%2Fvideo%2F42"
        );
    }

    #[tokio::test]
    async fn missing_token_lists_nothing() {
        let client = VimeoClient::new(Some("  ".into()), Duration::from_secs(5))
            .expect("client");
        assert!(!client.has_token());
        assert!(client.portfolio_videos().await.expect("listing").is_empty());
    }
}
