use std::collections::HashSet;
use std::sync::Arc;

use reelfolio_model::VimeoVideo;
use tracing::warn;

use super::vimeo::VideoSource;
use crate::database::ports::video_ids::VideoIdsRepository;
use crate::error::Result;

/// Digits only, so ids pasted as URLs or with whitespace compare equal to
/// the ids the video host returns.
pub fn normalize_video_id(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// The account's video listing combined with the admin-curated id sets.
#[derive(Clone)]
pub struct VideoLibrary {
    source: Arc<dyn VideoSource>,
    ids: Arc<dyn VideoIdsRepository>,
}

impl std::fmt::Debug for VideoLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoLibrary")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl VideoLibrary {
    pub fn new(
        source: Arc<dyn VideoSource>,
        ids: Arc<dyn VideoIdsRepository>,
    ) -> Self {
        Self { source, ids }
    }

    pub fn source(&self) -> &Arc<dyn VideoSource> {
        &self.source
    }

    /// Listing failures degrade to an empty list.
    pub async fn portfolio_videos(&self) -> Vec<VimeoVideo> {
        match self.source.portfolio_videos().await {
            Ok(videos) => videos,
            Err(err) => {
                warn!(error = %err, "video listing failed");
                Vec::new()
            }
        }
    }

    pub async fn hidden_ids(&self) -> HashSet<String> {
        normalized_set(self.ids.hidden_ids().await, "hidden")
    }

    pub async fn custom_ids(&self) -> HashSet<String> {
        normalized_set(self.ids.custom_ids().await, "custom")
    }

    /// Listing without hidden ids, followed by pinned ids the listing did not
    /// already include.
    pub async fn work_videos(&self) -> Vec<VimeoVideo> {
        let hidden = self.hidden_ids().await;
        let mut videos: Vec<VimeoVideo> = self
            .portfolio_videos()
            .await
            .into_iter()
            .filter(|v| !hidden.contains(&normalize_video_id(&v.id)))
            .collect();

        let listed: HashSet<String> =
            videos.iter().map(|v| normalize_video_id(&v.id)).collect();
        let mut pinned: Vec<String> = self
            .custom_ids()
            .await
            .into_iter()
            .filter(|id| !listed.contains(id) && !hidden.contains(id))
            .collect();
        pinned.sort();

        for id in pinned {
            let thumbnail = match self.source.thumbnail_for(&id).await {
                Ok(thumb) => thumb,
                Err(err) => {
                    warn!(video_id = %id, error = %err, "pinned video thumbnail lookup failed");
                    None
                }
            };
            videos.push(VimeoVideo {
                link: format!("https://vimeo.com/{id}"),
                id,
                name: String::new(),
                thumbnail,
                duration: 0,
                release_time: None,
            });
        }
        videos
    }

    pub async fn hide(&self, raw: &str) -> Result<String> {
        let id = require_id(raw)?;
        self.ids.hide(&id).await?;
        Ok(id)
    }

    pub async fn unhide(&self, raw: &str) -> Result<String> {
        let id = require_id(raw)?;
        self.ids.unhide(&id).await?;
        Ok(id)
    }

    pub async fn add_custom(&self, raw: &str) -> Result<String> {
        let id = require_id(raw)?;
        self.ids.add_custom(&id).await?;
        Ok(id)
    }

    pub async fn remove_custom(&self, raw: &str) -> Result<String> {
        let id = require_id(raw)?;
        self.ids.remove_custom(&id).await?;
        Ok(id)
    }
}

fn require_id(raw: &str) -> Result<String> {
    let id = normalize_video_id(raw);
    if id.is_empty() {
        return Err(crate::ContentError::InvalidInput(format!(
            "'{}' is not a video id",
            raw.trim()
        )));
    }
    Ok(id)
}

fn normalized_set(ids: Result<Vec<String>>, which: &str) -> HashSet<String> {
    match ids {
        Ok(ids) => ids
            .iter()
            .map(|id| normalize_video_id(id))
            .filter(|id| !id.is_empty())
            .collect(),
        Err(err) => {
            warn!(set = which, error = %err, "video id set unavailable");
            HashSet::new()
        }
    }
}
