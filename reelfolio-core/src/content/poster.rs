use std::sync::Arc;

use reelfolio_model::{GalleryItem, Project, VideoRef};
use tracing::debug;

use super::video_url::youtube_thumbnail_url;
use crate::image::to_thumb_path_or_original;
use crate::storage::{StorageUrls, UrlCache};
use crate::video::VideoSource;

pub(crate) fn is_absolute_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

/// Picks the card image for a project: stored cover (thumbnail when it is
/// an image), an absolute cover URL, the video's thumbnail, the first gallery
/// image, or nothing.
#[derive(Clone)]
pub struct PosterResolver {
    urls: StorageUrls,
    bucket: String,
    videos: Option<Arc<dyn VideoSource>>,
    memo: UrlCache,
}

impl std::fmt::Debug for PosterResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosterResolver")
            .field("bucket", &self.bucket)
            .field("has_video_source", &self.videos.is_some())
            .field("memo", &self.memo)
            .finish()
    }
}

impl PosterResolver {
    pub fn new(
        urls: StorageUrls,
        bucket: impl Into<String>,
        videos: Option<Arc<dyn VideoSource>>,
        memo: UrlCache,
    ) -> Self {
        Self {
            urls,
            bucket: bucket.into(),
            videos,
            memo,
        }
    }

    async fn vimeo_thumbnail(&self, id: &str) -> Option<String> {
        let key = format!("vimeo:{id}");
        if let Some(hit) = self.memo.get(&key) {
            return Some(hit);
        }
        let source = self.videos.as_ref()?;
        match source.thumbnail_for(id).await {
            Ok(Some(thumb)) => {
                self.memo.insert(key, thumb.clone());
                Some(thumb)
            }
            Ok(None) => None,
            Err(err) => {
                debug!(video_id = id, error = %err, "no poster from video host");
                None
            }
        }
    }

    pub async fn poster_url(
        &self,
        project: &Project,
        primary_video: Option<&VideoRef>,
        gallery: &[GalleryItem],
    ) -> Option<String> {
        if let Some(cover) = project
            .cover_image_path
            .as_deref()
            .filter(|c| !c.trim().is_empty())
        {
            if is_absolute_url(cover) {
                return Some(cover.to_string());
            }
            let url = self
                .urls
                .public_object_url(&self.bucket, &to_thumb_path_or_original(cover));
            if !url.is_empty() {
                return Some(url);
            }
        }

        match primary_video {
            Some(VideoRef::YouTube(id)) => return Some(youtube_thumbnail_url(id)),
            Some(VideoRef::Vimeo(id)) => {
                if let Some(thumb) = self.vimeo_thumbnail(id).await {
                    return Some(thumb);
                }
            }
            None => {}
        }

        gallery
            .first()
            .map(|item| item.url.clone())
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use reelfolio_model::{ProjectDraft, VimeoVideo};

    use super::*;
    use crate::video::ProviderError;

    const BASE: &str = "https://demo.supabase.co";

    #[derive(Debug, Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VideoSource for CountingSource {
        async fn portfolio_videos(&self) -> Result<Vec<VimeoVideo>, ProviderError> {
            Ok(Vec::new())
        }

        async fn thumbnail_for(
            &self,
            id: &str,
        ) -> Result<Option<String>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(format!("https://i.vimeocdn.com/{id}_640.jpg")))
        }
    }

    fn resolver(source: Arc<CountingSource>) -> PosterResolver {
        PosterResolver::new(
            StorageUrls::new(Some(BASE), UrlCache::default()),
            "public",
            Some(source as Arc<dyn VideoSource>),
            UrlCache::new(64, Duration::from_secs(60)),
        )
    }

    fn project() -> Project {
        Project::from_draft(ProjectDraft {
            slug: "bestefar".into(),
            title: "Bestefar".into(),
            ..ProjectDraft::default()
        })
    }

    #[tokio::test]
    async fn stored_cover_uses_thumbnail() {
        let mut project = project();
        project.cover_image_path = Some("covers/bestefar/cover.png".into());
        let poster = resolver(Arc::default())
            .poster_url(&project, None, &[])
            .await;
        assert_eq!(
            poster.as_deref(),
            Some("https://demo.supabase.co/storage/v1/object/public/public/covers/bestefar/thumb/cover.jpg")
        );
    }

    #[tokio::test]
    async fn video_thumbnails_follow_cover() {
        let project = project();
        let youtube = VideoRef::YouTube("abc".into());
        assert_eq!(
            resolver(Arc::default())
                .poster_url(&project, Some(&youtube), &[])
                .await
                .as_deref(),
            Some("https://img.youtube.com/vi/abc/hqdefault.jpg")
        );

        let source = Arc::new(CountingSource::default());
        let resolver = resolver(source.clone());
        let vimeo = VideoRef::Vimeo("42".into());
        for _ in 0..2 {
            let poster = resolver.poster_url(&project, Some(&vimeo), &[]).await;
            assert_eq!(poster.as_deref(), Some("https://i.vimeocdn.com/42_640.jpg"));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn falls_back_to_gallery_then_nothing() {
        let project = project();
        let gallery = vec![GalleryItem {
            path: "gallery/bestefar/a.jpg".into(),
            url: "https://cdn.example/a.jpg".into(),
            order: 0,
        }];
        let resolver = resolver(Arc::default());
        assert_eq!(
            resolver.poster_url(&project, None, &gallery).await.as_deref(),
            Some("https://cdn.example/a.jpg")
        );
        assert_eq!(resolver.poster_url(&project, None, &[]).await, None);
    }
}
