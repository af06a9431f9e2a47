use once_cell::sync::Lazy;
use regex::Regex;
use reelfolio_model::VideoRef;

static VIMEO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"vimeo\.com/(?:video/)?(\d+)")
        .expect("vimeo url pattern should compile")
});

static YOUTUBE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]+)")
        .expect("youtube url pattern should compile")
});

/// Recognize a Vimeo or YouTube link. Vimeo wins when both would match.
pub fn parse_video_url(url: &str) -> Option<VideoRef> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if let Some(id) = VIMEO_URL.captures(url).and_then(|c| c.get(1)) {
        return Some(VideoRef::Vimeo(id.as_str().to_string()));
    }
    YOUTUBE_URL
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|id| VideoRef::YouTube(id.as_str().to_string()))
}

/// Official YouTube poster frame.
pub fn youtube_thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/hqdefault.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_hosts() {
        assert_eq!(
            parse_video_url("https://vimeo.com/123456"),
            Some(VideoRef::Vimeo("123456".into()))
        );
        assert_eq!(
            parse_video_url("https://player.vimeo.com/video/987"),
            Some(VideoRef::Vimeo("987".into()))
        );
        assert_eq!(
            parse_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1"),
            Some(VideoRef::YouTube("dQw4w9WgXcQ".into()))
        );
        assert_eq!(
            parse_video_url("https://youtu.be/abc_-1"),
            Some(VideoRef::YouTube("abc_-1".into()))
        );
    }

    #[test]
    fn other_links_are_ignored() {
        assert_eq!(parse_video_url(""), None);
        assert_eq!(parse_video_url("https://example.com/watch?v=x"), None);
        assert_eq!(parse_video_url("https://vimeo.com/channels/staff"), None);
    }
}
