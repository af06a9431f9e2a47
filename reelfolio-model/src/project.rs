use chrono::{DateTime, Utc};

use crate::ids::ProjectId;
use crate::locale::Locale;
use crate::video::VideoRef;

/// A portfolio project as stored in the `projects` table.
///
/// Storage paths (`cover_image_path`, `gallery_*_paths`) are object keys in
/// the site bucket; display URLs are derived by the content layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    pub id: ProjectId,
    pub slug: String,
    pub locale: Locale,
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub credits: Option<String>,
    pub year: Option<i32>,
    pub order: Option<i32>,
    pub client: Option<String>,
    pub piece_type: Option<String>,
    pub duration: Option<String>,
    pub video_url: Option<String>,
    pub external_link: Option<String>,
    pub cover_image_path: Option<String>,
    pub gallery_image_paths: Vec<String>,
    pub gallery_video_paths: Vec<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Build a fresh, unpublished project from an admin draft.
    pub fn from_draft(draft: ProjectDraft) -> Self {
        Self {
            id: ProjectId::new(),
            slug: draft.slug,
            locale: draft.locale,
            title: draft.title,
            summary: draft.summary,
            description: draft.description,
            credits: draft.credits,
            year: draft.year,
            order: draft.order,
            client: draft.client,
            piece_type: draft.piece_type,
            duration: draft.duration,
            video_url: draft.video_url,
            external_link: draft.external_link,
            cover_image_path: None,
            gallery_image_paths: Vec::new(),
            gallery_video_paths: Vec::new(),
            tags: draft.tags,
            is_featured: draft.is_featured,
            published: false,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the editable fields with a draft, leaving uploads intact.
    pub fn apply_draft(&mut self, draft: ProjectDraft) {
        self.slug = draft.slug;
        self.locale = draft.locale;
        self.title = draft.title;
        self.summary = draft.summary;
        self.description = draft.description;
        self.credits = draft.credits;
        self.year = draft.year;
        self.order = draft.order;
        self.client = draft.client;
        self.piece_type = draft.piece_type;
        self.duration = draft.duration;
        self.video_url = draft.video_url;
        self.external_link = draft.external_link;
        self.tags = draft.tags;
        self.is_featured = draft.is_featured;
        self.published = draft.published;
    }
}

/// Editable project fields as submitted from the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectDraft {
    pub slug: String,
    pub locale: Locale,
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub credits: Option<String>,
    pub year: Option<i32>,
    pub order: Option<i32>,
    pub client: Option<String>,
    pub piece_type: Option<String>,
    pub duration: Option<String>,
    pub video_url: Option<String>,
    pub external_link: Option<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub published: bool,
}

/// One entry of a project's ordered image gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalleryItem {
    pub path: String,
    pub url: String,
    pub order: u32,
}

/// A project enriched with display URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectView {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub project: Project,
    pub excerpt: String,
    pub cover_url: Option<String>,
    pub cover_thumb_url: Option<String>,
    pub gallery: Vec<GalleryItem>,
    pub primary_video: Option<VideoRef>,
    /// Card image: cover, then video thumbnail, then first gallery image.
    pub poster_url: Option<String>,
}

impl ProjectView {
    pub fn slug(&self) -> &str {
        &self.project.slug
    }
}
