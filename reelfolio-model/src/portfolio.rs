use chrono::{DateTime, Utc};

use crate::ids::{GalleryId, PhotoId};

/// Named, ordered photo collection. `slug` doubles as the storage prefix the
/// gallery's files live under.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioGallery {
    pub id: GalleryId,
    pub name: String,
    pub slug: String,
    pub order: i32,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields an admin supplies when creating or editing a gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GalleryDraft {
    pub name: String,
    pub slug: String,
    pub order: Option<i32>,
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioPhoto {
    pub id: PhotoId,
    pub storage_path: String,
    pub public_url: String,
    pub is_visible: bool,
    pub order: i32,
    pub gallery_id: Option<GalleryId>,
    pub created_at: DateTime<Utc>,
}

/// Row to insert for a file discovered in storage or freshly uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPortfolioPhoto {
    pub storage_path: String,
    pub public_url: String,
    pub is_visible: bool,
    pub order: i32,
    pub gallery_id: Option<GalleryId>,
}

impl NewPortfolioPhoto {
    pub fn visible(
        gallery_id: GalleryId,
        storage_path: impl Into<String>,
        public_url: impl Into<String>,
        order: i32,
    ) -> Self {
        Self {
            storage_path: storage_path.into(),
            public_url: public_url.into(),
            is_visible: true,
            order,
            gallery_id: Some(gallery_id),
        }
    }

    pub fn into_photo(self) -> PortfolioPhoto {
        PortfolioPhoto {
            id: PhotoId::new(),
            storage_path: self.storage_path,
            public_url: self.public_url,
            is_visible: self.is_visible,
            order: self.order,
            gallery_id: self.gallery_id,
            created_at: Utc::now(),
        }
    }
}
