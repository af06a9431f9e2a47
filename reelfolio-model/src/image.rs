use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Renditions stored next to an original image, each in its own directory
/// segment (`gallery/slug/thumb/photo.jpg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ImageVariant {
    /// Grid-sized rendition.
    Thumb,
    /// Lightbox-sized rendition.
    Large,
    /// Older project galleries keep their grid renditions under `thumbs/`.
    Thumbs,
}

impl ImageVariant {
    pub const ALL: [ImageVariant; 3] =
        [ImageVariant::Thumb, ImageVariant::Large, ImageVariant::Thumbs];

    /// Directory segment used for this variant.
    pub const fn segment(&self) -> &'static str {
        match self {
            ImageVariant::Thumb => "thumb",
            ImageVariant::Large => "large",
            ImageVariant::Thumbs => "thumbs",
        }
    }

    pub fn from_segment(segment: &str) -> Option<ImageVariant> {
        Self::ALL.into_iter().find(|v| v.segment() == segment)
    }
}

impl Display for ImageVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for ImageVariant {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_segment(s.trim())
            .ok_or_else(|| ModelError::InvalidVariant(s.to_string()))
    }
}

/// Sizes served through the storage image-transformation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RenderSize {
    /// Grid / listing: width 600, quality 60.
    Thumb,
    /// Lightbox / full view: width 1600, quality 70.
    Large,
}

impl RenderSize {
    pub const fn width(&self) -> u32 {
        match self {
            RenderSize::Thumb => 600,
            RenderSize::Large => 1600,
        }
    }

    pub const fn quality(&self) -> u8 {
        match self {
            RenderSize::Thumb => 60,
            RenderSize::Large => 70,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            RenderSize::Thumb => "thumb",
            RenderSize::Large => "large",
        }
    }
}

impl Display for RenderSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_round_trip() {
        for variant in ImageVariant::ALL {
            assert_eq!(
                ImageVariant::from_segment(variant.segment()),
                Some(variant)
            );
        }
        assert_eq!(ImageVariant::from_segment("backstage"), None);
    }
}
