//! Storage path rewriting for image renditions.
//!
//! Renditions live in a directory segment next to the original:
//! `retratos/IMG_1.png` has its grid rendition at `retratos/thumb/IMG_1.jpg`.
//! Segment detection works on whole directory components, so a folder named
//! `thumbnails` or a file named `large.png` is never mistaken for a variant.

use reelfolio_model::ImageVariant;

const JPG_EXT: &str = "jpg";

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "avif"];

/// What happens to the final filename's extension when deriving a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// Renditions are always stored as `.jpg`, whatever the original was.
    ForceJpg,
    /// Keep the original extension.
    Preserve,
}

/// Derive the path of `variant` for a storage path.
///
/// Empty input yields an empty string. An existing target segment is kept, a
/// different variant segment is swapped for the target, otherwise the target
/// is inserted as the directory directly above the file.
pub fn variant_path(
    path: &str,
    variant: ImageVariant,
    policy: ExtensionPolicy,
) -> String {
    if path.is_empty() {
        return String::new();
    }

    let target = variant.segment();
    let (dir, file) = match path.rfind('/') {
        Some(idx) => (Some(&path[..idx]), &path[idx + 1..]),
        None => (None, path),
    };

    let mut components: Vec<&str> =
        dir.map(|d| d.split('/').collect()).unwrap_or_default();

    if !components.contains(&target) {
        let swap = components
            .iter()
            .rposition(|c| ImageVariant::from_segment(c).is_some());
        match swap {
            Some(idx) => components[idx] = target,
            None => components.push(target),
        }
    }

    let file = match policy {
        ExtensionPolicy::ForceJpg => force_extension(file, JPG_EXT),
        ExtensionPolicy::Preserve => file.to_string(),
    };

    let mut out = components.join("/");
    out.push('/');
    out.push_str(&file);
    out
}

fn force_extension(file: &str, ext: &str) -> String {
    let stem = file.rfind('.').map_or(file, |dot| &file[..dot]);
    format!("{stem}.{ext}")
}

/// Lower-cased extension of the final path component, if any.
pub fn extension(path: &str) -> Option<String> {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.rfind('.')
        .map(|dot| file[dot + 1..].to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

pub fn is_image_path(path: &str) -> bool {
    extension(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Grid rendition, stored as `.jpg`.
pub fn to_thumb_path(path: &str) -> String {
    variant_path(path, ImageVariant::Thumb, ExtensionPolicy::ForceJpg)
}

/// Lightbox rendition, stored as `.jpg`.
pub fn to_large_path(path: &str) -> String {
    variant_path(path, ImageVariant::Large, ExtensionPolicy::ForceJpg)
}

pub fn to_thumb_path_prefix(path: &str) -> String {
    variant_path(path, ImageVariant::Thumb, ExtensionPolicy::Preserve)
}

pub fn to_large_path_prefix(path: &str) -> String {
    variant_path(path, ImageVariant::Large, ExtensionPolicy::Preserve)
}

pub fn to_thumbs_path_prefix(path: &str) -> String {
    variant_path(path, ImageVariant::Thumbs, ExtensionPolicy::Preserve)
}

/// Thumb rendition for images; anything else (videos, documents) is
/// returned untouched since no rendition exists for it.
pub fn to_thumb_path_or_original(path: &str) -> String {
    if is_image_path(path) {
        to_thumb_path(path)
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "retratos/IMG_1.png",
        "IMG.png",
        "a/thumb/x.jpg",
        "a/large/x.webp",
        "a/thumbs/x.JPG",
        "/leading/slash.jpeg",
        "nested/deep/dir/photo",
        "thumbnails/large.png",
        "a/thumb/large/x.png",
        "file.tar.gz",
    ];

    #[test]
    fn inserts_segment_and_forces_jpg() {
        assert_eq!(to_thumb_path("retratos/IMG_1.png"), "retratos/thumb/IMG_1.jpg");
        assert_eq!(to_large_path("retratos/IMG_1.png"), "retratos/large/IMG_1.jpg");
    }

    #[test]
    fn bare_filename_gets_leading_segment() {
        assert_eq!(to_thumb_path("IMG.png"), "thumb/IMG.jpg");
        assert_eq!(to_thumbs_path_prefix("IMG.png"), "thumbs/IMG.png");
    }

    #[test]
    fn existing_segment_is_kept() {
        assert_eq!(to_thumb_path("a/thumb/x.png"), "a/thumb/x.jpg");
        assert_eq!(to_large_path_prefix("a/large/x.png"), "a/large/x.png");
    }

    #[test]
    fn other_variant_segment_is_replaced() {
        assert_eq!(to_thumb_path("a/large/x.png"), "a/thumb/x.jpg");
        assert_eq!(to_large_path("a/thumbs/x.png"), "a/large/x.jpg");
        assert_eq!(to_thumbs_path_prefix("a/thumb/x.png"), "a/thumbs/x.png");
    }

    #[test]
    fn only_whole_components_count_as_segments() {
        assert_eq!(
            to_thumb_path("thumbnails/large.png"),
            "thumbnails/thumb/large.jpg"
        );
        assert_eq!(
            to_large_path("my-thumb/pic.png"),
            "my-thumb/large/pic.jpg"
        );
    }

    #[test]
    fn empty_path_stays_empty() {
        assert_eq!(to_thumb_path(""), "");
        assert_eq!(to_large_path_prefix(""), "");
        assert_eq!(to_thumb_path_or_original(""), "");
    }

    #[test]
    fn missing_extension_is_added_when_forced() {
        assert_eq!(to_thumb_path("dir/photo"), "dir/thumb/photo.jpg");
        assert_eq!(to_thumb_path_prefix("dir/photo"), "dir/thumb/photo");
    }

    #[test]
    fn leading_slash_is_preserved() {
        assert_eq!(to_large_path("/a/b.png"), "/a/large/b.jpg");
        assert_eq!(to_large_path("/b.png"), "/large/b.jpg");
    }

    #[test]
    fn every_variant_is_idempotent() {
        for path in SAMPLES {
            for variant in ImageVariant::ALL {
                for policy in [ExtensionPolicy::ForceJpg, ExtensionPolicy::Preserve]
                {
                    let once = variant_path(path, variant, policy);
                    let twice = variant_path(&once, variant, policy);
                    assert_eq!(once, twice, "{path} / {variant} / {policy:?}");
                }
            }
        }
    }

    #[test]
    fn thumb_of_large_equals_thumb() {
        for path in SAMPLES {
            assert_eq!(
                to_thumb_path(&to_large_path(path)),
                to_thumb_path(path),
                "{path}"
            );
        }
    }

    #[test]
    fn non_images_keep_original_path() {
        assert_eq!(to_thumb_path_or_original("videos/a/clip.mp4"), "videos/a/clip.mp4");
        assert_eq!(to_thumb_path_or_original("covers/a/cover.PNG"), "covers/a/thumb/cover.jpg");
    }
}
