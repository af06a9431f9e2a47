use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

pub const IMAGE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "webp", "avif"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi", "mkv"];

static SLUG_INVALID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("slug pattern should compile"));

static NAME_INVALID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zA-Z0-9.-]").expect("file name pattern should compile")
});

/// Lower-case and replace everything outside `[a-z0-9-]` with `-`.
pub fn slugify(raw: &str) -> String {
    SLUG_INVALID
        .replace_all(&raw.trim().to_lowercase(), "-")
        .into_owned()
}

/// Comma-separated tag field into trimmed, non-empty tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// `{sanitized stem}-{8 hex}.{ext}` so repeated uploads never collide.
pub fn unique_storage_name(file_name: &str, ext: &str) -> String {
    let stem = file_name
        .rfind('.')
        .map_or(file_name, |dot| &file_name[..dot]);
    let stem = NAME_INVALID.replace_all(stem, "_");
    let stem = if stem.is_empty() { "file".into() } else { stem };
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{stem}-{}.{ext}", &suffix[..8])
}

pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

pub fn is_video_extension(ext: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&ext)
}

/// Fallback when the upload carries no content type.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        _ => "application/octet-stream",
    }
}
