use crate::locale::Locale;

/// Static page (about, contact copy). Keyed by `(slug, locale)`; `content`
/// is HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    pub slug: String,
    pub locale: Locale,
    pub title: String,
    pub content: String,
}
