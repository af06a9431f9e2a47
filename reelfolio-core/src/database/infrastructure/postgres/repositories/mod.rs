pub mod contact;
pub mod galleries;
pub mod pages;
pub mod photos;
pub mod projects;
pub mod video_ids;

pub use contact::PostgresContactRepository;
pub use galleries::PostgresGalleriesRepository;
pub use pages::PostgresPagesRepository;
pub use photos::PostgresPhotosRepository;
pub use projects::PostgresProjectsRepository;
pub use video_ids::PostgresVideoIdsRepository;

use reelfolio_model::Locale;

/// Stored locales are always valid; anything else reads as the default.
pub(crate) fn parse_locale(raw: &str) -> Locale {
    raw.parse().unwrap_or_default()
}
