//! Read-side accessors behind the public API.

pub mod backstage;
pub mod legacy;
pub mod pages;
pub mod portfolio_gallery;
pub mod poster;
pub mod projects;
pub mod site;
pub mod video_url;

pub use backstage::{BackstageImage, BackstageLister, DEFAULT_BACKSTAGE_LIMIT};
pub use legacy::{LegacyProject, LegacyProjects};
pub use pages::PageCatalog;
pub use portfolio_gallery::{DEFAULT_PORTFOLIO_FOLDERS, PortfolioFolders};
pub use poster::PosterResolver;
pub use projects::{
    AdjacentProjects, DEFAULT_FEATURED_LIMIT, ProjectCatalog, ProjectSource,
    excerpt,
};
pub use site::{HreflangUrls, SiteUrls};
pub use video_url::{parse_video_url, youtube_thumbnail_url};
