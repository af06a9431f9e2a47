//! One-way reconciliation of storage listings into portfolio photo rows.

pub mod portfolio;

pub use portfolio::{
    DEFAULT_PORTFOLIO_PREFIX, PortfolioSync, SYNC_PAGE_SIZE, SyncReport,
    is_gallery_image, join_storage_path,
};
