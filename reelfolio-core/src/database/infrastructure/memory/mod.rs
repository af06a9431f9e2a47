//! Process-local adapters for every repository port. Used by tests and by
//! runs without a database.

pub mod contact;
pub mod galleries;
pub mod pages;
pub mod photos;
pub mod projects;
pub mod video_ids;

pub use contact::InMemoryContactRepository;
pub use galleries::InMemoryGalleriesRepository;
pub use pages::InMemoryPagesRepository;
pub use photos::InMemoryPhotosRepository;
pub use projects::InMemoryProjectsRepository;
pub use video_ids::InMemoryVideoIdsRepository;
