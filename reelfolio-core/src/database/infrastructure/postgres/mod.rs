pub mod repositories;

pub use repositories::{
    PostgresContactRepository, PostgresGalleriesRepository,
    PostgresPagesRepository, PostgresPhotosRepository,
    PostgresProjectsRepository, PostgresVideoIdsRepository,
};
