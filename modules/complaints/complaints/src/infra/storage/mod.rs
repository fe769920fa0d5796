pub mod complaints_sea_repo;
pub mod db;
pub mod directory_sea_repo;
pub mod entity;
pub mod mapper;
pub mod migrations;

pub use complaints_sea_repo::OrmComplaintsRepository;
pub use directory_sea_repo::OrmDirectoryRepository;
