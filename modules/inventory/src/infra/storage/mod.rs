pub mod articles_sea_repo;
pub mod entity;
pub mod migrations;
