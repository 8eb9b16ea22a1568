pub mod clients_sea_repo;
pub mod entity;
pub mod migrations;
pub mod tokens_sea_repo;
pub mod users_sea_repo;
