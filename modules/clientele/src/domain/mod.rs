pub mod error;
pub mod model;
pub mod ports;
pub mod repo;
pub mod service;
