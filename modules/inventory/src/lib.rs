//! Article stock management: listing with availability filtering, bulk import
//! with per-item outcomes, and additive stock mutation.

pub mod api;
pub mod domain;
pub mod infra;
