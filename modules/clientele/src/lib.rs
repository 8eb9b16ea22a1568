//! Clients, user accounts and authentication: atomic client/account linkage,
//! filtered listings and the opaque bearer-token gate.

pub mod api;
pub mod domain;
pub mod infra;
