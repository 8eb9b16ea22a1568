pub mod access_token;
pub mod client;
pub mod role;
pub mod user;
