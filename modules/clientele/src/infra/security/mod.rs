pub mod argon_hasher;
pub mod loyalty;
