//! Outbound adapters implementing the domain ports.

pub mod persistence;
pub mod security;

pub use security::Argon2Hasher;
