//! Storage adapters: Diesel/PostgreSQL repositories and the in-memory store.

pub mod diesel_list_repository;
pub mod diesel_user_repository;
pub mod error_mapping;
pub mod memory;
pub mod models;
pub mod pool;
pub mod schema;

pub use self::diesel_list_repository::DieselListRepository;
pub use self::diesel_user_repository::DieselUserRepository;
pub use self::memory::MemoryStore;
pub use self::pool::{DbPool, PoolConfig, PoolError, run_migrations};
