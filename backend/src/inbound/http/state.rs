//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they depend
//! only on domain services and the ports behind them, and remain testable
//! without real I/O.

use std::sync::Arc;

use crate::domain::ports::{ListRepository, PasswordHasherPort, UserRepository};
use crate::domain::{AccountService, ListService};

/// Parameter object bundling the port implementations handlers need.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// User store.
    pub users: Arc<dyn UserRepository>,
    /// Bucket-list store.
    pub lists: Arc<dyn ListRepository>,
    /// Password hasher.
    pub hasher: Arc<dyn PasswordHasherPort>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login.
    pub accounts: AccountService,
    /// Bucket-list CRUD.
    pub lists: ListService,
}

impl HttpState {
    /// Wire domain services from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            lists,
            hasher,
        } = ports;
        Self {
            accounts: AccountService::new(users, hasher),
            lists: ListService::new(lists),
        }
    }
}
