//! Helpers for exercising the HTTP surface against the in-memory store.
//!
//! Available to integration tests through the `test-support` feature.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;

use crate::inbound::http::{HttpState, HttpStatePorts, session_middleware};
use crate::outbound::Argon2Hasher;
use crate::outbound::persistence::MemoryStore;

/// HTTP state wired onto a fresh in-memory store.
pub fn memory_state() -> HttpState {
    let store = MemoryStore::new();
    HttpState::new(HttpStatePorts {
        users: Arc::new(store.clone()),
        lists: Arc::new(store),
        hasher: Arc::new(Argon2Hasher::new()),
    })
}

/// Session middleware with a generated key and insecure cookies, for use
/// with `actix_web::test` services.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware(Key::generate(), false)
}
