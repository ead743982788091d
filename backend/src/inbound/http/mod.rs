//! HTTP adapter: handlers, session plumbing, and error mapping.

pub mod auth;
pub mod error;
pub mod health;
pub mod lists;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;

pub use self::error::ApiResult;
pub use self::health::HealthState;
pub use self::session::{SessionContext, session_middleware};
pub use self::state::{HttpState, HttpStatePorts};
