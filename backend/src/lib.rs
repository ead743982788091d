//! Bucket-list backend library.
//!
//! Layout follows a hexagonal layering: pure business rules in [`domain`],
//! transport adapters in [`inbound`], and storage/crypto adapters in
//! [`outbound`].

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use doc::ApiDoc;
pub use middleware::RequestTrace;
