//! Domain entities, value types, services, and ports.
//!
//! Purpose: keep every business rule of the bucket-list system here, away
//! from HTTP and storage concerns. Value types validate on construction, so
//! an instance existing means its invariants hold. Services orchestrate the
//! per-operation state machines over the ports in [`ports`].

pub mod accounts;
pub mod auth;
pub mod error;
pub mod list;
pub mod lists;
pub mod ports;
pub mod slug;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Registration,
    RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::list::{BucketList, ListId, ListName, ListValidationError};
pub use self::lists::{ListService, RecentEntry};
pub use self::user::{EmailAddress, PasswordHash, User, UserId, UserValidationError, Username};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
