//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the store, the password hasher). Each trait exposes strongly typed
//! errors so adapters map their failures into predictable variants instead
//! of stringly typed results.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use thiserror::Error;

use super::error::Error;
use super::list::{BucketList, ListId};
use super::user::{EmailAddress, PasswordHash, User, UserId, Username};

/// Errors surfaced by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Store connectivity or pool failures.
    #[error("store connection failed: {message}")]
    Connection {
        /// Adapter-level description, logged but never shown to clients.
        message: String,
    },
    /// A query failed or returned a row the domain cannot accept.
    #[error("store query failed: {message}")]
    Query {
        /// Adapter-level description, logged but never shown to clients.
        message: String,
    },
    /// A unique constraint rejected the write.
    #[error("duplicate {entity}")]
    Duplicate {
        /// What collided, e.g. `user email` or `bucket list name`.
        entity: String,
    },
}

impl PersistenceError {
    /// Helper for connection-level adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-constraint violations.
    pub fn duplicate(entity: impl Into<String>) -> Self {
        Self::Duplicate {
            entity: entity.into(),
        }
    }
}

impl From<PersistenceError> for Error {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Connection { message } => {
                tracing::error!(error = %message, "store connection failure");
                Self::service_unavailable("The service is temporarily unavailable.")
            }
            PersistenceError::Query { message } => {
                tracing::error!(error = %message, "store query failure");
                Self::internal("Internal server error")
            }
            PersistenceError::Duplicate { entity } => {
                Self::conflict(format!("A {entity} with that value already exists."))
            }
        }
    }
}

/// Errors surfaced by the password-hashing adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashingError {
    /// The hashing backend rejected the operation.
    #[error("password hashing failed: {message}")]
    Backend {
        /// Adapter-level description, logged but never shown to clients.
        message: String,
    },
}

impl HashingError {
    /// Helper for backend-level failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

impl From<HashingError> for Error {
    fn from(err: HashingError) -> Self {
        tracing::error!(error = %err, "password hasher failure");
        Self::internal("Internal server error")
    }
}

/// Store of registered users.
///
/// Deleting a user cascades to their bucket lists; adapters enforce this
/// with a foreign key or equivalent bookkeeping.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with [`PersistenceError::Duplicate`] when
    /// the email or username is already taken.
    async fn create(&self, user: &User) -> Result<(), PersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PersistenceError>;

    /// Fetch a user by normalised email address.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, PersistenceError>;

    /// Fetch a user by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, PersistenceError>;

    /// Delete a user and, transitively, their lists. Returns `false` when no
    /// such user existed.
    async fn delete(&self, id: &UserId) -> Result<bool, PersistenceError>;
}

/// Store of bucket lists, always addressed through their owner.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Persist a new list. Fails with [`PersistenceError::Duplicate`] when
    /// the owner already has a list with that name (case-insensitively);
    /// this backstops the service-level pre-check under concurrent creates.
    async fn create(&self, list: &BucketList) -> Result<(), PersistenceError>;

    /// Fetch one of `owner`'s lists by slug.
    async fn find_by_owner_and_slug(
        &self,
        owner: &UserId,
        slug: &str,
    ) -> Result<Option<BucketList>, PersistenceError>;

    /// Fetch one of `owner`'s lists whose name matches case-insensitively.
    async fn find_by_owner_and_name_ci(
        &self,
        owner: &UserId,
        name: &str,
    ) -> Result<Option<BucketList>, PersistenceError>;

    /// One page of `owner`'s lists ordered by name ascending.
    async fn page_by_owner(
        &self,
        owner: &UserId,
        request: PageRequest,
    ) -> Result<Page<BucketList>, PersistenceError>;

    /// Up to `limit` of `owner`'s lists ordered by modification time,
    /// newest first.
    async fn recent_by_owner(
        &self,
        owner: &UserId,
        limit: u32,
    ) -> Result<Vec<BucketList>, PersistenceError>;

    /// Replace a stored list with `list`, matched by id and owner. Returns
    /// `false` when the row no longer exists.
    async fn update(&self, list: &BucketList) -> Result<bool, PersistenceError>;

    /// Delete one of `owner`'s lists by id. Returns `false` when the row no
    /// longer exists or belongs to someone else.
    async fn delete(&self, owner: &UserId, id: &ListId) -> Result<bool, PersistenceError>;
}

/// One-way salted password hashing with constant-time verification.
pub trait PasswordHasherPort: Send + Sync {
    /// Hash a plaintext password into an opaque PHC string.
    fn hash(&self, password: &str) -> Result<PasswordHash, HashingError>;

    /// Verify a plaintext password against a stored hash. A mismatch is
    /// `Ok(false)`, not an error.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, HashingError>;
}
