//! Account registration and authentication service.

use std::sync::Arc;

use chrono::Utc;

use super::auth::{LoginCredentials, Registration};
use super::error::Error;
use super::ports::{PasswordHasherPort, UserRepository};
use super::slug::slugify;
use super::user::{User, UserId};

/// Service behind `POST /auth/register` and `POST /auth/login`.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasherPort>,
}

impl AccountService {
    /// Create a service backed by the given store and hasher.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasherPort>) -> Self {
        Self { users, hasher }
    }

    /// Register a new account.
    ///
    /// Input is already validated ([`Registration`]); this checks
    /// uniqueness, hashes the password, and persists the user with a slug
    /// derived from the username.
    pub async fn register(&self, registration: Registration) -> Result<User, Error> {
        if self
            .users
            .find_by_email(registration.email())
            .await?
            .is_some()
        {
            return Err(Error::conflict("User already exists. Please login."));
        }
        if self
            .users
            .find_by_username(registration.username())
            .await?
            .is_some()
        {
            return Err(Error::conflict("That username is already taken."));
        }

        let password_hash = self.hasher.hash(registration.password())?;
        let now = Utc::now();
        let slug = slugify(registration.username().as_ref());
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
            password_hash,
            false,
            slug,
            now,
            now,
        );
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id(), "registered new account");
        Ok(user)
    }

    /// Authenticate login credentials, resolving to the stored user.
    ///
    /// Unknown email and wrong password both produce the same unauthorized
    /// error so callers cannot probe which accounts exist.
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self.users.find_by_email(credentials.email()).await?;
        match user {
            Some(user)
                if self
                    .hasher
                    .verify(credentials.password(), user.password_hash())? =>
            {
                Ok(user)
            }
            _ => Err(Error::unauthorized(
                "The user does not exist or the password is invalid. Please try again.",
            )),
        }
    }
}
