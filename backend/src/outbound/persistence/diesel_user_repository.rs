//! PostgreSQL-backed [`UserRepository`] implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId, Username};

use super::error_mapping::map_diesel_error;
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_one<F>(&self, filter: F) -> Result<Option<User>, PersistenceError>
    where
        F: FnOnce(
            users::BoxedQuery<'static, diesel::pg::Pg>,
        ) -> users::BoxedQuery<'static, diesel::pg::Pg>,
    {
        let mut conn = self.pool.get().await?;
        let row: Option<UserRow> = filter(users::table.into_boxed())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "user"))?;
        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        diesel::insert_into(users::table)
            .values(UserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "user"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PersistenceError> {
        let id = *id.as_uuid();
        self.find_one(move |query| query.filter(users::id.eq(id)))
            .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, PersistenceError> {
        let email = email.as_ref().to_owned();
        self.find_one(move |query| query.filter(users::email.eq(email)))
            .await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, PersistenceError> {
        let username = username.as_ref().to_owned();
        self.find_one(move |query| query.filter(users::username.eq(username)))
            .await
    }

    async fn delete(&self, id: &UserId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await?;
        // Lists cascade via the foreign key.
        let deleted = diesel::delete(users::table.filter(users::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "user"))?;
        Ok(deleted > 0)
    }
}
