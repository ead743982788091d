//! Row types bridging Diesel and the domain entities.
//!
//! Rows re-validate on the way out of the store: a row that no longer
//! satisfies the domain invariants (for example after a manual edit) maps to
//! a [`PersistenceError::Query`] instead of leaking an invalid entity.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bucket_lists, users};
use crate::domain::ports::PersistenceError;
use crate::domain::{
    BucketList, EmailAddress, ListId, ListName, PasswordHash, User, UserId, Username,
};

/// A row of `users`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub admin: bool,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            username: user.username().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            password_hash: user.password_hash().as_str().to_owned(),
            admin: user.is_admin(),
            slug: user.slug().to_owned(),
            created_at: user.created_at(),
            modified_at: user.modified_at(),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username)
            .map_err(|err| PersistenceError::query(format!("users.username: {err}")))?;
        let email = EmailAddress::new(&row.email)
            .map_err(|err| PersistenceError::query(format!("users.email: {err}")))?;
        Ok(User::new(
            UserId::from(row.id),
            username,
            email,
            PasswordHash::new(row.password_hash),
            row.admin,
            row.slug,
            row.created_at,
            row.modified_at,
        ))
    }
}

/// A row of `bucket_lists`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = bucket_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&BucketList> for ListRow {
    fn from(list: &BucketList) -> Self {
        Self {
            id: *list.id().as_uuid(),
            user_id: *list.owner_id().as_uuid(),
            name: list.name().as_ref().to_owned(),
            description: list.description().to_owned(),
            slug: list.slug().to_owned(),
            created_at: list.created_at(),
            modified_at: list.modified_at(),
        }
    }
}

impl TryFrom<ListRow> for BucketList {
    type Error = PersistenceError;

    fn try_from(row: ListRow) -> Result<Self, Self::Error> {
        let name = ListName::new(row.name)
            .map_err(|err| PersistenceError::query(format!("bucket_lists.name: {err}")))?;
        Ok(BucketList::new(
            ListId::from(row.id),
            UserId::from(row.user_id),
            name,
            row.description,
            row.slug,
            row.created_at,
            row.modified_at,
        ))
    }
}

/// Changeset applied when a list is edited.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = bucket_lists)]
pub struct ListChanges {
    pub name: String,
    pub description: String,
    pub slug: String,
    pub modified_at: DateTime<Utc>,
}

impl From<&BucketList> for ListChanges {
    fn from(list: &BucketList) -> Self {
        Self {
            name: list.name().as_ref().to_owned(),
            description: list.description().to_owned(),
            slug: list.slug().to_owned(),
            modified_at: list.modified_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn user_row() -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            username: "new user".into(),
            email: "user@test.com".into(),
            password_hash: "$argon2id$stub".into(),
            admin: false,
            slug: "new-user".into(),
            created_at: now,
            modified_at: now,
        }
    }

    #[rstest]
    fn valid_user_row_converts() {
        let row = user_row();
        let user = User::try_from(row.clone()).expect("row satisfies invariants");
        assert_eq!(user.id().as_uuid(), &row.id);
        assert_eq!(user.username().as_ref(), "new user");
        assert_eq!(user.email().as_ref(), "user@test.com");
    }

    #[rstest]
    fn corrupt_username_is_a_query_error() {
        let mut row = user_row();
        row.username = "bad!name".into();
        let err = User::try_from(row).expect_err("invalid row rejected");
        assert!(matches!(err, PersistenceError::Query { .. }));
    }

    #[rstest]
    fn list_row_round_trips_through_domain() {
        let now = Utc::now();
        let row = ListRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Go to Borabora for vacay".into(),
            description: "".into(),
            slug: "go-to-borabora-for-vacay".into(),
            created_at: now,
            modified_at: now,
        };
        let list = BucketList::try_from(row.clone()).expect("row satisfies invariants");
        let back = ListRow::from(&list);
        assert_eq!(back.id, row.id);
        assert_eq!(back.name, row.name);
        assert_eq!(back.slug, row.slug);
    }
}
