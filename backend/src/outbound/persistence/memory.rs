//! In-memory store implementing both repository ports.
//!
//! Used for local development without PostgreSQL and by the HTTP integration
//! tests. It enforces the same uniqueness rules the SQL schema does, so
//! behaviour matches the Diesel adapters, including `Duplicate` failures.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{ListRepository, PersistenceError, UserRepository};
use crate::domain::{BucketList, EmailAddress, ListId, User, UserId, Username};

#[derive(Default)]
struct State {
    users: Vec<User>,
    lists: Vec<BucketList>,
}

/// Shared in-memory store. Cloning yields a handle onto the same state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> Result<T, PersistenceError> {
        let state = self
            .state
            .read()
            .map_err(|_| PersistenceError::connection("memory store lock poisoned"))?;
        Ok(f(&state))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut State) -> Result<T, PersistenceError>,
    ) -> Result<T, PersistenceError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| PersistenceError::connection("memory store lock poisoned"))?;
        f(&mut state)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<(), PersistenceError> {
        self.write(|state| {
            if state.users.iter().any(|u| u.email() == user.email()) {
                return Err(PersistenceError::duplicate("user email"));
            }
            if state.users.iter().any(|u| u.username() == user.username()) {
                return Err(PersistenceError::duplicate("username"));
            }
            state.users.push(user.clone());
            Ok(())
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PersistenceError> {
        self.read(|state| state.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, PersistenceError> {
        self.read(|state| state.users.iter().find(|u| u.email() == email).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, PersistenceError> {
        self.read(|state| {
            state
                .users
                .iter()
                .find(|u| u.username() == username)
                .cloned()
        })
    }

    async fn delete(&self, id: &UserId) -> Result<bool, PersistenceError> {
        self.write(|state| {
            let before = state.users.len();
            state.users.retain(|u| u.id() != id);
            let removed = state.users.len() < before;
            if removed {
                // Mirror the SQL cascade.
                state.lists.retain(|l| l.owner_id() != id);
            }
            Ok(removed)
        })
    }
}

#[async_trait]
impl ListRepository for MemoryStore {
    async fn create(&self, list: &BucketList) -> Result<(), PersistenceError> {
        self.write(|state| {
            let collides = state.lists.iter().any(|l| {
                l.owner_id() == list.owner_id()
                    && l.name().matches_ignore_case(list.name().as_ref())
            });
            if collides {
                return Err(PersistenceError::duplicate("bucket list name"));
            }
            state.lists.push(list.clone());
            Ok(())
        })
    }

    async fn find_by_owner_and_slug(
        &self,
        owner: &UserId,
        slug: &str,
    ) -> Result<Option<BucketList>, PersistenceError> {
        self.read(|state| {
            state
                .lists
                .iter()
                .find(|l| l.owner_id() == owner && l.slug() == slug)
                .cloned()
        })
    }

    async fn find_by_owner_and_name_ci(
        &self,
        owner: &UserId,
        name: &str,
    ) -> Result<Option<BucketList>, PersistenceError> {
        self.read(|state| {
            state
                .lists
                .iter()
                .find(|l| l.owner_id() == owner && l.name().matches_ignore_case(name))
                .cloned()
        })
    }

    async fn page_by_owner(
        &self,
        owner: &UserId,
        request: PageRequest,
    ) -> Result<Page<BucketList>, PersistenceError> {
        self.read(|state| {
            let mut owned: Vec<BucketList> = state
                .lists
                .iter()
                .filter(|l| l.owner_id() == owner)
                .cloned()
                .collect();
            owned.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
            let total = owned.len() as u64;
            let items: Vec<BucketList> = owned
                .into_iter()
                .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
                .take(usize::try_from(request.limit()).unwrap_or(usize::MAX))
                .collect();
            Page::new(items, request, total)
        })
    }

    async fn recent_by_owner(
        &self,
        owner: &UserId,
        limit: u32,
    ) -> Result<Vec<BucketList>, PersistenceError> {
        self.read(|state| {
            let mut owned: Vec<BucketList> = state
                .lists
                .iter()
                .filter(|l| l.owner_id() == owner)
                .cloned()
                .collect();
            owned.sort_by(|a, b| b.modified_at().cmp(&a.modified_at()));
            owned.truncate(limit as usize);
            owned
        })
    }

    async fn update(&self, list: &BucketList) -> Result<bool, PersistenceError> {
        self.write(|state| {
            match state
                .lists
                .iter_mut()
                .find(|l| l.id() == list.id() && l.owner_id() == list.owner_id())
            {
                Some(stored) => {
                    *stored = list.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    async fn delete(&self, owner: &UserId, id: &ListId) -> Result<bool, PersistenceError> {
        self.write(|state| {
            let before = state.lists.len();
            state
                .lists
                .retain(|l| !(l.id() == id && l.owner_id() == owner));
            Ok(state.lists.len() < before)
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::{ListName, PasswordHash};

    fn user(email: &str, username: &str) -> User {
        let now = Utc::now();
        User::new(
            UserId::random(),
            Username::new(username).expect("valid username"),
            EmailAddress::new(email).expect("valid email"),
            PasswordHash::new("$argon2id$stub"),
            false,
            crate::domain::slug::slugify(username),
            now,
            now,
        )
    }

    fn list(owner: &UserId, name: &str) -> BucketList {
        let now = Utc::now();
        let name = ListName::new(name).expect("valid name");
        let slug = crate::domain::slug::slugify(name.as_ref());
        BucketList::new(ListId::random(), *owner, name, String::new(), slug, now, now)
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_emails_are_rejected() {
        let store = MemoryStore::new();
        UserRepository::create(&store, &user("user@test.com", "first user"))
            .await
            .expect("first insert succeeds");
        let err = UserRepository::create(&store, &user("user@test.com", "second user"))
            .await
            .expect_err("duplicate email rejected");
        assert_eq!(err, PersistenceError::duplicate("user email"));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_user_removes_their_lists() {
        let store = MemoryStore::new();
        let owner = user("user@test.com", "new user");
        UserRepository::create(&store, &owner).await.expect("insert user");
        ListRepository::create(&store, &list(owner.id(), "Climb the Eiffel tower"))
            .await
            .expect("insert list");

        assert!(UserRepository::delete(&store, owner.id())
            .await
            .expect("delete user"));
        let remaining = store
            .recent_by_owner(owner.id(), 6)
            .await
            .expect("query lists");
        assert!(remaining.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn list_names_collide_ignoring_case() {
        let store = MemoryStore::new();
        let owner = UserId::random();
        ListRepository::create(&store, &list(&owner, "Travel bucket list"))
            .await
            .expect("first insert succeeds");
        let err = ListRepository::create(&store, &list(&owner, "TRAVEL BUCKET LIST"))
            .await
            .expect_err("case-insensitive duplicate rejected");
        assert_eq!(err, PersistenceError::duplicate("bucket list name"));
    }

    #[rstest]
    #[tokio::test]
    async fn same_name_under_other_owners_is_fine() {
        let store = MemoryStore::new();
        ListRepository::create(&store, &list(&UserId::random(), "Travel bucket list"))
            .await
            .expect("first owner");
        ListRepository::create(&store, &list(&UserId::random(), "Travel bucket list"))
            .await
            .expect("second owner");
    }

    #[rstest]
    #[tokio::test]
    async fn pages_are_ordered_by_name() {
        let store = MemoryStore::new();
        let owner = UserId::random();
        for name in ["charlie", "alpha", "bravo"] {
            ListRepository::create(&store, &list(&owner, name))
                .await
                .expect("insert");
        }
        let page = store
            .page_by_owner(&owner, PageRequest::first())
            .await
            .expect("page");
        let names: Vec<&str> = page.items().iter().map(|l| l.name().as_ref()).collect();
        assert_eq!(names, ["alpha", "bravo", "charlie"]);
        assert_eq!(page.total(), 3);
    }
}
