//! Bucket-list service: the per-operation state machines behind the
//! `/bucket-lists` endpoints.
//!
//! Every operation takes the authenticated owner as an explicit parameter;
//! nothing here reads identity from ambient state. Missing records and
//! records owned by someone else are indistinguishable to callers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use super::error::Error;
use super::list::{BucketList, ListId, ListName};
use super::ports::ListRepository;
use super::slug::slugify;
use super::user::UserId;

/// Maximum number of entries in the recent view.
pub const RECENT_LIMIT: u32 = 6;
/// Name truncation limit in the recent view.
pub const RECENT_NAME_LIMIT: usize = 25;
/// Description truncation limit in the recent view.
pub const RECENT_DESCRIPTION_LIMIT: usize = 90;

const NOT_FOUND_MESSAGE: &str = "That bucket list does not exist";
const DUPLICATE_MESSAGE: &str = "That bucket list already exists";

/// A recently modified list with display fields truncated for summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentEntry {
    /// List identifier.
    pub id: ListId,
    /// Name, truncated to [`RECENT_NAME_LIMIT`] characters.
    pub name: String,
    /// Description, truncated to [`RECENT_DESCRIPTION_LIMIT`] characters.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub modified_at: DateTime<Utc>,
}

impl From<BucketList> for RecentEntry {
    fn from(list: BucketList) -> Self {
        Self {
            id: *list.id(),
            name: truncate_with_ellipsis(list.name().as_ref(), RECENT_NAME_LIMIT),
            description: truncate_with_ellipsis(list.description(), RECENT_DESCRIPTION_LIMIT),
            created_at: list.created_at(),
            modified_at: list.modified_at(),
        }
    }
}

/// Keep the first `limit` characters, appending `...` when anything was cut.
fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str("...");
    truncated
}

/// Service behind the bucket-list CRUD endpoints.
#[derive(Clone)]
pub struct ListService {
    lists: Arc<dyn ListRepository>,
}

impl ListService {
    /// Create a service backed by the given store.
    pub fn new(lists: Arc<dyn ListRepository>) -> Self {
        Self { lists }
    }

    /// Create a list for `owner`.
    ///
    /// The name must be unique among the owner's lists case-insensitively;
    /// the slug is derived from the name here, explicitly.
    pub async fn create(
        &self,
        owner: &UserId,
        name: ListName,
        description: String,
    ) -> Result<BucketList, Error> {
        if self
            .lists
            .find_by_owner_and_name_ci(owner, name.as_ref())
            .await?
            .is_some()
        {
            return Err(Error::conflict(DUPLICATE_MESSAGE));
        }

        let now = Utc::now();
        let slug = slugify(name.as_ref());
        let list = BucketList::new(ListId::random(), *owner, name, description, slug, now, now);
        self.lists.create(&list).await?;
        tracing::info!(owner = %owner, list = %list.id(), "created bucket list");
        Ok(list)
    }

    /// One page of `owner`'s lists, ordered by name ascending.
    ///
    /// Pages beyond the end of the collection are empty, not an error.
    pub async fn browse(
        &self,
        owner: &UserId,
        request: PageRequest,
    ) -> Result<Page<BucketList>, Error> {
        Ok(self.lists.page_by_owner(owner, request).await?)
    }

    /// `owner`'s most recently modified lists, truncated for display.
    pub async fn recent(&self, owner: &UserId) -> Result<Vec<RecentEntry>, Error> {
        let lists = self.lists.recent_by_owner(owner, RECENT_LIMIT).await?;
        Ok(lists.into_iter().map(RecentEntry::from).collect())
    }

    /// Fetch one of `owner`'s lists by slug.
    pub async fn fetch(&self, owner: &UserId, slug: &str) -> Result<BucketList, Error> {
        self.lists
            .find_by_owner_and_slug(owner, slug)
            .await?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }

    /// Update one of `owner`'s lists.
    ///
    /// Omitted fields fall back to their stored values. Renaming to a name
    /// already used by another of the owner's lists conflicts; renaming to
    /// the list's own current name is a no-op success. The slug is
    /// recomputed only when the name actually changes.
    pub async fn update(
        &self,
        owner: &UserId,
        slug: &str,
        new_name: Option<ListName>,
        new_description: Option<String>,
    ) -> Result<BucketList, Error> {
        let current = self.fetch(owner, slug).await?;

        let name = new_name.unwrap_or_else(|| current.name().clone());
        let renamed = name.as_ref() != current.name().as_ref();
        if renamed && !current.name().matches_ignore_case(name.as_ref()) {
            // A different name: make sure it does not belong to a sibling.
            if self
                .lists
                .find_by_owner_and_name_ci(owner, name.as_ref())
                .await?
                .is_some()
            {
                return Err(Error::conflict(DUPLICATE_MESSAGE));
            }
        }

        let description =
            new_description.unwrap_or_else(|| current.description().to_owned());
        let next_slug = if renamed {
            slugify(name.as_ref())
        } else {
            current.slug().to_owned()
        };
        let updated = current.with_changes(name, description, next_slug, Utc::now());

        if !self.lists.update(&updated).await? {
            // The row vanished between fetch and write.
            return Err(Error::not_found(NOT_FOUND_MESSAGE));
        }
        Ok(updated)
    }

    /// Delete one of `owner`'s lists by slug.
    pub async fn delete(&self, owner: &UserId, slug: &str) -> Result<(), Error> {
        let current = self.fetch(owner, slug).await?;
        if !self.lists.delete(owner, current.id()).await? {
            return Err(Error::not_found(NOT_FOUND_MESSAGE));
        }
        tracing::info!(owner = %owner, list = %current.id(), "deleted bucket list");
        Ok(())
    }
}
