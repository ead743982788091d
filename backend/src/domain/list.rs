//! Bucket-list entity and its validated name type.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Validation errors raised by the list value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListValidationError {
    /// Identifier was empty or not a UUID.
    InvalidId,
    /// No name was provided.
    MissingName,
    /// Name contained characters outside letters, digits, spaces, and
    /// underscores.
    NameInvalidCharacters,
    /// Name exceeded the storage limit.
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for ListValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "list id must be a valid UUID"),
            Self::MissingName => write!(f, "Bucket list name not provided"),
            Self::NameInvalidCharacters => write!(
                f,
                "The list name cannot contain special characters. Only underscores (_)"
            ),
            Self::NameTooLong { max } => {
                write!(f, "The list name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for ListValidationError {}

/// Stable bucket-list identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListId(Uuid);

impl ListId {
    /// Validate and construct a [`ListId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ListValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() || raw.trim() != raw {
            return Err(ListValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ListValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ListId> for String {
    fn from(value: ListId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ListId {
    type Error = ListValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Uuid> for ListId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Maximum accepted list-name length.
pub const LIST_NAME_MAX: usize = 255;

static LIST_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn list_name_regex() -> &'static Regex {
    LIST_NAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9 _]+$")
            .unwrap_or_else(|error| panic!("list name regex failed to compile: {error}"))
    })
}

/// Bucket-list name: letters, digits, spaces, and underscores, unique per
/// owner case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListName(String);

impl ListName {
    /// Validate and construct a [`ListName`].
    pub fn new(name: impl Into<String>) -> Result<Self, ListValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ListValidationError::MissingName);
        }
        if !list_name_regex().is_match(&name) {
            return Err(ListValidationError::NameInvalidCharacters);
        }
        if name.chars().count() > LIST_NAME_MAX {
            return Err(ListValidationError::NameTooLong { max: LIST_NAME_MAX });
        }
        Ok(Self(name))
    }

    /// Case-insensitive equality, matching the per-owner uniqueness rule.
    pub fn matches_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl AsRef<str> for ListName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ListName> for String {
    fn from(value: ListName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ListName {
    type Error = ListValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A named, owned bucket list.
///
/// ## Invariants
/// - Exactly one owner; every read and mutation is owner-scoped.
/// - `(lower(name), owner)` is unique, enforced by the stores.
/// - `slug` is recomputed via [`crate::domain::slug::slugify`] whenever the
///   name changes; `modified_at >= created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketList {
    id: ListId,
    owner_id: UserId,
    name: ListName,
    description: String,
    slug: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl BucketList {
    /// Assemble a bucket list from validated components.
    pub fn new(
        id: ListId,
        owner_id: UserId,
        name: ListName,
        description: String,
        slug: String,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            description,
            slug,
            created_at,
            modified_at: modified_at.max(created_at),
        }
    }

    /// Stable list identifier.
    pub fn id(&self) -> &ListId {
        &self.id
    }

    /// Identifier of the owning user.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// List name as entered by the owner.
    pub fn name(&self) -> &ListName {
        &self.name
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// URL-safe identifier derived from the name.
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp; never precedes `created_at`.
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Produce the updated record for a rename/edit, keeping identity and
    /// creation time.
    ///
    /// `slug` must already reflect `name`; the list service derives it with
    /// an explicit `slugify` call before invoking this.
    pub fn with_changes(
        &self,
        name: ListName,
        description: String,
        slug: String,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: self.id,
            owner_id: self.owner_id,
            name,
            description,
            slug,
            created_at: self.created_at,
            modified_at: modified_at.max(self.modified_at).max(self.created_at),
        }
    }
}
