//! User entity and its validated value types.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised by the user value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifier was empty or not a UUID.
    InvalidId,
    /// Email did not match the accepted `local@domain` shape.
    InvalidEmail,
    /// Username contained characters outside letters, digits, spaces, and
    /// underscores.
    UsernameInvalidCharacters,
    /// Username length fell outside the accepted bounds.
    UsernameLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::InvalidEmail => write!(f, "The email provided is not valid."),
            Self::UsernameInvalidCharacters => write!(
                f,
                "The username cannot contain special characters. Only underscores"
            ),
            Self::UsernameLength { min, max } => {
                write!(f, "Username should be between {min} and {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() || raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
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

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Minimum accepted username length.
pub const USERNAME_MIN: usize = 3;
/// Maximum accepted username length.
pub const USERNAME_MAX: usize = 50;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this constrains the character set.
        Regex::new("^[A-Za-z0-9 _]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Account username: 3-50 characters of letters, digits, spaces, and
/// underscores, unique across the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// Checks run in a fixed order: character set first, then length, so a
    /// short name with bad characters reports the character-set failure.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if !username_regex().is_match(&username) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        let length = username.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
            return Err(UserValidationError::UsernameLength {
                min: USERNAME_MIN,
                max: USERNAME_MAX,
            });
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[_a-z0-9-]+(\.[_a-z0-9-]+)*@[a-z0-9-]+(\.[a-z0-9-]+)*(\.[a-z]{2,4})$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Registered email address, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// Input is trimmed and lowercased before matching, so `User@Test.com`
    /// and `user@test.com` are the same address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque salted password hash in PHC string format.
///
/// The domain never inspects the contents; only the hasher port can produce
/// and verify these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-computed hash string.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Borrow the PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Application user.
///
/// ## Invariants
/// - `slug` is derived from `username` via [`crate::domain::slug::slugify`]
///   at creation; callers that rename a user recompute it.
/// - `modified_at >= created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
    admin: bool,
    slug: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from validated components.
    #[expect(clippy::too_many_arguments, reason = "plain record constructor")]
    pub fn new(
        id: UserId,
        username: Username,
        email: EmailAddress,
        password_hash: PasswordHash,
        admin: bool,
        slug: String,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            admin,
            slug,
            created_at,
            modified_at: modified_at.max(created_at),
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique account username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Unique registered email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Salted password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Whether the account has administrative rights.
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// URL-safe identifier derived from the username.
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice", true)]
    #[case("alice smith_2", true)]
    #[case("ab", false)]
    #[case("a!", false)]
    #[case("name-with-dash", false)]
    #[case("", false)]
    fn username_rules(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(Username::new(input).is_ok(), ok, "input: {input:?}");
    }

    #[rstest]
    fn username_longer_than_fifty_chars_is_rejected() {
        let long = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(long),
            Err(UserValidationError::UsernameLength {
                min: USERNAME_MIN,
                max: USERNAME_MAX
            })
        );
    }

    #[rstest]
    fn charset_failure_wins_over_length() {
        // One character AND an illegal character: the charset message applies.
        assert_eq!(
            Username::new("!"),
            Err(UserValidationError::UsernameInvalidCharacters)
        );
    }

    #[rstest]
    #[case("user@test.com", true)]
    #[case("first.last@sub.domain.org", true)]
    #[case("USER@TEST.COM", true)]
    #[case("not-an-email", false)]
    #[case("missing@tld", false)]
    #[case("@test.com", false)]
    #[case("", false)]
    fn email_rules(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(EmailAddress::new(input).is_ok(), ok, "input: {input:?}");
    }

    #[rstest]
    fn emails_are_normalised_to_lowercase() {
        let email = EmailAddress::new("  User@Test.Com ").expect("valid email");
        assert_eq!(email.as_ref(), "user@test.com");
    }

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case("not-a-uuid", false)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", false)]
    #[case("", false)]
    fn user_id_rules(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(UserId::new(input).is_ok(), ok, "input: {input:?}");
    }

    #[rstest]
    fn modified_never_precedes_created() {
        let created = Utc::now();
        let earlier = created - chrono::Duration::seconds(30);
        let user = User::new(
            UserId::random(),
            Username::new("alice").expect("valid username"),
            EmailAddress::new("alice@test.com").expect("valid email"),
            PasswordHash::new("$argon2id$stub"),
            false,
            "alice".to_owned(),
            created,
            earlier,
        );
        assert_eq!(user.modified_at(), created);
    }
}
