//! Authentication and registration input types.
//!
//! Raw request payloads are validated here, before any handler talks to a
//! port or service. Checks run in a fixed order and the first failure wins;
//! nothing is persisted unless every rule passes.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserValidationError, Username};

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email missing or malformed.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "The email provided is not valid."),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` passed [`EmailAddress`] validation (trimmed, lowercased).
/// - `password` is non-empty and keeps caller-provided whitespace to avoid
///   surprising credential comparisons. It is zeroised on drop.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password as provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Email missing or malformed.
    InvalidEmail,
    /// Username failed character-set or length rules.
    Username(UserValidationError),
    /// Password shorter than [`PASSWORD_MIN`].
    PasswordTooShort,
    /// Password and confirmation differ.
    PasswordMismatch,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "The email provided is not valid."),
            Self::Username(inner) => inner.fmt(f),
            Self::PasswordTooShort => write!(
                f,
                "The password should be at least {PASSWORD_MIN} characters long"
            ),
            Self::PasswordMismatch => write!(f, "The passwords do not match"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated registration input: username, email, and password, with the
/// confirmation already checked and discarded.
///
/// Field rules are applied in a fixed order, first failure wins: email
/// format, username character set, username length, password length,
/// password/confirmation equality.
#[derive(Debug, Clone)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration input.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let email =
            EmailAddress::new(email).map_err(|_| RegistrationValidationError::InvalidEmail)?;
        let username = Username::new(username).map_err(RegistrationValidationError::Username)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort);
        }
        if password != confirmation {
            return Err(RegistrationValidationError::PasswordMismatch);
        }
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password awaiting hashing; zeroised on drop.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bad-email", "secret1", LoginValidationError::InvalidEmail)]
    #[case("user@test.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_login_inputs(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err =
            LoginCredentials::try_from_parts(email, password).expect_err("inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn login_keeps_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("user@test.com", " padded ")
            .expect("valid credentials");
        assert_eq!(creds.password(), " padded ");
        assert_eq!(creds.email().as_ref(), "user@test.com");
    }

    #[rstest]
    #[case("alice", "bad", "test1234", "test1234", RegistrationValidationError::InvalidEmail)]
    #[case(
        "a!",
        "user@test.com",
        "test1234",
        "test1234",
        RegistrationValidationError::Username(UserValidationError::UsernameInvalidCharacters)
    )]
    #[case(
        "al",
        "user@test.com",
        "test1234",
        "test1234",
        RegistrationValidationError::Username(UserValidationError::UsernameLength { min: 3, max: 50 })
    )]
    #[case(
        "alice",
        "user@test.com",
        "tiny",
        "tiny",
        RegistrationValidationError::PasswordTooShort
    )]
    #[case(
        "alice",
        "user@test.com",
        "test1234",
        "test12345",
        RegistrationValidationError::PasswordMismatch
    )]
    fn registration_checks_in_fixed_order(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] expected: RegistrationValidationError,
    ) {
        let err = Registration::try_from_parts(username, email, password, confirmation)
            .expect_err("inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn email_failure_wins_over_username_failure() {
        // Both fields invalid: the email rule is evaluated first.
        let err = Registration::try_from_parts("a!", "nope", "test1234", "test1234")
            .expect_err("inputs must fail");
        assert_eq!(err, RegistrationValidationError::InvalidEmail);
    }

    #[rstest]
    fn valid_registration_passes() {
        let registration =
            Registration::try_from_parts("alice", "User@Test.com", "test1234", "test1234")
                .expect("valid registration");
        assert_eq!(registration.username().as_ref(), "alice");
        assert_eq!(registration.email().as_ref(), "user@test.com");
        assert_eq!(registration.password(), "test1234");
    }
}
