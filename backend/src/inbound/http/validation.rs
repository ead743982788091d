//! Translation of domain validation failures into API errors.
//!
//! Each mapping produces an `invalid_request` error whose `details` carry a
//! machine-readable `field` and `code` alongside the human-readable message,
//! so clients can highlight the offending input.

use serde_json::json;

use crate::domain::auth::{LoginValidationError, RegistrationValidationError};
use crate::domain::list::ListValidationError;
use crate::domain::user::UserValidationError;
use crate::domain::Error;

fn field_error(field: &str, code: &str, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Error for a request body missing a required field.
pub fn missing_field_error(field: &str) -> Error {
    field_error(field, "missing", format!("Missing required field: {field}"))
}

/// Map a registration validation failure onto the offending request field.
pub fn registration_error(err: RegistrationValidationError) -> Error {
    let message = err.to_string();
    match err {
        RegistrationValidationError::InvalidEmail => {
            field_error("email", "invalid_email", message)
        }
        RegistrationValidationError::Username(inner) => username_error(inner, message),
        RegistrationValidationError::PasswordTooShort => {
            field_error("password", "too_short", message)
        }
        RegistrationValidationError::PasswordMismatch => {
            field_error("confirmPassword", "mismatch", message)
        }
    }
}

fn username_error(err: UserValidationError, message: String) -> Error {
    match err {
        UserValidationError::InvalidEmail => field_error("email", "invalid_email", message),
        UserValidationError::UsernameInvalidCharacters => {
            field_error("username", "invalid_characters", message)
        }
        UserValidationError::UsernameLength { .. } => {
            field_error("username", "length", message)
        }
        UserValidationError::InvalidId => field_error("username", "invalid", message),
    }
}

/// Map a login validation failure onto the offending request field.
pub fn login_error(err: LoginValidationError) -> Error {
    let message = err.to_string();
    match err {
        LoginValidationError::InvalidEmail => field_error("email", "invalid_email", message),
        LoginValidationError::EmptyPassword => field_error("password", "missing", message),
    }
}

/// Map a bucket-list name validation failure onto the `name` field.
pub fn list_error(err: ListValidationError) -> Error {
    let message = err.to_string();
    let code = match err {
        ListValidationError::MissingName => "missing",
        ListValidationError::NameInvalidCharacters => "invalid_characters",
        ListValidationError::NameTooLong { .. } => "too_long",
        ListValidationError::InvalidId => "invalid",
    };
    field_error("name", code, message)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(RegistrationValidationError::InvalidEmail, "email", "invalid_email")]
    #[case(RegistrationValidationError::PasswordTooShort, "password", "too_short")]
    #[case(RegistrationValidationError::PasswordMismatch, "confirmPassword", "mismatch")]
    #[case(
        RegistrationValidationError::Username(UserValidationError::UsernameInvalidCharacters),
        "username",
        "invalid_characters"
    )]
    fn registration_errors_name_the_field(
        #[case] err: RegistrationValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = registration_error(err);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], code);
    }

    #[rstest]
    fn missing_field_names_the_field() {
        let error = missing_field_error("email");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Missing required field: email");
        let details = error.details().expect("details");
        assert_eq!(details["field"], "email");
        assert_eq!(details["code"], "missing");
    }

    #[rstest]
    #[case(ListValidationError::MissingName, "missing")]
    #[case(ListValidationError::NameTooLong { max: 255 }, "too_long")]
    fn list_errors_target_the_name_field(#[case] err: ListValidationError, #[case] code: &str) {
        let error = list_error(err);
        let details = error.details().expect("details");
        assert_eq!(details["field"], "name");
        assert_eq!(details["code"], code);
    }
}
