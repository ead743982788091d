//! Shared Diesel error mapping for the repositories.

use tracing::debug;

use crate::domain::ports::PersistenceError;

/// Map a Diesel error into a [`PersistenceError`].
///
/// `duplicate_entity` names what a unique-constraint violation collided on,
/// e.g. `"bucket list name"`; the caller knows which write it attempted.
pub fn map_diesel_error(
    error: diesel::result::Error,
    duplicate_entity: &str,
) -> PersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(
            error_type = %std::any::type_name_of_val(other),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PersistenceError::duplicate(duplicate_entity)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection closed")
        }
        other => PersistenceError::query(other.to_string()),
    }
}
