//! Shared Diesel error mapping for the student and address repositories.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Partial unique index over active students' documents.
pub(super) const STUDENT_DOCUMENT_INDEX: &str = "students_document_identification_active_key";
/// Partial unique index over active students' e-mail addresses.
pub(super) const STUDENT_EMAIL_INDEX: &str = "students_email_address_active_key";
/// Partial unique index allowing one active address per student.
pub(super) const ADDRESS_OWNER_INDEX: &str = "addresses_student_id_active_key";

/// Extract a readable message from a pool error.
pub(super) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Name the unique index a violation tripped over, if `error` is one.
///
/// PostgreSQL reports the index name as the constraint; older drivers only
/// mention it in the message, so both are checked.
pub(super) fn violated_unique_index(error: &DieselError) -> Option<&'static str> {
    let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = error else {
        return None;
    };
    [STUDENT_DOCUMENT_INDEX, STUDENT_EMAIL_INDEX, ADDRESS_OWNER_INDEX]
        .into_iter()
        .find(|index| mentions(info.as_ref(), index))
}

fn mentions(info: &(dyn DatabaseErrorInformation + Send + Sync), index: &str) -> bool {
    info.constraint_name() == Some(index) || info.message().contains(index)
}

/// Map common Diesel error variants into query/connection constructors.
pub(super) fn map_basic_diesel_error<E, Q, C>(
    error: DieselError,
    query: Q,
    connection: C,
) -> E
where
    Q: Fn(String) -> E,
    C: Fn(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => query("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        other => query(other.to_string()),
    }
}
