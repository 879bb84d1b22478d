//! Shared mapping from pool and Diesel failures into port error variants.
//!
//! Every repository port in this crate has a `Connection` and a `Query`
//! variant; callers pass the matching constructors. Database messages are
//! logged at debug level and never copied into the port error, since port
//! errors can reach clients through the domain `Error`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through the port's connection constructor.
pub(super) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    debug!(error = %error, "database pool checkout failed");
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel failure through the port's query or connection constructor.
pub(super) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => connection("database connection error"),
        DieselError::NotFound => query("record not found"),
        DieselError::DeserializationError(_) => query("unexpected column data"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::AdmissionRepositoryError;
    use rstest::rstest;

    #[test]
    fn pool_failures_become_connection_errors() {
        let mapped = map_pool_error(
            PoolError::checkout("timed out"),
            AdmissionRepositoryError::connection,
        );
        assert_eq!(mapped, AdmissionRepositoryError::connection("timed out"));
    }

    #[rstest]
    #[case(DieselError::NotFound, AdmissionRepositoryError::query("record not found"))]
    #[case(
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, Box::new(String::from("gone"))),
        AdmissionRepositoryError::connection("database connection error")
    )]
    #[case(
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(String::from("dup"))),
        AdmissionRepositoryError::query("database error")
    )]
    fn diesel_failures_are_classified(
        #[case] error: DieselError,
        #[case] expected: AdmissionRepositoryError,
    ) {
        let mapped = map_diesel_error(
            error,
            AdmissionRepositoryError::query,
            AdmissionRepositoryError::connection,
        );
        assert_eq!(mapped, expected);
    }
}
