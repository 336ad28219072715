//! Shared mapping from pool and Diesel failures to storage errors.

use tracing::debug;

use crate::domain::ports::StoreError;

use super::pool::PoolError;

/// Map pool errors to storage connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> StoreError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    StoreError::connection(message)
}

/// Map Diesel errors to storage errors.
///
/// Unique and foreign-key violations become [`StoreError::Conflict`] so the
/// services can distinguish constraint breaches from plain query failures.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> StoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

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
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
            info,
        ) => StoreError::conflict(info.message().to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            StoreError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => StoreError::query(info.message().to_owned()),
        DieselError::NotFound => StoreError::query("record not found"),
        other => StoreError::query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for driver error classification.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_owned()))
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(mapped, StoreError::Connection { .. }));
        assert!(mapped.to_string().contains("connection refused"));
    }

    #[rstest]
    #[case(DatabaseErrorKind::UniqueViolation, "duplicate key value")]
    #[case(DatabaseErrorKind::ForeignKeyViolation, "violates foreign key")]
    fn constraint_violations_map_to_conflicts(
        #[case] kind: DatabaseErrorKind,
        #[case] message: &str,
    ) {
        let mapped = map_diesel_error(database_error(kind, message));

        assert!(mapped.is_conflict());
        assert!(mapped.to_string().contains(message));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let mapped = map_diesel_error(database_error(
            DatabaseErrorKind::ClosedConnection,
            "server closed the connection",
        ));

        assert!(matches!(mapped, StoreError::Connection { .. }));
    }

    #[rstest]
    fn other_failures_map_to_query_errors() {
        let mapped = map_diesel_error(DieselError::NotFound);

        assert!(matches!(mapped, StoreError::Query { .. }));
        assert!(mapped.to_string().contains("record not found"));
    }
}
