//! Conversions from external infrastructure errors into domain errors.

use rusqlite::Error as SqlError;
use slotbook_domain::SlotbookError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SlotbookError);

impl From<InfraError> for SlotbookError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SlotbookError> for InfraError {
    fn from(value: SlotbookError) -> Self {
        Self(value)
    }
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → SlotbookError */
/* -------------------------------------------------------------------------- */

impl From<SqlError> for InfraError {
    fn from(err: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        let domain = match err {
            RE::SqliteFailure(inner, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (inner.code, inner.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        SlotbookError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        SlotbookError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        SlotbookError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        SlotbookError::Database("foreign key constraint violation".into())
                    }
                    _ => SlotbookError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        inner.code, inner.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => SlotbookError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                SlotbookError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                SlotbookError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => SlotbookError::Database("invalid UTF-8 returned from sqlite".into()),
            other => SlotbookError::Database(other.to_string()),
        };

        Self(domain)
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → SlotbookError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        Self(SlotbookError::Database(format!("connection pool error: {err}")))
    }
}
