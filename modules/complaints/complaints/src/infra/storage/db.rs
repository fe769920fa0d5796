use sea_orm::sqlx::error::ErrorKind;
use sea_orm::{DbErr, RuntimeErr, SqlErr};

use crate::domain::error::DomainError;

/// Map a datastore error onto the domain taxonomy.
///
/// Connection, pool and lock failures are reported as `StoreUnavailable`.
/// Constraint violations, decode failures and unexpected shapes are
/// `Internal`: retrying the same statement cannot succeed. The raw message is
/// logged here and kept inside the domain error only.
#[must_use]
pub fn db_err(e: DbErr) -> DomainError {
    if is_constraint_violation(&e) {
        tracing::error!(error = %e, "datastore constraint violated");
        return DomainError::internal(e.to_string());
    }
    match e {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) | DbErr::Exec(_) | DbErr::Query(_) => {
            tracing::error!(error = %e, "datastore request failed");
            DomainError::store_unavailable(e.to_string())
        }
        other => {
            tracing::error!(error = %other, "unexpected datastore error");
            DomainError::internal(other.to_string())
        }
    }
}

fn is_constraint_violation(e: &DbErr) -> bool {
    if matches!(
        e.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_))
    ) {
        return true;
    }
    // NOT NULL and CHECK failures have no `SqlErr` variant.
    let (DbErr::Exec(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db)))
    | DbErr::Query(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db)))) = e
    else {
        return false;
    };
    matches!(
        db.kind(),
        ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation
    )
}
