//! Error type for transactional services in this crate.
//!
//! Plain repositories return `sqlx::Error` and leave classification to the
//! caller. The link lifecycle service and provisioning engine return
//! [`DbError`] instead, because they surface domain errors (validation,
//! conflict, not-found) of their own.

use grantflow_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Map a unique violation on the given constraint into a domain conflict.
///
/// Any other error passes through unchanged.
pub fn conflict_on_unique(err: sqlx::Error, constraint: &str, message: &str) -> DbError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(constraint)
        {
            return DbError::Core(CoreError::Conflict(message.to_string()));
        }
    }
    DbError::Sqlx(err)
}
