//! Typed storage failures.
//!
//! Repositories never hand raw driver errors to callers. Every `DbErr` is
//! classified here once, from the structured SQL error the driver reports,
//! so the API layer can branch on a kind instead of on message text.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure kinds surfaced by the repository layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// No row matched the lookup
    #[error("record not found")]
    NotFound,

    /// A unique constraint rejected the write
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint rejected the write or delete
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        if matches!(err, DbErr::RecordNotFound(_)) {
            return StorageError::NotFound;
        }

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StorageError::UniqueViolation(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                StorageError::ForeignKeyViolation(detail)
            }
            _ => StorageError::Database(err),
        }
    }
}

/// Result type for repository operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Extension trait turning an empty lookup into `StorageError::NotFound`
pub trait FoundExt<T> {
    fn or_not_found(self) -> StorageResult<T>;
}

impl<T> FoundExt<T> for Option<T> {
    fn or_not_found(self) -> StorageResult<T> {
        self.ok_or(StorageError::NotFound)
    }
}
