//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to create database directory: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DbError> for trainer_core::StoreError {
    fn from(err: DbError) -> Self {
        trainer_core::StoreError::backend(err)
    }
}
