use scoring::ScoringError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    /// A stored row could not be turned into a scoring value.
    #[error("Invalid stored value: {0}")]
    Scoring(#[from] ScoringError),
}

pub type Result<T> = std::result::Result<T, StorageError>;
