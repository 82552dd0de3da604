use thiserror::Error;

/// Errors raised by an [`crate::store::AdvocateStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// No persistent store is configured.
    #[error("Database not connected. Set DATABASE_URL environment variable.")]
    Unavailable,

    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A record could not be converted to or from its stored form.
    #[error("Invalid record: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
