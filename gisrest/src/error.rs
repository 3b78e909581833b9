//! Error types for the gisrest library.

use thiserror::Error;

/// Errors that can occur when validating requests or talking to a user store.
#[derive(Error, Debug)]
pub enum GisError {
    /// The user id is missing or zero.
    #[error("Invalid user id")]
    InvalidUserId,

    /// An update carries neither a name nor a complete coordinate pair.
    #[error("Invalid update data")]
    InvalidUpdateData,

    /// A request body could not be decoded.
    #[error("Invalid form data: {0}")]
    InvalidForm(String),

    /// The store rejected a query.
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema bootstrap failed.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Error reported by the database driver.
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl GisError {
    /// Whether the error was caused by the caller's input rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GisError::InvalidUserId | GisError::InvalidUpdateData | GisError::InvalidForm(_)
        )
    }
}

/// Result type alias using [`GisError`].
pub type Result<T> = std::result::Result<T, GisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(GisError::InvalidUserId.to_string(), "Invalid user id");
        assert_eq!(GisError::InvalidUpdateData.to_string(), "Invalid update data");

        let err = GisError::Query("LIMIT must not be negative".to_string());
        assert!(err.to_string().contains("LIMIT"));
    }

    #[test]
    fn test_is_validation() {
        assert!(GisError::InvalidUserId.is_validation());
        assert!(GisError::InvalidUpdateData.is_validation());
        assert!(GisError::InvalidForm("lat".to_string()).is_validation());
        assert!(!GisError::Query("boom".to_string()).is_validation());
        assert!(!GisError::Config("boom".to_string()).is_validation());
    }
}
