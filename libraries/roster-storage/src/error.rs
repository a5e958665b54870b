/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violated on the named column
    #[error("Duplicate {0}")]
    Duplicate(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                // SQLite reports "UNIQUE constraint failed: users.email"
                let column = db_err
                    .message()
                    .rsplit('.')
                    .next()
                    .unwrap_or("value")
                    .trim()
                    .to_string();
                return Self::Duplicate(column);
            }
        }
        Self::Database(err)
    }
}

impl From<StorageError> for roster_core::RosterError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::NotFound { entity, id },
            StorageError::Duplicate(field) => Self::Duplicate(field),
            other => Self::storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::RosterError;

    #[test]
    fn test_not_found_converts_to_core_error() {
        let err: RosterError = StorageError::not_found("User", "7").into();
        assert!(matches!(err, RosterError::NotFound { ref id, .. } if id == "7"));
    }

    #[test]
    fn test_duplicate_keeps_field_name() {
        let err: RosterError = StorageError::Duplicate("email".to_string()).into();
        assert!(matches!(err, RosterError::Duplicate(ref field) if field == "email"));
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StorageError::Database(_)));
    }
}
