use medward_core::CoreError;
use thiserror::Error;

/// Errors reported by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("{entity} with {field} '{value}' already exists")]
    Conflict {
        entity: String,
        field: String,
        value: String,
    },

    #[error("Invalid reference: {message}")]
    InvalidReference { message: String },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl StorageError {
    /// Create a new NotFound error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a new Conflict error for a unique-field violation
    pub fn conflict(
        entity: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Conflict {
            entity: entity.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a new InvalidReference error (foreign key to a missing row)
    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::InvalidReference {
            message: message.into(),
        }
    }

    /// Create a new Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => CoreError::NotFound { entity, id },
            StorageError::Conflict {
                entity,
                field,
                value,
            } => CoreError::Conflict {
                entity,
                field,
                value,
            },
            StorageError::InvalidReference { message } => CoreError::Validation { message },
            StorageError::Backend { message } => CoreError::Storage { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medward_core::ErrorCategory;

    #[test]
    fn test_not_found_maps_to_core_not_found() {
        let core: CoreError = StorageError::not_found("Patient", 5).into();
        assert_eq!(core.category(), ErrorCategory::NotFound);
        assert_eq!(core.to_string(), "Patient not found: 5");
    }

    #[test]
    fn test_conflict_maps_to_core_conflict() {
        let core: CoreError = StorageError::conflict("Patient", "email", "a@b.c").into();
        assert_eq!(core.category(), ErrorCategory::Conflict);
    }

    #[test]
    fn test_backend_maps_to_server_error() {
        let core: CoreError = StorageError::backend("io error").into();
        assert!(core.is_server_error());
    }
}
