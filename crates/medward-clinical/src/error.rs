use medward_auth::AuthError;
use medward_core::CoreError;
use medward_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the clinical services.
#[derive(Debug, Error)]
pub enum ClinicalError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<StorageError> for ClinicalError {
    fn from(err: StorageError) -> Self {
        Self::Core(err.into())
    }
}

/// Convenience result type for clinical service operations.
pub type ClinicalResult<T> = Result<T, ClinicalError>;
