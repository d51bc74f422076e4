use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Result type returned by service layer functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by service layer functions.
///
/// Every variant is caught at the route boundary and turned into a flash
/// message or an error response; the previously persisted state is always
/// left intact.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller is not signed in or the credentials were rejected.
    #[error("unauthorized")]
    Unauthorized,
    /// The targeted record does not exist.
    #[error("not found")]
    NotFound,
    /// A form payload failed validation; no backend call was made.
    #[error("{0}")]
    Form(String),
    /// An uploaded image could not be stored.
    #[error("{0}")]
    Upload(String),
    /// The persistence gateway failed.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}
