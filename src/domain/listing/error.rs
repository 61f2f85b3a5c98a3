use crate::domain::directory::DirectoryError;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListingError {
    #[error("failed to load businesses: {0}")]
    Load(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    /// The category or subcategory being listed does not exist
    #[error("no listing for {0}")]
    NotFound(String),
}

impl From<DirectoryError> for ListingError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(what) => ListingError::NotFound(what),
            other => ListingError::Load(other.to_string()),
        }
    }
}

impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Load(_) => AppError::ExternalService(err.to_string()),
            ListingError::NotFound(_) => AppError::NotFound(err.to_string()),
            ListingError::Invalid(msg) => AppError::BadRequest(msg),
        }
    }
}
