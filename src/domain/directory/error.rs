use crate::error::AppError;

/// Failure talking to the hosted table service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DirectoryError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("table service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
    /// A record the request names does not resolve
    #[error("record not found: {0}")]
    NotFound(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<DirectoryError> for DirectoryServiceError {
    fn from(err: DirectoryError) -> Self {
        DirectoryServiceError::Dependency(err.to_string())
    }
}

impl From<DirectoryServiceError> for AppError {
    fn from(err: DirectoryServiceError) -> Self {
        match err {
            DirectoryServiceError::Dependency(_) => AppError::ExternalService(err.to_string()),
        }
    }
}
