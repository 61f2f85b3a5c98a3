use crate::domain::directory::DirectoryError;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("failed to load search index: {0}")]
    Load(String),
}

impl From<DirectoryError> for SearchError {
    fn from(err: DirectoryError) -> Self {
        SearchError::Load(err.to_string())
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Load(_) => AppError::ExternalService(err.to_string()),
        }
    }
}
