use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Failures of a single adapter call.
///
/// The first three variants are raised locally before or after the request and
/// are never retried. Everything else comes from the transport or the backend
/// and is surfaced as-is.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Invalid field name: {0}")]
    InvalidFieldName(String),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Entity not found")]
    NotFound,

    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Maps a non-success status and its body to an error.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => RepositoryError::Unauthorized,
            StatusCode::FORBIDDEN => RepositoryError::Forbidden,
            StatusCode::NOT_FOUND => RepositoryError::NotFound,
            _ => RepositoryError::Status { status, body },
        }
    }

    /// Whether the backend rejected the session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            RepositoryError::Unauthorized | RepositoryError::Forbidden
        )
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::InvalidFieldName(_) => {
                RepositoryError::InvalidFieldName(err.to_string())
            }
            TypeConstraintError::NonPositivePage(_) | TypeConstraintError::NonPositivePageSize(_) => {
                RepositoryError::InvalidPagination(err.to_string())
            }
            _ => RepositoryError::Validation(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::MalformedResponse(err.to_string())
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Session(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_taxonomy() {
        assert!(matches!(
            RepositoryError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            RepositoryError::Unauthorized
        ));
        assert!(matches!(
            RepositoryError::from_status(StatusCode::FORBIDDEN, String::new()),
            RepositoryError::Forbidden
        ));
        assert!(matches!(
            RepositoryError::from_status(StatusCode::NOT_FOUND, String::new()),
            RepositoryError::NotFound
        ));
        match RepositoryError::from_status(StatusCode::BAD_REQUEST, "bad".into()) {
            RepositoryError::Status { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, "bad");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn constraint_errors_map_to_adapter_errors() {
        let err: RepositoryError = TypeConstraintError::InvalidFieldName("a-b".into()).into();
        assert!(matches!(err, RepositoryError::InvalidFieldName(_)));
        let err: RepositoryError = TypeConstraintError::NonPositivePageSize(0).into();
        assert!(matches!(err, RepositoryError::InvalidPagination(_)));
        let err: RepositoryError = TypeConstraintError::InvalidEmail.into();
        assert!(matches!(err, RepositoryError::Validation(_)));
    }
}
