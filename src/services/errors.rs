use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Form(String),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Whether the session must be torn down.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ServiceError::Unauthorized | ServiceError::Forbidden)
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            RepositoryError::Forbidden => ServiceError::Forbidden,
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_keep_their_kind() {
        assert!(matches!(
            ServiceError::from(RepositoryError::Unauthorized),
            ServiceError::Unauthorized
        ));
        assert!(ServiceError::from(RepositoryError::Forbidden).is_auth_failure());
        assert!(!ServiceError::from(RepositoryError::NotFound).is_auth_failure());
    }

    #[test]
    fn other_repository_errors_are_wrapped() {
        let err = ServiceError::from(RepositoryError::MalformedResponse("no total".into()));
        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::MalformedResponse(_))
        ));
    }
}
