use thiserror::Error;

use crate::forms::FieldError;
use crate::repository::RepositoryError;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// The request payload violated one or more field constraints.
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    /// The store refused the write because of a table constraint.
    #[error("constraint violation: {0}")]
    Constraint(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl ServiceError {
    /// Map a repository failure, logging anything the caller cannot act on.
    pub fn from_repository(context: &str, err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => {
                log::warn!("{context}: {message}");
                ServiceError::Constraint(message)
            }
            err => {
                log::error!("{context}: {err}");
                ServiceError::Internal
            }
        }
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_not_found_stays_not_found() {
        assert_eq!(
            ServiceError::from_repository("lookup", RepositoryError::NotFound),
            ServiceError::NotFound
        );
    }

    #[test]
    fn constraint_violations_are_kept() {
        let err = RepositoryError::ConstraintViolation("CheckViolation".to_string());
        assert!(matches!(
            ServiceError::from_repository("insert", err),
            ServiceError::Constraint(_)
        ));
    }

    #[test]
    fn everything_else_is_internal() {
        assert_eq!(
            ServiceError::from_repository("insert", RepositoryError::LockPoisoned),
            ServiceError::Internal
        );
    }
}
