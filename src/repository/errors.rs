use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The addressed row does not exist.
    #[error("entity not found")]
    NotFound,
    /// The store rejected a write because of a table constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// A stored value could not be turned into a domain value.
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("database error: {0}")]
    DatabaseError(DieselError),
    #[error("connection pool error: {0}")]
    ConnectionError(#[from] PoolError),
    /// A writer panicked while holding the in-memory store.
    #[error("repository lock poisoned")]
    LockPoisoned,
}

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(
                kind @ (DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation),
                info,
            ) => Self::ConstraintViolation(format!("{kind:?}: {}", info.message())),
            other => Self::DatabaseError(other),
        }
    }
}

/// Convenient alias for results returned from repositories.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
