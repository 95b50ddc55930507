//! Application layer error types.
//!
//! Only infrastructure failures and programming errors are errors here.
//! Validation, not-found and invariant failures are returned as
//! [`Outcome::Failure`](crate::Outcome::Failure).

use domain::RepositoryError;
use thiserror::Error;

/// Application layer result type.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// A repository or unit-of-work call failed.
    #[error("Persistence error: {0}")]
    Persistence(#[source] RepositoryError),

    #[error("Operation cancelled")]
    Cancelled,

    /// `Mediator::send` was called for a request type with no handler.
    #[error("No handler registered for {0}")]
    HandlerNotRegistered(&'static str),
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Cancelled => ApplicationError::Cancelled,
            other => ApplicationError::Persistence(other),
        }
    }
}
