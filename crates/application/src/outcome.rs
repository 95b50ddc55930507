//! Success-or-failure outcome returned by every handler.

use domain::{DomainError, ValueError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validation message tied to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// An expected, business-meaningful failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct Failure {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// `"<entity> not found"`.
    pub fn not_found(entity: &str) -> Self {
        Self::new(format!("{entity} not found"))
    }

    /// A failure carrying every field error reported by validators.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            message: "Validation failed".to_string(),
            errors,
        }
    }
}

impl From<DomainError> for Failure {
    fn from(err: DomainError) -> Self {
        Failure::new(err.to_string())
    }
}

impl From<ValueError> for Failure {
    fn from(err: ValueError) -> Self {
        Failure::new(err.to_string())
    }
}

/// Result of a command or query.
///
/// Exactly one of a success value or a [`Failure`]. There is no panicking
/// accessor; callers inspect the variant or use the `Option`/`Result`
/// conversions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data")]
pub enum Outcome<T = ()> {
    Success(T),
    Failure(Failure),
}

impl<T> Outcome<T> {
    pub fn fail(message: impl Into<String>) -> Self {
        Outcome::Failure(Failure::new(message))
    }

    pub fn not_found(entity: &str) -> Self {
        Outcome::Failure(Failure::not_found(entity))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        self.failure().map(|f| f.message.as_str())
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }
}

impl Outcome<()> {
    pub fn ok() -> Self {
        Outcome::Success(())
    }
}

impl<T> From<Result<T, Failure>> for Outcome<T> {
    fn from(result: Result<T, Failure>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(failure) => Outcome::Failure(failure),
        }
    }
}

/// Unwraps a `Result`, or returns `Ok(Outcome::Failure(..))` from the
/// enclosing handler when it is an error convertible into [`Failure`].
#[macro_export]
macro_rules! try_outcome {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(err) => return Ok($crate::Outcome::Failure(err.into())),
        }
    };
}
