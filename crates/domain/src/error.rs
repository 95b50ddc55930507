//! Domain error types.

use thiserror::Error;

use crate::value_objects::ValueError;

/// Errors raised when a domain operation's preconditions are violated.
///
/// The `Display` text of each variant is the human-readable message surfaced
/// to callers once the application layer turns it into a failed outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A value object rejected its input.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// A required text field was empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A text field exceeded its maximum length.
    #[error("{field} must not exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// The entity is not in a state that allows the operation.
    #[error("Cannot {action} {entity} in {current} state")]
    InvalidStateTransition {
        entity: &'static str,
        current: String,
        action: &'static str,
    },

    #[error("Owner is not active")]
    OwnerInactive,

    #[error("Cannot assign task to an inactive user")]
    AssigneeInactive,

    #[error("Task is not assigned")]
    NotAssigned,

    #[error("Inactive users cannot log in")]
    InactiveLogin,

    #[error("User is already {state}")]
    ActivationUnchanged { state: &'static str },

    /// A project may only be completed once every task is completed.
    #[error("Cannot complete project: {pending} task(s) are not completed")]
    IncompleteTasks { pending: usize },

    #[error("End date must be after start date")]
    InvalidSchedule,

    #[error("Budget currency is fixed to {current} and cannot change to {requested}")]
    BudgetCurrencyChange { current: String, requested: String },

    #[error("Project has no budget")]
    NoBudget,

    #[error("Task belongs to a different project")]
    TaskProjectMismatch,

    #[error("Parent comment belongs to a different task")]
    ParentTaskMismatch,

    #[error("{entity} is deleted")]
    Deleted { entity: &'static str },
}

/// Trims `value` and checks it is non-empty and at most `max` characters.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Required { field });
    }
    if value.chars().count() > max {
        return Err(DomainError::TooLong { field, max });
    }
    Ok(value.to_string())
}

/// Normalises optional text: blank becomes `None`, otherwise length-checked.
pub(crate) fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.chars().count() > max => Err(DomainError::TooLong { field, max }),
        Some(value) => Ok(Some(value.to_string())),
    }
}
