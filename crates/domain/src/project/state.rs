//! Project state machine.

use serde::{Deserialize, Serialize};

/// The status of a project in its lifecycle.
///
/// State transitions:
/// ```text
/// Draft ──► Active ──► Completed
///   │         │
///   └─────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    /// Project is being planned.
    #[default]
    Draft,

    /// Work is under way.
    Active,

    /// All work is done (terminal state).
    Completed,

    /// Project was abandoned (terminal state).
    Cancelled,
}

impl ProjectStatus {
    pub fn can_activate(&self) -> bool {
        matches!(self, ProjectStatus::Draft)
    }

    pub fn can_complete(&self) -> bool {
        matches!(self, ProjectStatus::Active)
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self, ProjectStatus::Draft | ProjectStatus::Active)
    }

    /// Returns true if tasks can still be added.
    pub fn accepts_tasks(&self) -> bool {
        matches!(self, ProjectStatus::Draft | ProjectStatus::Active)
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "Draft",
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_draft() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Draft);
    }

    #[test]
    fn only_draft_can_activate() {
        assert!(ProjectStatus::Draft.can_activate());
        assert!(!ProjectStatus::Active.can_activate());
        assert!(!ProjectStatus::Completed.can_activate());
        assert!(!ProjectStatus::Cancelled.can_activate());
    }

    #[test]
    fn only_active_can_complete() {
        assert!(!ProjectStatus::Draft.can_complete());
        assert!(ProjectStatus::Active.can_complete());
        assert!(!ProjectStatus::Completed.can_complete());
        assert!(!ProjectStatus::Cancelled.can_complete());
    }

    #[test]
    fn cancel_from_non_terminal_states() {
        assert!(ProjectStatus::Draft.can_cancel());
        assert!(ProjectStatus::Active.can_cancel());
        assert!(!ProjectStatus::Completed.can_cancel());
        assert!(!ProjectStatus::Cancelled.can_cancel());
    }

    #[test]
    fn terminal_states() {
        assert!(!ProjectStatus::Draft.is_terminal());
        assert!(!ProjectStatus::Active.is_terminal());
        assert!(ProjectStatus::Completed.is_terminal());
        assert!(ProjectStatus::Cancelled.is_terminal());
    }
}
