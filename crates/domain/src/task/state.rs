//! Task state machine.

use serde::{Deserialize, Serialize};

/// The status of a task.
///
/// State transitions:
/// ```text
/// Pending ──► InProgress ──► Completed
///    ▲                           │
///    └────────── reopen ─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn can_start(&self) -> bool {
        matches!(self, TaskStatus::Pending)
    }

    pub fn can_complete(&self) -> bool {
        matches!(self, TaskStatus::InProgress)
    }

    pub fn can_reopen(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Completed tasks keep their assignee frozen.
    pub fn can_change_assignee(&self) -> bool {
        !matches!(self, TaskStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
