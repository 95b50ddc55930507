//! Task domain events.

use chrono::{DateTime, NaiveDate, Utc};
use common::{ProjectId, TaskId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainEvent;
use crate::value_objects::Priority;

/// Events raised by the task aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum TaskEvent {
    Created {
        task_id: TaskId,
        project_id: ProjectId,
        title: String,
        priority: Priority,
        due_date: Option<NaiveDate>,
        occurred_at: DateTime<Utc>,
    },

    DetailsUpdated {
        task_id: TaskId,
        title: String,
        description: Option<String>,
        occurred_at: DateTime<Utc>,
    },

    PriorityChanged {
        task_id: TaskId,
        previous: Priority,
        priority: Priority,
        occurred_at: DateTime<Utc>,
    },

    DueDateChanged {
        task_id: TaskId,
        due_date: Option<NaiveDate>,
        occurred_at: DateTime<Utc>,
    },

    Assigned {
        task_id: TaskId,
        assignee_id: UserId,
        occurred_at: DateTime<Utc>,
    },

    Unassigned {
        task_id: TaskId,
        previous_assignee_id: UserId,
        occurred_at: DateTime<Utc>,
    },

    Started {
        task_id: TaskId,
        occurred_at: DateTime<Utc>,
    },

    /// The task was completed; `occurred_at` equals the task's `completed_at`.
    Completed {
        task_id: TaskId,
        project_id: ProjectId,
        assignee_id: Option<UserId>,
        occurred_at: DateTime<Utc>,
    },

    Reopened {
        task_id: TaskId,
        occurred_at: DateTime<Utc>,
    },

    Deleted {
        task_id: TaskId,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent for TaskEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TaskEvent::Created { .. } => "TaskCreated",
            TaskEvent::DetailsUpdated { .. } => "TaskDetailsUpdated",
            TaskEvent::PriorityChanged { .. } => "TaskPriorityChanged",
            TaskEvent::DueDateChanged { .. } => "TaskDueDateChanged",
            TaskEvent::Assigned { .. } => "TaskAssigned",
            TaskEvent::Unassigned { .. } => "TaskUnassigned",
            TaskEvent::Started { .. } => "TaskStarted",
            TaskEvent::Completed { .. } => "TaskCompleted",
            TaskEvent::Reopened { .. } => "TaskReopened",
            TaskEvent::Deleted { .. } => "TaskDeleted",
        }
    }

    fn aggregate_id(&self) -> Uuid {
        match self {
            TaskEvent::Created { task_id, .. }
            | TaskEvent::DetailsUpdated { task_id, .. }
            | TaskEvent::PriorityChanged { task_id, .. }
            | TaskEvent::DueDateChanged { task_id, .. }
            | TaskEvent::Assigned { task_id, .. }
            | TaskEvent::Unassigned { task_id, .. }
            | TaskEvent::Started { task_id, .. }
            | TaskEvent::Completed { task_id, .. }
            | TaskEvent::Reopened { task_id, .. }
            | TaskEvent::Deleted { task_id, .. } => task_id.as_uuid(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            TaskEvent::Created { occurred_at, .. }
            | TaskEvent::DetailsUpdated { occurred_at, .. }
            | TaskEvent::PriorityChanged { occurred_at, .. }
            | TaskEvent::DueDateChanged { occurred_at, .. }
            | TaskEvent::Assigned { occurred_at, .. }
            | TaskEvent::Unassigned { occurred_at, .. }
            | TaskEvent::Started { occurred_at, .. }
            | TaskEvent::Completed { occurred_at, .. }
            | TaskEvent::Reopened { occurred_at, .. }
            | TaskEvent::Deleted { occurred_at, .. } => *occurred_at,
        }
    }
}
