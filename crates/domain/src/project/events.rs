//! Project domain events.

use chrono::{DateTime, NaiveDate, Utc};
use common::{ProjectId, TaskId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainEvent;
use crate::value_objects::Money;

/// Events raised by the project aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ProjectEvent {
    Created {
        project_id: ProjectId,
        owner_id: UserId,
        name: String,
        budget: Option<Money>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        occurred_at: DateTime<Utc>,
    },

    DetailsUpdated {
        project_id: ProjectId,
        name: String,
        description: Option<String>,
        occurred_at: DateTime<Utc>,
    },

    Rescheduled {
        project_id: ProjectId,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        occurred_at: DateTime<Utc>,
    },

    /// The budget was set or increased; `budget` is the new total.
    BudgetChanged {
        project_id: ProjectId,
        budget: Money,
        occurred_at: DateTime<Utc>,
    },

    Activated {
        project_id: ProjectId,
        occurred_at: DateTime<Utc>,
    },

    Completed {
        project_id: ProjectId,
        task_count: usize,
        occurred_at: DateTime<Utc>,
    },

    Cancelled {
        project_id: ProjectId,
        reason: Option<String>,
        occurred_at: DateTime<Utc>,
    },

    TaskAdded {
        project_id: ProjectId,
        task_id: TaskId,
        occurred_at: DateTime<Utc>,
    },

    Deleted {
        project_id: ProjectId,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent for ProjectEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProjectEvent::Created { .. } => "ProjectCreated",
            ProjectEvent::DetailsUpdated { .. } => "ProjectDetailsUpdated",
            ProjectEvent::Rescheduled { .. } => "ProjectRescheduled",
            ProjectEvent::BudgetChanged { .. } => "ProjectBudgetChanged",
            ProjectEvent::Activated { .. } => "ProjectActivated",
            ProjectEvent::Completed { .. } => "ProjectCompleted",
            ProjectEvent::Cancelled { .. } => "ProjectCancelled",
            ProjectEvent::TaskAdded { .. } => "ProjectTaskAdded",
            ProjectEvent::Deleted { .. } => "ProjectDeleted",
        }
    }

    fn aggregate_id(&self) -> Uuid {
        match self {
            ProjectEvent::Created { project_id, .. }
            | ProjectEvent::DetailsUpdated { project_id, .. }
            | ProjectEvent::Rescheduled { project_id, .. }
            | ProjectEvent::BudgetChanged { project_id, .. }
            | ProjectEvent::Activated { project_id, .. }
            | ProjectEvent::Completed { project_id, .. }
            | ProjectEvent::Cancelled { project_id, .. }
            | ProjectEvent::TaskAdded { project_id, .. }
            | ProjectEvent::Deleted { project_id, .. } => project_id.as_uuid(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProjectEvent::Created { occurred_at, .. }
            | ProjectEvent::DetailsUpdated { occurred_at, .. }
            | ProjectEvent::Rescheduled { occurred_at, .. }
            | ProjectEvent::BudgetChanged { occurred_at, .. }
            | ProjectEvent::Activated { occurred_at, .. }
            | ProjectEvent::Completed { occurred_at, .. }
            | ProjectEvent::Cancelled { occurred_at, .. }
            | ProjectEvent::TaskAdded { occurred_at, .. }
            | ProjectEvent::Deleted { occurred_at, .. } => *occurred_at,
        }
    }
}
