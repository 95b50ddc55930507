//! Task aggregate implementation.

use chrono::{DateTime, NaiveDate, Utc};
use common::{ProjectId, TaskId, UserId, Version};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateRoot;
use crate::error::{DomainError, optional_text, required_text};
use crate::user::User;
use crate::value_objects::Priority;

use super::{TaskEvent, TaskStatus};

const MAX_TITLE_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Task aggregate root.
///
/// Invariant: `completed_at` is set if and only if the status is `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskItem {
    id: TaskId,

    #[serde(default)]
    version: Version,

    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: Priority,
    project_id: ProjectId,
    assignee_id: Option<UserId>,
    due_date: Option<NaiveDate>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    events: Vec<TaskEvent>,
}

impl AggregateRoot for TaskItem {
    type Id = TaskId;
    type Event = TaskEvent;

    fn aggregate_type() -> &'static str {
        "Task"
    }

    fn id(&self) -> TaskId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn domain_events(&self) -> &[TaskEvent] {
        &self.events
    }

    fn clear_domain_events(&mut self) {
        self.events.clear();
    }
}

// Query methods
impl TaskItem {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns true when the task has a due date before `today` and is not completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed() && self.due_date.is_some_and(|due| due < today)
    }
}

// Command methods
impl TaskItem {
    /// Creates a pending, unassigned task in a project.
    pub fn create(
        project_id: ProjectId,
        title: &str,
        description: Option<&str>,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Result<TaskItem, DomainError> {
        let title = required_text("Title", title, MAX_TITLE_LENGTH)?;
        let description = optional_text("Description", description, MAX_DESCRIPTION_LENGTH)?;
        let now = Utc::now();
        let id = TaskId::new();

        let mut task = TaskItem {
            id,
            version: Version::initial(),
            title: title.clone(),
            description,
            status: TaskStatus::Pending,
            priority,
            project_id,
            assignee_id: None,
            due_date,
            completed_at: None,
            created_at: now,
            updated_at: None,
            is_deleted: false,
            deleted_at: None,
            events: Vec::new(),
        };
        task.events.push(TaskEvent::Created {
            task_id: id,
            project_id,
            title,
            priority,
            due_date,
            occurred_at: now,
        });
        Ok(task)
    }

    pub fn update_details(
        &mut self,
        title: &str,
        description: Option<&str>,
    ) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        let title = required_text("Title", title, MAX_TITLE_LENGTH)?;
        let description = optional_text("Description", description, MAX_DESCRIPTION_LENGTH)?;
        let now = self.touch();
        self.title = title.clone();
        self.description = description.clone();
        self.events.push(TaskEvent::DetailsUpdated {
            task_id: self.id,
            title,
            description,
            occurred_at: now,
        });
        Ok(())
    }

    /// Changes the priority. Setting the current priority records nothing.
    pub fn change_priority(&mut self, priority: Priority) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        if self.priority == priority {
            return Ok(());
        }
        let now = self.touch();
        let previous = std::mem::replace(&mut self.priority, priority);
        self.events.push(TaskEvent::PriorityChanged {
            task_id: self.id,
            previous,
            priority,
            occurred_at: now,
        });
        Ok(())
    }

    /// Sets or clears the due date. Setting the current value records nothing.
    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        if self.due_date == due_date {
            return Ok(());
        }
        let now = self.touch();
        self.due_date = due_date;
        self.events.push(TaskEvent::DueDateChanged {
            task_id: self.id,
            due_date,
            occurred_at: now,
        });
        Ok(())
    }

    /// Assigns the task to an active user.
    pub fn assign_to(&mut self, user: &User) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        self.ensure(self.status.can_change_assignee(), "assign")?;
        if !user.is_active() || user.is_deleted() {
            return Err(DomainError::AssigneeInactive);
        }
        let now = self.touch();
        self.assignee_id = Some(user.id());
        self.events.push(TaskEvent::Assigned {
            task_id: self.id,
            assignee_id: user.id(),
            occurred_at: now,
        });
        Ok(())
    }

    pub fn unassign(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        self.ensure(self.status.can_change_assignee(), "unassign")?;
        let previous_assignee_id = self.assignee_id.ok_or(DomainError::NotAssigned)?;
        let now = self.touch();
        self.assignee_id = None;
        self.events.push(TaskEvent::Unassigned {
            task_id: self.id,
            previous_assignee_id,
            occurred_at: now,
        });
        Ok(())
    }

    /// Pending → InProgress.
    pub fn start(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        self.ensure(self.status.can_start(), "start")?;
        let now = self.touch();
        self.status = TaskStatus::InProgress;
        self.events.push(TaskEvent::Started {
            task_id: self.id,
            occurred_at: now,
        });
        Ok(())
    }

    /// InProgress → Completed, stamping `completed_at`.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        self.ensure(self.status.can_complete(), "complete")?;
        let now = self.touch();
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
        self.events.push(TaskEvent::Completed {
            task_id: self.id,
            project_id: self.project_id,
            assignee_id: self.assignee_id,
            occurred_at: now,
        });
        Ok(())
    }

    /// Completed → Pending, clearing `completed_at`.
    pub fn reopen(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        self.ensure(self.status.can_reopen(), "reopen")?;
        let now = self.touch();
        self.status = TaskStatus::Pending;
        self.completed_at = None;
        self.events.push(TaskEvent::Reopened {
            task_id: self.id,
            occurred_at: now,
        });
        Ok(())
    }

    pub fn delete(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        let now = self.touch();
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.events.push(TaskEvent::Deleted {
            task_id: self.id,
            occurred_at: now,
        });
        Ok(())
    }

    fn ensure(&self, allowed: bool, action: &'static str) -> Result<(), DomainError> {
        if allowed {
            Ok(())
        } else {
            Err(DomainError::InvalidStateTransition {
                entity: "task",
                current: self.status.to_string(),
                action,
            })
        }
    }

    fn ensure_not_deleted(&self) -> Result<(), DomainError> {
        if self.is_deleted {
            return Err(DomainError::Deleted { entity: "Task" });
        }
        Ok(())
    }

    fn touch(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.updated_at = Some(now);
        now
    }
}
