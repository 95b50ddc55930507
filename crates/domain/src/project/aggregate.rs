//! Project aggregate implementation.

use chrono::{DateTime, NaiveDate, Utc};
use common::{ProjectId, TaskId, UserId, Version};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateRoot;
use crate::error::{DomainError, optional_text, required_text};
use crate::task::TaskItem;
use crate::user::User;
use crate::value_objects::Money;

use super::{ProjectEvent, ProjectStatus};

const MAX_NAME_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Project aggregate root.
///
/// A project owns its tasks for lifecycle purposes: completing a project
/// requires every task to be completed, and deleting it deletes its tasks.
/// Tasks are persisted separately and attached by the repository on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,

    #[serde(default)]
    version: Version,

    name: String,
    description: Option<String>,
    status: ProjectStatus,
    owner_id: UserId,
    budget: Option<Money>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    tasks: Vec<TaskItem>,

    #[serde(skip)]
    events: Vec<ProjectEvent>,
}

impl AggregateRoot for Project {
    type Id = ProjectId;
    type Event = ProjectEvent;

    fn aggregate_type() -> &'static str {
        "Project"
    }

    fn id(&self) -> ProjectId {
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

    fn domain_events(&self) -> &[ProjectEvent] {
        &self.events
    }

    fn clear_domain_events(&mut self) {
        self.events.clear();
    }
}

// Query methods
impl Project {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn budget(&self) -> Option<&Money> {
        self.budget.as_ref()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the project's (non-deleted) tasks.
    pub fn tasks(&self) -> &[TaskItem] {
        &self.tasks
    }

    pub fn task(&self, task_id: TaskId) -> Option<&TaskItem> {
        self.tasks.iter().find(|t| t.id() == task_id)
    }

    pub fn completed_task_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Fails once the project is completed, cancelled or deleted. Tasks of
    /// such a project are frozen.
    pub fn ensure_tasks_editable(&self) -> Result<(), DomainError> {
        self.ensure_mutable("change tasks of")
    }
}

// Command methods
impl Project {
    /// Creates a draft project owned by an active user.
    pub fn create(
        name: &str,
        description: Option<&str>,
        owner: &User,
        budget: Option<Money>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Project, DomainError> {
        if !owner.is_active() || owner.is_deleted() {
            return Err(DomainError::OwnerInactive);
        }
        let name = required_text("Name", name, MAX_NAME_LENGTH)?;
        let description = optional_text("Description", description, MAX_DESCRIPTION_LENGTH)?;
        check_schedule(start_date, end_date)?;

        let now = Utc::now();
        let id = ProjectId::new();
        let mut project = Project {
            id,
            version: Version::initial(),
            name: name.clone(),
            description,
            status: ProjectStatus::Draft,
            owner_id: owner.id(),
            budget: budget.clone(),
            start_date,
            end_date,
            created_at: now,
            updated_at: None,
            is_deleted: false,
            deleted_at: None,
            tasks: Vec::new(),
            events: Vec::new(),
        };
        project.events.push(ProjectEvent::Created {
            project_id: id,
            owner_id: owner.id(),
            name,
            budget,
            start_date,
            end_date,
            occurred_at: now,
        });
        Ok(project)
    }

    pub fn update_details(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), DomainError> {
        self.ensure_mutable("update")?;
        let name = required_text("Name", name, MAX_NAME_LENGTH)?;
        let description = optional_text("Description", description, MAX_DESCRIPTION_LENGTH)?;
        let now = self.touch();
        self.name = name.clone();
        self.description = description.clone();
        self.events.push(ProjectEvent::DetailsUpdated {
            project_id: self.id,
            name,
            description,
            occurred_at: now,
        });
        Ok(())
    }

    /// Moves the schedule. The end date, if any, must fall after the start date.
    pub fn reschedule(
        &mut self,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<(), DomainError> {
        self.ensure_mutable("reschedule")?;
        check_schedule(start_date, end_date)?;
        let now = self.touch();
        self.start_date = start_date;
        self.end_date = end_date;
        self.events.push(ProjectEvent::Rescheduled {
            project_id: self.id,
            start_date,
            end_date,
            occurred_at: now,
        });
        Ok(())
    }

    /// Sets the budget. Once a budget exists its currency cannot change.
    pub fn set_budget(&mut self, budget: Money) -> Result<(), DomainError> {
        self.ensure_mutable("change the budget of")?;
        if let Some(current) = &self.budget
            && !current.same_currency(&budget)
        {
            return Err(DomainError::BudgetCurrencyChange {
                current: current.currency().to_string(),
                requested: budget.currency().to_string(),
            });
        }
        self.apply_budget(budget);
        Ok(())
    }

    /// Adds `amount` to the existing budget.
    pub fn increase_budget(&mut self, amount: &Money) -> Result<(), DomainError> {
        self.ensure_mutable("change the budget of")?;
        let current = self.budget.as_ref().ok_or(DomainError::NoBudget)?;
        let total = current.add(amount)?;
        self.apply_budget(total);
        Ok(())
    }

    /// Draft → Active.
    pub fn activate(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        self.ensure(self.status.can_activate(), "activate")?;
        let now = self.touch();
        self.status = ProjectStatus::Active;
        self.events.push(ProjectEvent::Activated {
            project_id: self.id,
            occurred_at: now,
        });
        Ok(())
    }

    /// Active → Completed. Every task must already be completed.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        self.ensure(self.status.can_complete(), "complete")?;
        let pending = self.tasks.len() - self.completed_task_count();
        if pending > 0 {
            return Err(DomainError::IncompleteTasks { pending });
        }
        let now = self.touch();
        self.status = ProjectStatus::Completed;
        self.events.push(ProjectEvent::Completed {
            project_id: self.id,
            task_count: self.tasks.len(),
            occurred_at: now,
        });
        Ok(())
    }

    /// Draft or Active → Cancelled.
    pub fn cancel(&mut self, reason: Option<&str>) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        self.ensure(self.status.can_cancel(), "cancel")?;
        let reason = optional_text("Reason", reason, MAX_DESCRIPTION_LENGTH)?;
        let now = self.touch();
        self.status = ProjectStatus::Cancelled;
        self.events.push(ProjectEvent::Cancelled {
            project_id: self.id,
            reason,
            occurred_at: now,
        });
        Ok(())
    }

    /// Attaches a newly created task to this project.
    pub fn add_task(&mut self, task: &TaskItem) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        self.ensure(self.status.accepts_tasks(), "add tasks to")?;
        if task.project_id() != self.id {
            return Err(DomainError::TaskProjectMismatch);
        }
        if self.task(task.id()).is_some() {
            return Ok(());
        }
        let mut member = task.clone();
        member.clear_domain_events();
        self.tasks.push(member);

        let now = self.touch();
        self.events.push(ProjectEvent::TaskAdded {
            project_id: self.id,
            task_id: task.id(),
            occurred_at: now,
        });
        Ok(())
    }

    /// Marks the project and every attached task as deleted.
    ///
    /// Returns the deleted tasks so the caller can persist them.
    pub fn delete(&mut self) -> Result<Vec<TaskItem>, DomainError> {
        self.ensure_not_deleted()?;
        let mut deleted = Vec::with_capacity(self.tasks.len());
        for mut task in std::mem::take(&mut self.tasks) {
            task.delete()?;
            deleted.push(task);
        }
        let now = self.touch();
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.events.push(ProjectEvent::Deleted {
            project_id: self.id,
            occurred_at: now,
        });
        Ok(deleted)
    }

    /// Replaces the attached task collection.
    ///
    /// Used by repositories when hydrating a project; tasks of other projects
    /// and deleted tasks are ignored, and their pending events are dropped.
    pub fn hydrate_tasks(&mut self, tasks: impl IntoIterator<Item = TaskItem>) {
        let id = self.id;
        self.tasks = tasks
            .into_iter()
            .filter(|t| t.project_id() == id && !t.is_deleted())
            .map(|mut t| {
                t.clear_domain_events();
                t
            })
            .collect();
        self.tasks.sort_by_key(|t| t.created_at());
    }

    fn apply_budget(&mut self, budget: Money) {
        let now = self.touch();
        self.budget = Some(budget.clone());
        self.events.push(ProjectEvent::BudgetChanged {
            project_id: self.id,
            budget,
            occurred_at: now,
        });
    }

    fn ensure(&self, allowed: bool, action: &'static str) -> Result<(), DomainError> {
        if allowed {
            Ok(())
        } else {
            Err(DomainError::InvalidStateTransition {
                entity: "project",
                current: self.status.to_string(),
                action,
            })
        }
    }

    fn ensure_mutable(&self, action: &'static str) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        self.ensure(!self.status.is_terminal(), action)
    }

    fn ensure_not_deleted(&self) -> Result<(), DomainError> {
        if self.is_deleted {
            return Err(DomainError::Deleted { entity: "Project" });
        }
        Ok(())
    }

    fn touch(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.updated_at = Some(now);
        now
    }
}

fn check_schedule(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<(), DomainError> {
    match end_date {
        Some(end) if end <= start_date => Err(DomainError::InvalidSchedule),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::DomainEvent;
    use crate::user::UserRole;
    use crate::value_objects::{Priority, ValueError};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn owner() -> User {
        User::create("owner@example.com", "Owner", UserRole::Manager).unwrap()
    }

    fn draft() -> Project {
        let mut project =
            Project::create("Launch", None, &owner(), None, date(2025, 1, 1), None).unwrap();
        project.clear_domain_events();
        project
    }

    fn task_for(project: &Project) -> TaskItem {
        TaskItem::create(project.id(), "Ship it", None, Priority::Medium, None).unwrap()
    }

    #[test]
    fn create_starts_in_draft() {
        let owner = owner();
        let project = Project::create(
            "Launch",
            Some("Go live"),
            &owner,
            Some(Money::new(10_000, "USD").unwrap()),
            date(2025, 1, 1),
            Some(date(2025, 3, 1)),
        )
        .unwrap();
        assert_eq!(project.status(), ProjectStatus::Draft);
        assert_eq!(project.owner_id(), owner.id());
        assert_eq!(project.domain_events().len(), 1);
        assert_eq!(project.domain_events()[0].event_type(), "ProjectCreated");
    }

    #[test]
    fn create_rejects_inactive_owner() {
        let mut owner = owner();
        owner.deactivate().unwrap();
        let err = Project::create("Launch", None, &owner, None, date(2025, 1, 1), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Owner is not active");
    }

    #[test]
    fn end_date_must_follow_start_date() {
        let owner = owner();
        for end in [date(2025, 1, 1), date(2024, 12, 31)] {
            let err =
                Project::create("Launch", None, &owner, None, date(2025, 1, 1), Some(end))
                    .unwrap_err();
            assert_eq!(err, DomainError::InvalidSchedule);
        }

        let mut project = draft();
        assert_eq!(
            project.reschedule(date(2025, 2, 1), Some(date(2025, 1, 1))),
            Err(DomainError::InvalidSchedule)
        );
        project
            .reschedule(date(2025, 2, 1), Some(date(2025, 2, 2)))
            .unwrap();
        assert_eq!(project.end_date(), Some(date(2025, 2, 2)));
    }

    #[test]
    fn complete_requires_active() {
        let mut project = draft();
        assert!(matches!(
            project.complete(),
            Err(DomainError::InvalidStateTransition { action: "complete", .. })
        ));
    }

    #[test]
    fn complete_without_tasks_is_terminal() {
        let mut project = draft();
        project.activate().unwrap();
        project.complete().unwrap();
        assert_eq!(project.status(), ProjectStatus::Completed);

        assert!(project.activate().is_err());
        assert!(project.cancel(None).is_err());
        assert!(project.complete().is_err());
    }

    #[test]
    fn complete_fails_with_open_tasks() {
        let mut project = draft();
        project.activate().unwrap();
        let mut task = task_for(&project);
        project.add_task(&task).unwrap();

        assert_eq!(
            project.complete(),
            Err(DomainError::IncompleteTasks { pending: 1 })
        );

        task.start().unwrap();
        task.complete().unwrap();
        project.hydrate_tasks(vec![task]);
        project.complete().unwrap();
    }

    #[test]
    fn cancel_from_draft_or_active() {
        let mut project = draft();
        project.cancel(Some("No budget")).unwrap();
        assert_eq!(project.status(), ProjectStatus::Cancelled);
        assert!(project.activate().is_err());

        let mut project = draft();
        project.activate().unwrap();
        project.cancel(None).unwrap();
        assert_eq!(project.status(), ProjectStatus::Cancelled);
    }

    #[test]
    fn budget_currency_is_fixed() {
        let owner = owner();
        let mut project = Project::create(
            "Launch",
            None,
            &owner,
            Some(Money::new(500, "USD").unwrap()),
            date(2025, 1, 1),
            None,
        )
        .unwrap();

        let err = project
            .set_budget(Money::new(900, "EUR").unwrap())
            .unwrap_err();
        assert!(matches!(err, DomainError::BudgetCurrencyChange { .. }));

        let err = project
            .increase_budget(&Money::new(100, "EUR").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Value(ValueError::CurrencyMismatch { .. })
        ));

        project
            .increase_budget(&Money::new(250, "USD").unwrap())
            .unwrap();
        assert_eq!(project.budget().unwrap().amount(), 750);
    }

    #[test]
    fn first_budget_may_pick_any_currency() {
        let mut project = draft();
        assert_eq!(
            project.increase_budget(&Money::new(1, "USD").unwrap()),
            Err(DomainError::NoBudget)
        );
        project.set_budget(Money::new(100, "CHF").unwrap()).unwrap();
        assert_eq!(project.budget().unwrap().currency().as_str(), "CHF");
    }

    #[test]
    fn add_task_checks_project_and_status() {
        let mut project = draft();
        let foreign = TaskItem::create(ProjectId::new(), "Other", None, Priority::Low, None)
            .unwrap();
        assert_eq!(
            project.add_task(&foreign),
            Err(DomainError::TaskProjectMismatch)
        );

        let task = task_for(&project);
        project.add_task(&task).unwrap();
        assert_eq!(project.tasks().len(), 1);
        assert!(project.tasks()[0].domain_events().is_empty());

        project.cancel(None).unwrap();
        assert!(project.add_task(&task_for(&project)).is_err());
    }

    #[test]
    fn delete_cascades_to_tasks() {
        let mut project = draft();
        project.add_task(&task_for(&project)).unwrap();
        project.add_task(&task_for(&project)).unwrap();

        let deleted = project.delete().unwrap();
        assert!(project.is_deleted());
        assert_eq!(deleted.len(), 2);
        assert!(deleted.iter().all(|t| t.is_deleted()));
        assert!(project.tasks().is_empty());
        assert!(project.delete().is_err());
    }

    #[test]
    fn hydrate_ignores_foreign_and_deleted_tasks() {
        let mut project = draft();
        let mine = task_for(&project);
        let mut gone = task_for(&project);
        gone.delete().unwrap();
        let foreign = TaskItem::create(ProjectId::new(), "Other", None, Priority::Low, None)
            .unwrap();

        project.hydrate_tasks(vec![mine.clone(), gone, foreign]);
        assert_eq!(project.tasks().len(), 1);
        assert_eq!(project.tasks()[0].id(), mine.id());
    }

    #[test]
    fn tasks_freeze_once_project_is_terminal() {
        let mut project = draft();
        assert!(project.ensure_tasks_editable().is_ok());

        project.cancel(None).unwrap();
        assert_eq!(
            project.ensure_tasks_editable().unwrap_err().to_string(),
            "Cannot change tasks of project in Cancelled state"
        );
    }
}
