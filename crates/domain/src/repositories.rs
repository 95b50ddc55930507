//! Persistence contracts for aggregates.
//!
//! The domain defines only the traits; adapters live in infrastructure
//! crates. Every call takes a [`CancellationToken`] so that a cancelled
//! request stops before touching shared state.

use async_trait::async_trait;
use common::{PageRequest, PagedResult, ProjectId, TaskId, UserId, Version};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::aggregate::AggregateRoot;
use crate::comment::Comment;
use crate::project::{Project, ProjectStatus};
use crate::task::{TaskItem, TaskStatus};
use crate::user::{User, UserRole};
use crate::value_objects::{Email, Priority};

/// Infrastructure errors raised by repositories and units of work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Operation cancelled")]
    Cancelled,

    /// The stored aggregate changed since it was loaded.
    #[error(
        "Concurrency conflict for {aggregate_type} {id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        aggregate_type: &'static str,
        id: String,
        expected: Version,
        actual: Version,
    },

    #[error("{aggregate_type} {id} already exists")]
    Duplicate {
        aggregate_type: &'static str,
        id: String,
    },

    #[error("{aggregate_type} {id} does not exist")]
    Missing {
        aggregate_type: &'static str,
        id: String,
    },

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// `delete` was called on an aggregate its domain method has not deleted.
    #[error("{aggregate_type} {id} must be deleted through its domain method first")]
    NotSoftDeleted {
        aggregate_type: &'static str,
        id: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Operations shared by every aggregate repository.
///
/// Writes are staged in the owning unit of work and become visible to other
/// units only after [`UnitOfWork::save_changes`] succeeds. Reads never return
/// soft-deleted aggregates.
#[async_trait]
pub trait Repository<A: AggregateRoot>: Send + Sync {
    /// Loads a fully hydrated aggregate, or `None` if it does not exist or is deleted.
    async fn get_by_id(&self, id: A::Id, cancel: &CancellationToken) -> RepositoryResult<Option<A>>;

    /// Stages a new aggregate.
    async fn add(&self, aggregate: A, cancel: &CancellationToken) -> RepositoryResult<()>;

    /// Stages changes to a loaded aggregate.
    async fn update(&self, aggregate: A, cancel: &CancellationToken) -> RepositoryResult<()>;

    /// Stages a soft delete. The aggregate must already be marked deleted.
    async fn delete(&self, aggregate: A, cancel: &CancellationToken) -> RepositoryResult<()>;
}

/// Filter for user searches. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    /// Case-insensitive substring of the name or email.
    pub search: Option<String>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        self.role.is_none_or(|role| user.role() == role)
            && self.is_active.is_none_or(|active| user.is_active() == active)
            && self.search.as_deref().is_none_or(|term| {
                let term = term.trim().to_lowercase();
                user.name().to_lowercase().contains(&term) || user.email().as_str().contains(&term)
            })
    }
}

#[async_trait]
pub trait UserRepository: Repository<User> {
    async fn get_by_email(
        &self,
        email: &Email,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<User>>;

    async fn exists_by_email(
        &self,
        email: &Email,
        cancel: &CancellationToken,
    ) -> RepositoryResult<bool> {
        Ok(self.get_by_email(email, cancel).await?.is_some())
    }

    /// Returns matching users ordered by name.
    async fn search(
        &self,
        filter: &UserFilter,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> RepositoryResult<PagedResult<User>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub owner_id: Option<UserId>,
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.owner_id.is_none_or(|owner| project.owner_id() == owner)
            && self.status.is_none_or(|status| project.status() == status)
    }
}

#[async_trait]
pub trait ProjectRepository: Repository<Project> {
    /// Returns matching projects ordered by creation time, tasks attached.
    async fn search(
        &self,
        filter: &ProjectFilter,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> RepositoryResult<PagedResult<Project>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub project_id: Option<ProjectId>,
    pub assignee_id: Option<UserId>,
    pub status: Option<TaskStatus>,
    /// Only tasks at or above this priority.
    pub min_priority: Option<Priority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &TaskItem) -> bool {
        self.project_id.is_none_or(|id| task.project_id() == id)
            && self.assignee_id.is_none_or(|id| task.assignee_id() == Some(id))
            && self.status.is_none_or(|status| task.status() == status)
            && self.min_priority.is_none_or(|min| task.priority() >= min)
    }
}

#[async_trait]
pub trait TaskRepository: Repository<TaskItem> {
    async fn list_by_project(
        &self,
        project_id: ProjectId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<TaskItem>>;

    /// Returns matching tasks, most urgent first, then oldest first.
    async fn search(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> RepositoryResult<PagedResult<TaskItem>>;
}

#[async_trait]
pub trait CommentRepository: Repository<Comment> {
    /// Returns the task's comments in creation order.
    async fn list_by_task(
        &self,
        task_id: TaskId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Comment>>;
}

/// Transactional boundary over the aggregate repositories.
///
/// `save_changes` persists every staged change atomically. Only after that
/// succeeds are the pending events of every staged aggregate drained,
/// published in staging order, and cleared. When it fails nothing is
/// persisted or published and staged aggregates keep their events.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> &dyn UserRepository;

    fn projects(&self) -> &dyn ProjectRepository;

    fn tasks(&self) -> &dyn TaskRepository;

    fn comments(&self) -> &dyn CommentRepository;

    /// Commits staged changes and returns how many aggregates were written.
    async fn save_changes(&self, cancel: &CancellationToken) -> RepositoryResult<usize>;
}

/// Opens a fresh unit of work per command or query.
pub trait UnitOfWorkFactory: Send + Sync {
    fn begin(&self) -> Box<dyn UnitOfWork>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, name: &str, role: UserRole) -> User {
        User::create(email, name, role).unwrap()
    }

    #[test]
    fn empty_user_filter_matches_everything() {
        assert!(UserFilter::default().matches(&user("a@b.io", "A", UserRole::Guest)));
    }

    #[test]
    fn user_filter_combines_criteria() {
        let mut ada = user("ada@example.com", "Ada Lovelace", UserRole::Admin);
        let filter = UserFilter {
            role: Some(UserRole::Admin),
            is_active: Some(true),
            search: Some("LOVE".into()),
        };
        assert!(filter.matches(&ada));

        ada.deactivate().unwrap();
        assert!(!filter.matches(&ada));
    }

    #[test]
    fn user_filter_searches_email() {
        let bob = user("bob@builders.org", "Bob", UserRole::Member);
        let filter = UserFilter {
            search: Some("builders".into()),
            ..Default::default()
        };
        assert!(filter.matches(&bob));
    }

    #[test]
    fn task_filter_min_priority() {
        let task =
            TaskItem::create(ProjectId::new(), "Fix", None, Priority::High, None).unwrap();
        let mut filter = TaskFilter {
            min_priority: Some(Priority::Medium),
            ..Default::default()
        };
        assert!(filter.matches(&task));
        filter.min_priority = Some(Priority::Critical);
        assert!(!filter.matches(&task));
    }

    #[test]
    fn task_filter_assignee_excludes_unassigned() {
        let task = TaskItem::create(ProjectId::new(), "Fix", None, Priority::Low, None).unwrap();
        let filter = TaskFilter {
            assignee_id: Some(UserId::new()),
            ..Default::default()
        };
        assert!(!filter.matches(&task));
    }
}
