//! Data transfer objects returned by handlers.
//!
//! DTOs keep aggregates from leaking past the application layer. Every DTO is
//! built from a borrowed aggregate with `From`.

use chrono::{DateTime, NaiveDate, Utc};
use common::{CommentId, ProjectId, TaskId, UserId};
use domain::{
    AggregateRoot, Comment, Money, Priority, Project, ProjectStatus, TaskItem, TaskStatus, User,
    UserRole,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyDto {
    /// Amount in minor units.
    pub amount: i64,
    pub currency: String,
    pub formatted: String,
}

impl From<&Money> for MoneyDto {
    fn from(money: &Money) -> Self {
        Self {
            amount: money.amount(),
            currency: money.currency().as_str().to_string(),
            formatted: money.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            role: user.role(),
            is_active: user.is_active(),
            last_login_at: user.last_login_at(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: UserId,
    pub budget: Option<MoneyDto>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub task_count: usize,
    pub completed_task_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Project> for ProjectDto {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_string(),
            description: project.description().map(str::to_string),
            status: project.status(),
            owner_id: project.owner_id(),
            budget: project.budget().map(MoneyDto::from),
            start_date: project.start_date(),
            end_date: project.end_date(),
            task_count: project.tasks().len(),
            completed_task_count: project.completed_task_count(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee_id: Option<UserId>,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&TaskItem> for TaskDto {
    fn from(task: &TaskItem) -> Self {
        Self {
            id: task.id(),
            project_id: task.project_id(),
            title: task.title().to_string(),
            description: task.description().map(str::to_string),
            status: task.status(),
            priority: task.priority(),
            assignee_id: task.assignee_id(),
            due_date: task.due_date(),
            completed_at: task.completed_at(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: CommentId,
    pub task_id: TaskId,
    pub author_id: UserId,
    pub parent_id: Option<CommentId>,
    pub reply_ids: Vec<CommentId>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Comment> for CommentDto {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id(),
            task_id: comment.task_id(),
            author_id: comment.author_id(),
            parent_id: comment.parent_id(),
            reply_ids: comment.reply_ids().to_vec(),
            content: comment.content().to_string(),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
        }
    }
}
