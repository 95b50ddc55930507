use std::collections::HashMap;
use std::sync::Arc;

use common::{CommentId, ProjectId, TaskId, UserId};
use domain::{Comment, Project, TaskItem, User};
use tokio::sync::RwLock;

/// Committed rows, keyed by aggregate id.
///
/// Stored aggregates never carry pending events, and projects are stored
/// without their task collection.
#[derive(Debug, Default)]
pub struct Tables {
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) projects: HashMap<ProjectId, Project>,
    pub(crate) tasks: HashMap<TaskId, TaskItem>,
    pub(crate) comments: HashMap<CommentId, Comment>,
}

/// Shared in-memory database.
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    /// Creates a new empty database.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn tables(&self) -> &RwLock<Tables> {
        &self.tables
    }

    /// Returns the number of committed users, deleted rows included.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn project_count(&self) -> usize {
        self.tables.read().await.projects.len()
    }

    pub async fn task_count(&self) -> usize {
        self.tables.read().await.tasks.len()
    }

    pub async fn comment_count(&self) -> usize {
        self.tables.read().await.comments.len()
    }

    /// Returns the committed row for a task regardless of soft deletion.
    pub async fn raw_task(&self, id: TaskId) -> Option<TaskItem> {
        self.tables.read().await.tasks.get(&id).cloned()
    }

    /// Returns the committed row for a user regardless of soft deletion.
    pub async fn raw_user(&self, id: UserId) -> Option<User> {
        self.tables.read().await.users.get(&id).cloned()
    }
}
