use chrono::NaiveDate;
use common::{ProjectId, TaskId, UserId};
use domain::Priority;
use serde::{Deserialize, Serialize};

use crate::dto::TaskDto;
use crate::mediator::commands;

/// Creates a task in a project, optionally assigning it straight away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskCommand {
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignee_id: Option<UserId>,
}

/// Replaces the editable fields of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskCommand {
    pub task_id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignTaskCommand {
    pub task_id: TaskId,
    pub assignee_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignTaskCommand {
    pub task_id: TaskId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartTaskCommand {
    pub task_id: TaskId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteTaskCommand {
    pub task_id: TaskId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReopenTaskCommand {
    pub task_id: TaskId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskCommand {
    pub task_id: TaskId,
}

commands! {
    CreateTaskCommand => TaskDto,
    UpdateTaskCommand => TaskDto,
    AssignTaskCommand => TaskDto,
    UnassignTaskCommand => TaskDto,
    StartTaskCommand => TaskDto,
    CompleteTaskCommand => TaskDto,
    ReopenTaskCommand => TaskDto,
    DeleteTaskCommand => (),
}
