use common::{PagedResult, ProjectId, TaskId, UserId};
use domain::{Priority, TaskStatus};
use serde::{Deserialize, Serialize};

use crate::dto::TaskDto;
use crate::mediator::queries;
use crate::settings::first_page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTaskByIdQuery {
    pub task_id: TaskId,
}

/// Tasks ordered most urgent first, then oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTasksQuery {
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub assignee_id: Option<UserId>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub min_priority: Option<Priority>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl Default for GetTasksQuery {
    fn default() -> Self {
        Self {
            project_id: None,
            assignee_id: None,
            status: None,
            min_priority: None,
            page: first_page(),
            page_size: None,
        }
    }
}

queries! {
    GetTaskByIdQuery => TaskDto,
    GetTasksQuery => PagedResult<TaskDto>,
}
