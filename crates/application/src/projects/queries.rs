use common::{PagedResult, ProjectId, UserId};
use domain::ProjectStatus;
use serde::{Deserialize, Serialize};

use crate::dto::ProjectDto;
use crate::mediator::queries;
use crate::settings::first_page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProjectByIdQuery {
    pub project_id: ProjectId,
}

/// Projects in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProjectsQuery {
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl Default for GetProjectsQuery {
    fn default() -> Self {
        Self {
            owner_id: None,
            status: None,
            page: first_page(),
            page_size: None,
        }
    }
}

queries! {
    GetProjectByIdQuery => ProjectDto,
    GetProjectsQuery => PagedResult<ProjectDto>,
}
