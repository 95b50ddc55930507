use chrono::NaiveDate;
use common::{ProjectId, UserId};
use serde::{Deserialize, Serialize};

use crate::dto::ProjectDto;
use crate::mediator::commands;

/// An amount in minor units and an ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyInput {
    pub amount: i64,
    pub currency: String,
}

/// Creates a draft project owned by an existing, active user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectCommand {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: UserId,
    #[serde(default)]
    pub budget: Option<MoneyInput>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Replaces the editable details and schedule of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProjectCommand {
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetProjectBudgetCommand {
    pub project_id: ProjectId,
    pub budget: MoneyInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateProjectCommand {
    pub project_id: ProjectId,
}

/// Completes a project. A draft project is activated first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteProjectCommand {
    pub project_id: ProjectId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelProjectCommand {
    pub project_id: ProjectId,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Soft-deletes a project together with its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProjectCommand {
    pub project_id: ProjectId,
}

commands! {
    CreateProjectCommand => ProjectDto,
    UpdateProjectCommand => ProjectDto,
    SetProjectBudgetCommand => ProjectDto,
    ActivateProjectCommand => ProjectDto,
    CompleteProjectCommand => ProjectDto,
    CancelProjectCommand => ProjectDto,
    DeleteProjectCommand => (),
}
