use std::sync::Arc;

use async_trait::async_trait;
use common::{PagedResult, ProjectId};
use domain::{
    DomainError, Money, Project, ProjectFilter, ProjectStatus, UnitOfWorkFactory,
};
use tokio_util::sync::CancellationToken;

use crate::dto::ProjectDto;
use crate::error::ApplicationResult;
use crate::mediator::RequestHandler;
use crate::outcome::Outcome;
use crate::settings::ApplicationSettings;
use crate::try_outcome;

use super::commands::{
    ActivateProjectCommand, CancelProjectCommand, CompleteProjectCommand, CreateProjectCommand,
    DeleteProjectCommand, SetProjectBudgetCommand, UpdateProjectCommand,
};
use super::queries::{GetProjectByIdQuery, GetProjectsQuery};

/// Handles every project command and query.
#[derive(Clone)]
pub struct ProjectHandlers {
    uow: Arc<dyn UnitOfWorkFactory>,
    settings: ApplicationSettings,
}

impl ProjectHandlers {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>, settings: ApplicationSettings) -> Self {
        Self { uow, settings }
    }

    /// Loads a project with its tasks, applies `change` and commits.
    async fn modify(
        &self,
        project_id: ProjectId,
        cancel: &CancellationToken,
        change: impl FnOnce(&mut Project) -> Result<(), DomainError> + Send,
    ) -> ApplicationResult<Outcome<ProjectDto>> {
        let uow = self.uow.begin();
        let Some(mut project) = uow.projects().get_by_id(project_id, cancel).await? else {
            return Ok(Outcome::not_found("Project"));
        };
        try_outcome!(change(&mut project));

        let dto = ProjectDto::from(&project);
        uow.projects().update(project, cancel).await?;
        uow.save_changes(cancel).await?;
        Ok(Outcome::Success(dto))
    }
}

#[async_trait]
impl RequestHandler<CreateProjectCommand> for ProjectHandlers {
    #[tracing::instrument(name = "create_project", skip_all, fields(owner_id = %request.owner_id))]
    async fn handle(
        &self,
        request: CreateProjectCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<ProjectDto>> {
        let budget = match &request.budget {
            Some(input) => Some(try_outcome!(Money::new(input.amount, &input.currency))),
            None => None,
        };

        let uow = self.uow.begin();
        let Some(owner) = uow.users().get_by_id(request.owner_id, cancel).await? else {
            return Ok(Outcome::not_found("User"));
        };
        let project = try_outcome!(Project::create(
            &request.name,
            request.description.as_deref(),
            &owner,
            budget,
            request.start_date,
            request.end_date,
        ));

        let dto = ProjectDto::from(&project);
        uow.projects().add(project, cancel).await?;
        uow.save_changes(cancel).await?;

        tracing::info!(project_id = %dto.id, "project created");
        Ok(Outcome::Success(dto))
    }
}

#[async_trait]
impl RequestHandler<UpdateProjectCommand> for ProjectHandlers {
    #[tracing::instrument(name = "update_project", skip_all, fields(project_id = %request.project_id))]
    async fn handle(
        &self,
        request: UpdateProjectCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<ProjectDto>> {
        self.modify(request.project_id, cancel, |project| {
            project.update_details(&request.name, request.description.as_deref())?;
            if (project.start_date(), project.end_date()) != (request.start_date, request.end_date)
            {
                project.reschedule(request.start_date, request.end_date)?;
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl RequestHandler<SetProjectBudgetCommand> for ProjectHandlers {
    #[tracing::instrument(name = "set_project_budget", skip_all, fields(project_id = %request.project_id))]
    async fn handle(
        &self,
        request: SetProjectBudgetCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<ProjectDto>> {
        let budget = try_outcome!(Money::new(request.budget.amount, &request.budget.currency));
        self.modify(request.project_id, cancel, |project| project.set_budget(budget))
            .await
    }
}

#[async_trait]
impl RequestHandler<ActivateProjectCommand> for ProjectHandlers {
    #[tracing::instrument(name = "activate_project", skip_all, fields(project_id = %request.project_id))]
    async fn handle(
        &self,
        request: ActivateProjectCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<ProjectDto>> {
        self.modify(request.project_id, cancel, Project::activate).await
    }
}

#[async_trait]
impl RequestHandler<CompleteProjectCommand> for ProjectHandlers {
    #[tracing::instrument(name = "complete_project", skip_all, fields(project_id = %request.project_id))]
    async fn handle(
        &self,
        request: CompleteProjectCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<ProjectDto>> {
        self.modify(request.project_id, cancel, |project| {
            if project.status() == ProjectStatus::Draft {
                project.activate()?;
            }
            project.complete()
        })
        .await
    }
}

#[async_trait]
impl RequestHandler<CancelProjectCommand> for ProjectHandlers {
    #[tracing::instrument(name = "cancel_project", skip_all, fields(project_id = %request.project_id))]
    async fn handle(
        &self,
        request: CancelProjectCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<ProjectDto>> {
        self.modify(request.project_id, cancel, |project| {
            project.cancel(request.reason.as_deref())
        })
        .await
    }
}

#[async_trait]
impl RequestHandler<DeleteProjectCommand> for ProjectHandlers {
    #[tracing::instrument(name = "delete_project", skip_all, fields(project_id = %request.project_id))]
    async fn handle(
        &self,
        request: DeleteProjectCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome> {
        let uow = self.uow.begin();
        let Some(mut project) = uow.projects().get_by_id(request.project_id, cancel).await? else {
            return Ok(Outcome::not_found("Project"));
        };
        let tasks = try_outcome!(project.delete());
        let cascaded = tasks.len();

        uow.projects().delete(project, cancel).await?;
        for task in tasks {
            uow.tasks().delete(task, cancel).await?;
        }
        uow.save_changes(cancel).await?;

        tracing::info!(tasks = cascaded, "project deleted");
        Ok(Outcome::ok())
    }
}

#[async_trait]
impl RequestHandler<GetProjectByIdQuery> for ProjectHandlers {
    #[tracing::instrument(name = "get_project_by_id", skip_all, fields(project_id = %request.project_id))]
    async fn handle(
        &self,
        request: GetProjectByIdQuery,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<ProjectDto>> {
        let uow = self.uow.begin();
        Ok(match uow.projects().get_by_id(request.project_id, cancel).await? {
            Some(project) => Outcome::Success(ProjectDto::from(&project)),
            None => Outcome::not_found("Project"),
        })
    }
}

#[async_trait]
impl RequestHandler<GetProjectsQuery> for ProjectHandlers {
    #[tracing::instrument(name = "get_projects", skip_all)]
    async fn handle(
        &self,
        request: GetProjectsQuery,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<PagedResult<ProjectDto>>> {
        let filter = ProjectFilter {
            owner_id: request.owner_id,
            status: request.status,
        };
        let page = self.settings.page_request(request.page, request.page_size);
        let uow = self.uow.begin();
        let projects = uow.projects().search(&filter, page, cancel).await?;
        Ok(Outcome::Success(
            projects.map(|project| ProjectDto::from(&project)),
        ))
    }
}
