use std::sync::Arc;

use async_trait::async_trait;
use common::{PagedResult, TaskId};
use domain::{
    AggregateRoot, DomainError, TaskFilter, TaskItem, UnitOfWork, UnitOfWorkFactory,
};
use tokio_util::sync::CancellationToken;

use crate::dto::TaskDto;
use crate::error::ApplicationResult;
use crate::mediator::RequestHandler;
use crate::outcome::{Failure, Outcome};
use crate::settings::ApplicationSettings;
use crate::try_outcome;

use super::commands::{
    AssignTaskCommand, CompleteTaskCommand, CreateTaskCommand, DeleteTaskCommand,
    ReopenTaskCommand, StartTaskCommand, UnassignTaskCommand, UpdateTaskCommand,
};
use super::queries::{GetTaskByIdQuery, GetTasksQuery};

/// Handles every task command and query.
#[derive(Clone)]
pub struct TaskHandlers {
    uow: Arc<dyn UnitOfWorkFactory>,
    settings: ApplicationSettings,
}

impl TaskHandlers {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>, settings: ApplicationSettings) -> Self {
        Self { uow, settings }
    }

    /// Loads a task, applies `change` and commits.
    async fn modify(
        &self,
        task_id: TaskId,
        cancel: &CancellationToken,
        change: impl FnOnce(&mut TaskItem) -> Result<(), DomainError> + Send,
    ) -> ApplicationResult<Outcome<TaskDto>> {
        let uow = self.uow.begin();
        let Some(mut task) = uow.tasks().get_by_id(task_id, cancel).await? else {
            return Ok(Outcome::not_found("Task"));
        };
        try_outcome!(project_open(uow.as_ref(), &task, cancel).await?);
        try_outcome!(change(&mut task));

        let dto = TaskDto::from(&task);
        uow.tasks().update(task, cancel).await?;
        uow.save_changes(cancel).await?;
        Ok(Outcome::Success(dto))
    }
}

/// Tasks of a completed, cancelled or deleted project cannot change.
async fn project_open(
    uow: &dyn UnitOfWork,
    task: &TaskItem,
    cancel: &CancellationToken,
) -> ApplicationResult<Result<(), Failure>> {
    Ok(match uow.projects().get_by_id(task.project_id(), cancel).await? {
        Some(project) => project.ensure_tasks_editable().map_err(Failure::from),
        None => Err(Failure::not_found("Project")),
    })
}

#[async_trait]
impl RequestHandler<CreateTaskCommand> for TaskHandlers {
    #[tracing::instrument(name = "create_task", skip_all, fields(project_id = %request.project_id))]
    async fn handle(
        &self,
        request: CreateTaskCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<TaskDto>> {
        let uow = self.uow.begin();
        let Some(mut project) = uow.projects().get_by_id(request.project_id, cancel).await? else {
            return Ok(Outcome::not_found("Project"));
        };
        let mut task = try_outcome!(TaskItem::create(
            project.id(),
            &request.title,
            request.description.as_deref(),
            request.priority,
            request.due_date,
        ));
        if let Some(assignee_id) = request.assignee_id {
            let Some(assignee) = uow.users().get_by_id(assignee_id, cancel).await? else {
                return Ok(Outcome::not_found("User"));
            };
            try_outcome!(task.assign_to(&assignee));
        }
        try_outcome!(project.add_task(&task));

        let dto = TaskDto::from(&task);
        uow.projects().update(project, cancel).await?;
        uow.tasks().add(task, cancel).await?;
        uow.save_changes(cancel).await?;

        tracing::info!(task_id = %dto.id, "task created");
        Ok(Outcome::Success(dto))
    }
}

#[async_trait]
impl RequestHandler<UpdateTaskCommand> for TaskHandlers {
    #[tracing::instrument(name = "update_task", skip_all, fields(task_id = %request.task_id))]
    async fn handle(
        &self,
        request: UpdateTaskCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<TaskDto>> {
        self.modify(request.task_id, cancel, |task| {
            task.update_details(&request.title, request.description.as_deref())?;
            task.change_priority(request.priority)?;
            task.set_due_date(request.due_date)
        })
        .await
    }
}

#[async_trait]
impl RequestHandler<AssignTaskCommand> for TaskHandlers {
    #[tracing::instrument(name = "assign_task", skip_all, fields(task_id = %request.task_id))]
    async fn handle(
        &self,
        request: AssignTaskCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<TaskDto>> {
        let uow = self.uow.begin();
        let Some(mut task) = uow.tasks().get_by_id(request.task_id, cancel).await? else {
            return Ok(Outcome::not_found("Task"));
        };
        try_outcome!(project_open(uow.as_ref(), &task, cancel).await?);
        let Some(assignee) = uow.users().get_by_id(request.assignee_id, cancel).await? else {
            return Ok(Outcome::not_found("User"));
        };
        try_outcome!(task.assign_to(&assignee));

        let dto = TaskDto::from(&task);
        uow.tasks().update(task, cancel).await?;
        uow.save_changes(cancel).await?;
        Ok(Outcome::Success(dto))
    }
}

#[async_trait]
impl RequestHandler<UnassignTaskCommand> for TaskHandlers {
    #[tracing::instrument(name = "unassign_task", skip_all, fields(task_id = %request.task_id))]
    async fn handle(
        &self,
        request: UnassignTaskCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<TaskDto>> {
        self.modify(request.task_id, cancel, TaskItem::unassign).await
    }
}

#[async_trait]
impl RequestHandler<StartTaskCommand> for TaskHandlers {
    #[tracing::instrument(name = "start_task", skip_all, fields(task_id = %request.task_id))]
    async fn handle(
        &self,
        request: StartTaskCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<TaskDto>> {
        self.modify(request.task_id, cancel, TaskItem::start).await
    }
}

#[async_trait]
impl RequestHandler<CompleteTaskCommand> for TaskHandlers {
    #[tracing::instrument(name = "complete_task", skip_all, fields(task_id = %request.task_id))]
    async fn handle(
        &self,
        request: CompleteTaskCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<TaskDto>> {
        self.modify(request.task_id, cancel, TaskItem::complete).await
    }
}

#[async_trait]
impl RequestHandler<ReopenTaskCommand> for TaskHandlers {
    #[tracing::instrument(name = "reopen_task", skip_all, fields(task_id = %request.task_id))]
    async fn handle(
        &self,
        request: ReopenTaskCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<TaskDto>> {
        self.modify(request.task_id, cancel, TaskItem::reopen).await
    }
}

#[async_trait]
impl RequestHandler<DeleteTaskCommand> for TaskHandlers {
    #[tracing::instrument(name = "delete_task", skip_all, fields(task_id = %request.task_id))]
    async fn handle(
        &self,
        request: DeleteTaskCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome> {
        let uow = self.uow.begin();
        let Some(mut task) = uow.tasks().get_by_id(request.task_id, cancel).await? else {
            return Ok(Outcome::not_found("Task"));
        };
        try_outcome!(project_open(uow.as_ref(), &task, cancel).await?);
        try_outcome!(task.delete());
        uow.tasks().delete(task, cancel).await?;
        uow.save_changes(cancel).await?;
        Ok(Outcome::ok())
    }
}

#[async_trait]
impl RequestHandler<GetTaskByIdQuery> for TaskHandlers {
    #[tracing::instrument(name = "get_task_by_id", skip_all, fields(task_id = %request.task_id))]
    async fn handle(
        &self,
        request: GetTaskByIdQuery,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<TaskDto>> {
        let uow = self.uow.begin();
        Ok(match uow.tasks().get_by_id(request.task_id, cancel).await? {
            Some(task) => Outcome::Success(TaskDto::from(&task)),
            None => Outcome::not_found("Task"),
        })
    }
}

#[async_trait]
impl RequestHandler<GetTasksQuery> for TaskHandlers {
    #[tracing::instrument(name = "get_tasks", skip_all)]
    async fn handle(
        &self,
        request: GetTasksQuery,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<PagedResult<TaskDto>>> {
        let filter = TaskFilter {
            project_id: request.project_id,
            assignee_id: request.assignee_id,
            status: request.status,
            min_priority: request.min_priority,
        };
        let page = self.settings.page_request(request.page, request.page_size);
        let uow = self.uow.begin();
        let tasks = uow.tasks().search(&filter, page, cancel).await?;
        Ok(Outcome::Success(tasks.map(|task| TaskDto::from(&task))))
    }
}
