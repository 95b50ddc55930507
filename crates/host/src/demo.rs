//! A scripted walkthrough: staff a project, work its tasks and close it.

use application::{
    AddCommentCommand, ApplicationError, AssignTaskCommand, CompleteProjectCommand,
    CompleteTaskCommand, CreateProjectCommand, CreateTaskCommand, CreateUserCommand, Failure,
    GetTasksQuery, MoneyInput, Outcome, ProjectDto, StartTaskCommand,
};
use chrono::{Duration, Utc};
use domain::{Priority, UserRole};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::Services;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A step was rejected by validation or a business rule.
    #[error("{step} rejected: {failure}")]
    Rejected {
        step: &'static str,
        failure: Failure,
    },
}

fn expect_success<T>(step: &'static str, outcome: Outcome<T>) -> Result<T, DemoError> {
    outcome
        .into_result()
        .map_err(|failure| DemoError::Rejected { step, failure })
}

/// Runs the walkthrough and returns the completed project.
pub async fn run(services: &Services, cancel: &CancellationToken) -> Result<ProjectDto, DemoError> {
    let mediator = &services.mediator;

    let manager = expect_success(
        "create manager",
        mediator
            .send(
                CreateUserCommand {
                    email: "grace@example.com".into(),
                    name: "Grace Hopper".into(),
                    role: UserRole::Manager,
                },
                cancel,
            )
            .await?,
    )?;
    let developer = expect_success(
        "create developer",
        mediator
            .send(
                CreateUserCommand {
                    email: "linus@example.com".into(),
                    name: "Linus".into(),
                    role: UserRole::Member,
                },
                cancel,
            )
            .await?,
    )?;

    let today = Utc::now().date_naive();
    let project = expect_success(
        "create project",
        mediator
            .send(
                CreateProjectCommand {
                    name: "Compiler rewrite".into(),
                    description: Some("Replace the legacy front end".into()),
                    owner_id: manager.id,
                    budget: Some(MoneyInput {
                        amount: 2_500_000,
                        currency: "USD".into(),
                    }),
                    start_date: today,
                    end_date: Some(today + Duration::days(90)),
                },
                cancel,
            )
            .await?,
    )?;
    tracing::info!(project_id = %project.id, name = %project.name, "project drafted");

    let mut task_ids = Vec::new();
    for (title, priority) in [
        ("Write the lexer", Priority::High),
        ("Port the parser", Priority::Critical),
    ] {
        let task = expect_success(
            "create task",
            mediator
                .send(
                    CreateTaskCommand {
                        project_id: project.id,
                        title: title.into(),
                        description: None,
                        priority,
                        due_date: Some(today + Duration::days(30)),
                        assignee_id: None,
                    },
                    cancel,
                )
                .await?,
        )?;
        task_ids.push(task.id);
    }

    for &task_id in &task_ids {
        expect_success(
            "assign task",
            mediator
                .send(
                    AssignTaskCommand {
                        task_id,
                        assignee_id: developer.id,
                    },
                    cancel,
                )
                .await?,
        )?;
        expect_success(
            "start task",
            mediator.send(StartTaskCommand { task_id }, cancel).await?,
        )?;
    }

    let backlog = expect_success(
        "list tasks",
        mediator
            .send(
                GetTasksQuery {
                    project_id: Some(project.id),
                    ..GetTasksQuery::default()
                },
                cancel,
            )
            .await?,
    )?;
    for task in &backlog.items {
        tracing::info!(title = %task.title, priority = %task.priority, status = %task.status, "task");
    }

    expect_success(
        "comment",
        mediator
            .send(
                AddCommentCommand {
                    task_id: task_ids[0],
                    author_id: manager.id,
                    content: "Ship it once the tests pass.".into(),
                    parent_id: None,
                },
                cancel,
            )
            .await?,
    )?;

    for &task_id in &task_ids {
        expect_success(
            "complete task",
            mediator.send(CompleteTaskCommand { task_id }, cancel).await?,
        )?;
    }

    let completed = expect_success(
        "complete project",
        mediator
            .send(
                CompleteProjectCommand {
                    project_id: project.id,
                },
                cancel,
            )
            .await?,
    )?;
    tracing::info!(
        project_id = %completed.id,
        status = %completed.status,
        tasks = completed.task_count,
        "project completed"
    );
    Ok(completed)
}
