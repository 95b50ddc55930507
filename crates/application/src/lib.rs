//! Application layer for the task-management core.
//!
//! Every use case is a plain-data command or query dispatched through the
//! [`Mediator`]. Validators run first and report every field error at once;
//! handlers then load aggregates through a fresh unit of work, call the
//! domain, commit and map the result into a DTO. Expected failures come back
//! as [`Outcome::Failure`]; only infrastructure problems are `Err`.

pub mod comments;
pub mod dto;
pub mod error;
pub mod events;
pub mod mediator;
pub mod outcome;
pub mod projects;
pub mod settings;
pub mod tasks;
pub mod users;
pub mod validation;

use std::sync::Arc;

use domain::UnitOfWorkFactory;

pub use comments::{
    AddCommentCommand, DeleteCommentCommand, EditCommentCommand, GetCommentsByTaskQuery,
};
pub use dto::{CommentDto, MoneyDto, ProjectDto, TaskDto, UserDto};
pub use error::{ApplicationError, ApplicationResult};
pub use events::{
    ActivityEntry, ActivityFeed, DomainEventHandler, EventBus, EventHandlerError,
    LoggingEventHandler,
};
pub use mediator::{Command, Mediator, Query, Request, RequestHandler, Validator};
pub use outcome::{Failure, FieldError, Outcome};
pub use projects::{
    ActivateProjectCommand, CancelProjectCommand, CompleteProjectCommand, CreateProjectCommand,
    DeleteProjectCommand, GetProjectByIdQuery, GetProjectsQuery, MoneyInput,
    SetProjectBudgetCommand, UpdateProjectCommand,
};
pub use settings::ApplicationSettings;
pub use tasks::{
    AssignTaskCommand, CompleteTaskCommand, CreateTaskCommand, DeleteTaskCommand,
    GetTaskByIdQuery, GetTasksQuery, ReopenTaskCommand, StartTaskCommand, UnassignTaskCommand,
    UpdateTaskCommand,
};
pub use users::{
    ActivateUserCommand, ChangeUserRoleCommand, CreateUserCommand, DeactivateUserCommand,
    DeleteUserCommand, GetUserByIdQuery, GetUsersQuery, RecordUserLoginCommand,
    UpdateUserProfileCommand,
};

/// Builds a mediator with every handler and validator registered.
pub fn build_mediator(
    uow: Arc<dyn UnitOfWorkFactory>,
    settings: ApplicationSettings,
) -> Mediator {
    let mut mediator = Mediator::new();
    users::register(&mut mediator, uow.clone(), settings);
    projects::register(&mut mediator, uow.clone(), settings);
    tasks::register(&mut mediator, uow.clone(), settings);
    comments::register(&mut mediator, uow);
    tracing::debug!(handlers = mediator.handler_count(), "mediator built");
    mediator
}
