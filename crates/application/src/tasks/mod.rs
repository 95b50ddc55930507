//! Task commands, queries and their handlers.

mod commands;
mod handlers;
mod queries;
mod validators;

use std::sync::Arc;

use domain::UnitOfWorkFactory;

pub use commands::{
    AssignTaskCommand, CompleteTaskCommand, CreateTaskCommand, DeleteTaskCommand,
    ReopenTaskCommand, StartTaskCommand, UnassignTaskCommand, UpdateTaskCommand,
};
pub use handlers::TaskHandlers;
pub use queries::{GetTaskByIdQuery, GetTasksQuery};
pub use validators::TaskValidators;

use crate::mediator::Mediator;
use crate::settings::ApplicationSettings;

/// Registers every task handler and validator.
pub fn register(
    mediator: &mut Mediator,
    uow: Arc<dyn UnitOfWorkFactory>,
    settings: ApplicationSettings,
) {
    let handlers = TaskHandlers::new(uow, settings);
    let validators = TaskValidators::new(settings);
    mediator
        .register_handler::<CreateTaskCommand, _>(handlers.clone())
        .register_handler::<UpdateTaskCommand, _>(handlers.clone())
        .register_handler::<AssignTaskCommand, _>(handlers.clone())
        .register_handler::<UnassignTaskCommand, _>(handlers.clone())
        .register_handler::<StartTaskCommand, _>(handlers.clone())
        .register_handler::<CompleteTaskCommand, _>(handlers.clone())
        .register_handler::<ReopenTaskCommand, _>(handlers.clone())
        .register_handler::<DeleteTaskCommand, _>(handlers.clone())
        .register_handler::<GetTaskByIdQuery, _>(handlers.clone())
        .register_handler::<GetTasksQuery, _>(handlers)
        .register_validator::<CreateTaskCommand, _>(validators)
        .register_validator::<UpdateTaskCommand, _>(validators)
        .register_validator::<AssignTaskCommand, _>(validators)
        .register_validator::<UnassignTaskCommand, _>(validators)
        .register_validator::<StartTaskCommand, _>(validators)
        .register_validator::<CompleteTaskCommand, _>(validators)
        .register_validator::<ReopenTaskCommand, _>(validators)
        .register_validator::<DeleteTaskCommand, _>(validators)
        .register_validator::<GetTaskByIdQuery, _>(validators)
        .register_validator::<GetTasksQuery, _>(validators);
}
