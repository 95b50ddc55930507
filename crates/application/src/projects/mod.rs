//! Project commands, queries and their handlers.

mod commands;
mod handlers;
mod queries;
mod validators;

use std::sync::Arc;

use domain::UnitOfWorkFactory;

pub use commands::{
    ActivateProjectCommand, CancelProjectCommand, CompleteProjectCommand, CreateProjectCommand,
    DeleteProjectCommand, MoneyInput, SetProjectBudgetCommand, UpdateProjectCommand,
};
pub use handlers::ProjectHandlers;
pub use queries::{GetProjectByIdQuery, GetProjectsQuery};
pub use validators::ProjectValidators;

use crate::mediator::Mediator;
use crate::settings::ApplicationSettings;

/// Registers every project handler and validator.
pub fn register(
    mediator: &mut Mediator,
    uow: Arc<dyn UnitOfWorkFactory>,
    settings: ApplicationSettings,
) {
    let handlers = ProjectHandlers::new(uow, settings);
    let validators = ProjectValidators::new(settings);
    mediator
        .register_handler::<CreateProjectCommand, _>(handlers.clone())
        .register_handler::<UpdateProjectCommand, _>(handlers.clone())
        .register_handler::<SetProjectBudgetCommand, _>(handlers.clone())
        .register_handler::<ActivateProjectCommand, _>(handlers.clone())
        .register_handler::<CompleteProjectCommand, _>(handlers.clone())
        .register_handler::<CancelProjectCommand, _>(handlers.clone())
        .register_handler::<DeleteProjectCommand, _>(handlers.clone())
        .register_handler::<GetProjectByIdQuery, _>(handlers.clone())
        .register_handler::<GetProjectsQuery, _>(handlers)
        .register_validator::<CreateProjectCommand, _>(validators)
        .register_validator::<UpdateProjectCommand, _>(validators)
        .register_validator::<SetProjectBudgetCommand, _>(validators)
        .register_validator::<ActivateProjectCommand, _>(validators)
        .register_validator::<CompleteProjectCommand, _>(validators)
        .register_validator::<CancelProjectCommand, _>(validators)
        .register_validator::<DeleteProjectCommand, _>(validators)
        .register_validator::<GetProjectByIdQuery, _>(validators)
        .register_validator::<GetProjectsQuery, _>(validators);
}
