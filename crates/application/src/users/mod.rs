//! User commands, queries and their handlers.

mod commands;
mod handlers;
mod queries;
mod validators;

use std::sync::Arc;

use domain::UnitOfWorkFactory;

pub use commands::{
    ActivateUserCommand, ChangeUserRoleCommand, CreateUserCommand, DeactivateUserCommand,
    DeleteUserCommand, RecordUserLoginCommand, UpdateUserProfileCommand,
};
pub use handlers::UserHandlers;
pub use queries::{GetUserByIdQuery, GetUsersQuery};
pub use validators::UserValidators;

use crate::mediator::Mediator;
use crate::settings::ApplicationSettings;

/// Registers every user handler and validator.
pub fn register(
    mediator: &mut Mediator,
    uow: Arc<dyn UnitOfWorkFactory>,
    settings: ApplicationSettings,
) {
    let handlers = UserHandlers::new(uow, settings);
    let validators = UserValidators::new(settings);
    mediator
        .register_handler::<CreateUserCommand, _>(handlers.clone())
        .register_handler::<UpdateUserProfileCommand, _>(handlers.clone())
        .register_handler::<ChangeUserRoleCommand, _>(handlers.clone())
        .register_handler::<DeactivateUserCommand, _>(handlers.clone())
        .register_handler::<ActivateUserCommand, _>(handlers.clone())
        .register_handler::<RecordUserLoginCommand, _>(handlers.clone())
        .register_handler::<DeleteUserCommand, _>(handlers.clone())
        .register_handler::<GetUserByIdQuery, _>(handlers.clone())
        .register_handler::<GetUsersQuery, _>(handlers)
        .register_validator::<CreateUserCommand, _>(validators)
        .register_validator::<UpdateUserProfileCommand, _>(validators)
        .register_validator::<ChangeUserRoleCommand, _>(validators)
        .register_validator::<DeactivateUserCommand, _>(validators)
        .register_validator::<ActivateUserCommand, _>(validators)
        .register_validator::<RecordUserLoginCommand, _>(validators)
        .register_validator::<DeleteUserCommand, _>(validators)
        .register_validator::<GetUserByIdQuery, _>(validators)
        .register_validator::<GetUsersQuery, _>(validators);
}
