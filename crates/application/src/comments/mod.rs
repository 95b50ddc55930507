//! Comment commands, queries and their handlers.

mod commands;
mod handlers;
mod queries;
mod validators;

use std::sync::Arc;

use domain::UnitOfWorkFactory;

pub use commands::{AddCommentCommand, DeleteCommentCommand, EditCommentCommand};
pub use handlers::CommentHandlers;
pub use queries::GetCommentsByTaskQuery;
pub use validators::CommentValidators;

use crate::mediator::Mediator;

/// Registers every comment handler and validator.
pub fn register(mediator: &mut Mediator, uow: Arc<dyn UnitOfWorkFactory>) {
    let handlers = CommentHandlers::new(uow);
    mediator
        .register_handler::<AddCommentCommand, _>(handlers.clone())
        .register_handler::<EditCommentCommand, _>(handlers.clone())
        .register_handler::<DeleteCommentCommand, _>(handlers.clone())
        .register_handler::<GetCommentsByTaskQuery, _>(handlers)
        .register_validator::<AddCommentCommand, _>(CommentValidators)
        .register_validator::<EditCommentCommand, _>(CommentValidators)
        .register_validator::<DeleteCommentCommand, _>(CommentValidators)
        .register_validator::<GetCommentsByTaskQuery, _>(CommentValidators);
}
