//! Domain layer for the task-management core.
//!
//! This crate provides:
//! - Value objects (`Email`, `Money`, `Priority`) that validate on construction
//! - Aggregates (`User`, `Project`, `TaskItem`, `Comment`) with state machines
//!   that record domain events as they change
//! - Repository and unit-of-work contracts implemented by infrastructure

pub mod aggregate;
pub mod comment;
pub mod error;
pub mod events;
pub mod project;
pub mod repositories;
pub mod task;
pub mod user;
pub mod value_objects;

pub use aggregate::{AggregateRoot, DomainEvent};
pub use comment::{Comment, CommentEvent};
pub use error::DomainError;
pub use events::{Event, EventPublisher, NullPublisher};
pub use project::{Project, ProjectEvent, ProjectStatus};
pub use repositories::{
    CommentRepository, ProjectFilter, ProjectRepository, Repository, RepositoryError,
    RepositoryResult, TaskFilter, TaskRepository, UnitOfWork, UnitOfWorkFactory, UserFilter,
    UserRepository,
};
pub use task::{TaskEvent, TaskItem, TaskStatus};
pub use user::{User, UserEvent, UserRole};
pub use value_objects::{Currency, Email, Money, Priority, ValueError};
