//! In-memory persistence for the domain aggregates.
//!
//! [`InMemoryDatabase`] holds committed state shared across units of work.
//! Each [`InMemoryUnitOfWork`] stages changes privately and applies them
//! atomically on `save_changes`, publishing the drained domain events only
//! after the commit succeeds.

pub mod database;
pub mod repository;
pub mod tracker;
pub mod unit_of_work;

pub use database::InMemoryDatabase;
pub use repository::{InMemoryRepository, Stored};
pub use unit_of_work::{InMemoryUnitOfWork, InMemoryUnitOfWorkFactory};
