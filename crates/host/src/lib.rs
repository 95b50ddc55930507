//! Wiring for the task-management core.
//!
//! Builds the in-memory store, the event bus with its handlers and the
//! mediator, and runs a demo walkthrough of the main use cases.

pub mod config;
pub mod demo;
pub mod telemetry;

use std::sync::Arc;

use application::{
    ActivityFeed, ApplicationSettings, EventBus, LoggingEventHandler, Mediator, build_mediator,
};
use store::{InMemoryDatabase, InMemoryUnitOfWorkFactory};

/// Everything a caller needs to dispatch requests.
pub struct Services {
    pub mediator: Mediator,
    pub feed: ActivityFeed,
    pub database: InMemoryDatabase,
}

impl Services {
    /// Wires the store, event handlers and mediator together.
    pub fn new(settings: ApplicationSettings) -> Self {
        let database = InMemoryDatabase::new();
        let feed = ActivityFeed::new();

        let mut bus = EventBus::new();
        bus.register(Arc::new(LoggingEventHandler))
            .register(Arc::new(feed.clone()));
        tracing::debug!(handlers = bus.handler_count(), "event bus ready");

        let factory = InMemoryUnitOfWorkFactory::new(database.clone(), Arc::new(bus));
        let mediator = build_mediator(Arc::new(factory), settings);

        Self {
            mediator,
            feed,
            database,
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(ApplicationSettings::default())
    }
}
