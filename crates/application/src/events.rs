//! In-process dispatch of committed domain events.
//!
//! The unit of work hands every committed batch to an [`EventBus`], which
//! delivers each event to the handlers interested in it. Dispatch is
//! best-effort: a failing handler is logged and counted and never affects
//! the other handlers or the command that produced the event.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{
    CommentEvent, Event, EventPublisher, ProjectEvent, TaskEvent, UserEvent,
};
use futures_util::future::join_all;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Error reported by a [`DomainEventHandler`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EventHandlerError(pub String);

/// Reacts to committed domain events.
#[async_trait]
pub trait DomainEventHandler: Send + Sync {
    /// Returns the name of this handler.
    fn name(&self) -> &'static str;

    /// Returns true if this handler wants `event`. Defaults to every event.
    fn handles(&self, _event: &Event) -> bool {
        true
    }

    async fn handle(&self, event: &Event) -> Result<(), EventHandlerError>;
}

/// Fans committed events out to registered handlers.
///
/// Events are delivered one at a time in commit order; the handlers for a
/// single event run concurrently.
#[derive(Default, Clone)]
pub struct EventBus {
    handlers: Vec<Arc<dyn DomainEventHandler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler with this bus.
    pub fn register(&mut self, handler: Arc<dyn DomainEventHandler>) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    async fn dispatch(&self, event: &Event) {
        let interested: Vec<&Arc<dyn DomainEventHandler>> = self
            .handlers
            .iter()
            .filter(|handler| handler.handles(event))
            .collect();
        let results = join_all(interested.iter().map(|handler| handler.handle(event))).await;

        for (handler, result) in interested.iter().zip(results) {
            if let Err(err) = result {
                metrics::counter!("event_handler_failures_total", "handler" => handler.name())
                    .increment(1);
                tracing::warn!(
                    handler = handler.name(),
                    event_type = event.event_type(),
                    error = %err,
                    "event handler failed"
                );
            }
        }
        metrics::counter!("domain_events_dispatched_total").increment(1);
    }
}

#[async_trait]
impl EventPublisher for EventBus {
    #[tracing::instrument(skip_all, fields(events = events.len()))]
    async fn publish(&self, events: Vec<Event>) {
        for event in &events {
            self.dispatch(event).await;
        }
    }
}

/// Writes one structured log line per event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventHandler;

#[async_trait]
impl DomainEventHandler for LoggingEventHandler {
    fn name(&self) -> &'static str {
        "LoggingEventHandler"
    }

    async fn handle(&self, event: &Event) -> Result<(), EventHandlerError> {
        tracing::info!(
            event_type = event.event_type(),
            aggregate_type = event.aggregate_type(),
            aggregate_id = %event.aggregate_id(),
            occurred_at = %event.occurred_at(),
            "domain event"
        );
        Ok(())
    }
}

/// One line in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub event_type: &'static str,
    pub aggregate_type: &'static str,
    pub aggregate_id: Uuid,
    pub summary: String,
    pub occurred_at: DateTime<Utc>,
}

impl From<&Event> for ActivityEntry {
    fn from(event: &Event) -> Self {
        Self {
            event_type: event.event_type(),
            aggregate_type: event.aggregate_type(),
            aggregate_id: event.aggregate_id(),
            summary: summarize(event),
            occurred_at: event.occurred_at(),
        }
    }
}

fn summarize(event: &Event) -> String {
    match event {
        Event::User(UserEvent::Created { email, role, .. }) => {
            format!("{email} joined as {role}")
        }
        Event::User(UserEvent::RoleChanged { previous, role, .. }) => {
            format!("role changed from {previous} to {role}")
        }
        Event::Project(ProjectEvent::Created { name, .. }) => format!("project '{name}' created"),
        Event::Project(ProjectEvent::Completed { task_count, .. }) => {
            format!("project completed with {task_count} tasks")
        }
        Event::Project(ProjectEvent::Cancelled {
            reason: Some(reason),
            ..
        }) => format!("project cancelled: {reason}"),
        Event::Task(TaskEvent::Created { title, .. }) => format!("task '{title}' created"),
        Event::Task(TaskEvent::Assigned { assignee_id, .. }) => {
            format!("task assigned to {assignee_id}")
        }
        Event::Comment(CommentEvent::Added {
            parent_id: Some(_),
            ..
        }) => "reply added".to_string(),
        Event::Comment(CommentEvent::Added { .. }) => "comment added".to_string(),
        other => other.event_type().to_string(),
    }
}

struct FeedState {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

/// In-memory activity feed, newest entry first.
///
/// Holds at most `capacity` entries; the oldest are dropped.
#[derive(Clone)]
pub struct ActivityFeed {
    state: Arc<RwLock<FeedState>>,
}

impl ActivityFeed {
    pub const DEFAULT_CAPACITY: usize = 1000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(FeedState {
                entries: VecDeque::new(),
                capacity: capacity.max(1),
            })),
        }
    }

    /// Returns up to `limit` entries, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<ActivityEntry> {
        self.state
            .read()
            .await
            .entries
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Returns every entry for one aggregate, newest first.
    pub async fn for_aggregate(&self, aggregate_id: Uuid) -> Vec<ActivityEntry> {
        self.state
            .read()
            .await
            .entries
            .iter()
            .filter(|entry| entry.aggregate_id == aggregate_id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainEventHandler for ActivityFeed {
    fn name(&self) -> &'static str {
        "ActivityFeed"
    }

    async fn handle(&self, event: &Event) -> Result<(), EventHandlerError> {
        let mut state = self.state.write().await;
        state.entries.push_front(ActivityEntry::from(event));
        let capacity = state.capacity;
        state.entries.truncate(capacity);
        Ok(())
    }
}
