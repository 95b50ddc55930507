//! Unified domain event type and the dispatch contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainEvent;
use crate::comment::CommentEvent;
use crate::project::ProjectEvent;
use crate::task::TaskEvent;
use crate::user::UserEvent;

/// Any event raised by any aggregate.
///
/// The unit of work converts each aggregate's own event type into this enum
/// when it drains pending events, so that dispatch has a single input type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "aggregate", content = "event")]
pub enum Event {
    User(UserEvent),
    Project(ProjectEvent),
    Task(TaskEvent),
    Comment(CommentEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::User(e) => e.event_type(),
            Event::Project(e) => e.event_type(),
            Event::Task(e) => e.event_type(),
            Event::Comment(e) => e.event_type(),
        }
    }

    pub fn aggregate_type(&self) -> &'static str {
        match self {
            Event::User(_) => "User",
            Event::Project(_) => "Project",
            Event::Task(_) => "Task",
            Event::Comment(_) => "Comment",
        }
    }

    pub fn aggregate_id(&self) -> Uuid {
        match self {
            Event::User(e) => e.aggregate_id(),
            Event::Project(e) => e.aggregate_id(),
            Event::Task(e) => e.aggregate_id(),
            Event::Comment(e) => e.aggregate_id(),
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Event::User(e) => e.occurred_at(),
            Event::Project(e) => e.occurred_at(),
            Event::Task(e) => e.occurred_at(),
            Event::Comment(e) => e.occurred_at(),
        }
    }
}

impl From<UserEvent> for Event {
    fn from(event: UserEvent) -> Self {
        Event::User(event)
    }
}

impl From<ProjectEvent> for Event {
    fn from(event: ProjectEvent) -> Self {
        Event::Project(event)
    }
}

impl From<TaskEvent> for Event {
    fn from(event: TaskEvent) -> Self {
        Event::Task(event)
    }
}

impl From<CommentEvent> for Event {
    fn from(event: CommentEvent) -> Self {
        Event::Comment(event)
    }
}

/// Receives events after the unit of work has committed.
///
/// Delivery is in-process and best-effort: implementations must not fail the
/// commit that produced the events, so `publish` has no error channel.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Takes ownership of a batch of committed events, in the order raised.
    async fn publish(&self, events: Vec<Event>);
}

/// Publisher that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPublisher;

#[async_trait]
impl EventPublisher for NullPublisher {
    async fn publish(&self, _events: Vec<Event>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AggregateRoot;
    use crate::user::{User, UserRole};

    #[test]
    fn event_wraps_aggregate_events() {
        let mut user = User::create("linus@example.com", "Linus", UserRole::Admin).unwrap();
        let event: Event = user.take_domain_events().remove(0).into();

        assert_eq!(event.aggregate_type(), "User");
        assert_eq!(event.event_type(), "UserCreated");
        assert_eq!(event.aggregate_id(), user.id().as_uuid());
    }

    #[test]
    fn event_serializes_with_aggregate_tag() {
        let mut user = User::create("linus@example.com", "Linus", UserRole::Admin).unwrap();
        let event: Event = user.take_domain_events().remove(0).into();

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["aggregate"], "User");
        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
