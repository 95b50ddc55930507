//! Core aggregate and domain event traits.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use common::Version;
use serde::Serialize;
use uuid::Uuid;

use crate::events::Event;

/// Trait for domain events.
///
/// Domain events describe a change that has just happened inside an
/// aggregate. They are immutable and named in past tense.
pub trait DomainEvent: Serialize + Debug + Clone + Send + Sync + Into<Event> + 'static {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Returns the identifier of the aggregate that raised the event.
    fn aggregate_id(&self) -> Uuid;

    /// Returns when the change happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Trait for aggregate roots.
///
/// An aggregate root is the single consistency boundary for its invariants.
/// Mutation happens only through the aggregate's named domain methods, each
/// of which records one event in the aggregate's pending queue. The queue is
/// drained by the unit of work after a successful commit.
pub trait AggregateRoot: Debug + Clone + Send + Sync + 'static {
    /// Identifier type of this aggregate.
    type Id: Copy + Eq + Hash + Ord + Display + Debug + Send + Sync + 'static;

    /// The events this aggregate raises.
    type Event: DomainEvent;

    /// Returns the aggregate type name, used in logs and errors.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's identifier.
    fn id(&self) -> Self::Id;

    /// Returns the persisted version this instance was loaded at.
    fn version(&self) -> Version;

    /// Sets the persisted version.
    ///
    /// Called by repositories after a successful commit.
    fn set_version(&mut self, version: Version);

    /// Returns true when the aggregate has been logically deleted.
    fn is_deleted(&self) -> bool;

    /// Returns the events raised since the last drain, oldest first.
    fn domain_events(&self) -> &[Self::Event];

    /// Discards all pending events.
    fn clear_domain_events(&mut self);

    /// Removes and returns all pending events.
    fn take_domain_events(&mut self) -> Vec<Self::Event> {
        let events = self.domain_events().to_vec();
        self.clear_domain_events();
        events
    }
}
