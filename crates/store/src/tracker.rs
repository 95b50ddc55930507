//! Per-unit change tracking.

use domain::{AggregateRoot, Comment, Event, Project, TaskItem, User};
use uuid::Uuid;

/// Identity of a staged aggregate across types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    aggregate_type: &'static str,
    id: Uuid,
}

impl Key {
    pub(crate) fn new(aggregate_type: &'static str, id: Uuid) -> Self {
        Self { aggregate_type, id }
    }
}

/// How a staged aggregate is written on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Update,
    Delete,
}

/// A staged aggregate of any type.
#[derive(Debug, Clone)]
pub enum Record {
    User(User),
    Project(Project),
    Task(TaskItem),
    Comment(Comment),
}

impl Record {
    pub(crate) fn key(&self) -> Key {
        match self {
            Record::User(a) => Key::new(User::aggregate_type(), a.id().as_uuid()),
            Record::Project(a) => Key::new(Project::aggregate_type(), a.id().as_uuid()),
            Record::Task(a) => Key::new(TaskItem::aggregate_type(), a.id().as_uuid()),
            Record::Comment(a) => Key::new(Comment::aggregate_type(), a.id().as_uuid()),
        }
    }

    /// Removes the record's pending events, converted to the shared envelope.
    pub(crate) fn take_events(&mut self) -> Vec<Event> {
        fn drain<A: AggregateRoot>(aggregate: &mut A) -> Vec<Event> {
            aggregate
                .take_domain_events()
                .into_iter()
                .map(Into::into)
                .collect()
        }

        match self {
            Record::User(a) => drain(a),
            Record::Project(a) => drain(a),
            Record::Task(a) => drain(a),
            Record::Comment(a) => drain(a),
        }
    }

    pub(crate) fn pending_event_count(&self) -> usize {
        match self {
            Record::User(a) => a.domain_events().len(),
            Record::Project(a) => a.domain_events().len(),
            Record::Task(a) => a.domain_events().len(),
            Record::Comment(a) => a.domain_events().len(),
        }
    }
}

/// One staged change.
#[derive(Debug, Clone)]
pub struct Entry {
    pub operation: Operation,
    pub record: Record,
}

/// Ordered set of staged changes for one unit of work.
///
/// Each aggregate appears at most once. Restaging replaces the record in
/// place, so staging order is the order of first appearance.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    entries: Vec<Entry>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub(crate) fn find(&self, key: Key) -> Option<&Entry> {
        self.entries.iter().find(|e| e.record.key() == key)
    }

    /// Stages a change. An aggregate added in this unit stays an `Add`
    /// whatever happens to it afterwards.
    pub(crate) fn stage(&mut self, operation: Operation, record: Record) {
        let key = record.key();
        match self.entries.iter_mut().find(|e| e.record.key() == key) {
            Some(entry) => {
                if entry.operation != Operation::Add {
                    entry.operation = operation;
                }
                entry.record = record;
            }
            None => self.entries.push(Entry { operation, record }),
        }
    }

    /// Number of domain events waiting in staged aggregates.
    pub fn pending_event_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.record.pending_event_count())
            .sum()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::UserRole;

    fn user() -> User {
        User::create("ada@example.com", "Ada", UserRole::Member).unwrap()
    }

    #[test]
    fn stored_key_matches_record_key() {
        use crate::repository::Stored;

        let ada = user();
        let key = <User as Stored>::key(ada.id());
        let same_uuid = common::CommentId::from_uuid(ada.id().as_uuid());
        assert_eq!(Record::User(ada).key(), key);
        assert_ne!(key, <Comment as Stored>::key(same_uuid));
    }

    #[test]
    fn restaging_keeps_position_and_add_operation() {
        let mut tracker = ChangeTracker::new();
        let mut ada = user();
        tracker.stage(Operation::Add, Record::User(ada.clone()));
        tracker.stage(Operation::Add, Record::User(user()));

        ada.update_profile("Ada L.").unwrap();
        tracker.stage(Operation::Update, Record::User(ada.clone()));

        assert_eq!(tracker.len(), 2);
        let first = &tracker.entries()[0];
        assert_eq!(first.operation, Operation::Add);
        assert!(matches!(&first.record, Record::User(u) if u.name() == "Ada L."));
        assert_eq!(tracker.pending_event_count(), 3);
    }

    #[test]
    fn update_then_delete_becomes_delete() {
        let mut tracker = ChangeTracker::new();
        let mut ada = user();
        ada.clear_domain_events();
        tracker.stage(Operation::Update, Record::User(ada.clone()));
        ada.delete().unwrap();
        tracker.stage(Operation::Delete, Record::User(ada));

        assert_eq!(tracker.entries()[0].operation, Operation::Delete);
    }

    #[test]
    fn take_events_drains_record() {
        let mut record = Record::User(user());
        let events = record.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "UserCreated");
        assert_eq!(record.pending_event_count(), 0);
    }
}
