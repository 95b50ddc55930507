//! Unit of work over the in-memory database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::UserId;
use domain::{
    AggregateRoot, Comment, CommentRepository, Event, EventPublisher, Project, ProjectRepository,
    RepositoryError, RepositoryResult, TaskItem, TaskRepository, UnitOfWork, UnitOfWorkFactory,
    User, UserRepository,
};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::database::{InMemoryDatabase, Tables};
use crate::repository::{InMemoryRepository, Stored};
use crate::tracker::{ChangeTracker, Entry, Operation, Record};

/// State shared by the repositories of one unit of work.
pub(crate) struct Session {
    pub(crate) database: InMemoryDatabase,
    pub(crate) tracker: Mutex<ChangeTracker>,
}

/// One transactional unit. Create a new one per command or query.
pub struct InMemoryUnitOfWork {
    session: Arc<Session>,
    publisher: Arc<dyn EventPublisher>,
    users: InMemoryRepository<User>,
    projects: InMemoryRepository<Project>,
    tasks: InMemoryRepository<TaskItem>,
    comments: InMemoryRepository<Comment>,
}

impl InMemoryUnitOfWork {
    pub fn new(database: InMemoryDatabase, publisher: Arc<dyn EventPublisher>) -> Self {
        let session = Arc::new(Session {
            database,
            tracker: Mutex::new(ChangeTracker::new()),
        });
        Self {
            users: InMemoryRepository::new(session.clone()),
            projects: InMemoryRepository::new(session.clone()),
            tasks: InMemoryRepository::new(session.clone()),
            comments: InMemoryRepository::new(session.clone()),
            session,
            publisher,
        }
    }

    /// Number of staged aggregates.
    pub async fn staged_count(&self) -> usize {
        self.session.tracker.lock().await.len()
    }

    /// Number of domain events waiting in staged aggregates.
    pub async fn pending_event_count(&self) -> usize {
        self.session.tracker.lock().await.pending_event_count()
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn projects(&self) -> &dyn ProjectRepository {
        &self.projects
    }

    fn tasks(&self) -> &dyn TaskRepository {
        &self.tasks
    }

    fn comments(&self) -> &dyn CommentRepository {
        &self.comments
    }

    #[tracing::instrument(skip_all)]
    async fn save_changes(&self, cancel: &CancellationToken) -> RepositoryResult<usize> {
        let mut tracker = self.session.tracker.lock().await;
        if cancel.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }
        if tracker.is_empty() {
            return Ok(0);
        }

        {
            let mut tables = self.session.database.tables().write().await;
            if cancel.is_cancelled() {
                return Err(RepositoryError::Cancelled);
            }
            for entry in tracker.entries() {
                check_entry(&tables, entry)?;
            }
            check_unique_emails(&tables, &tracker)?;
            for entry in tracker.entries() {
                apply_entry(&mut tables, entry);
            }
        }

        let written = tracker.len();
        let events: Vec<Event> = tracker
            .entries_mut()
            .iter_mut()
            .flat_map(|entry| entry.record.take_events())
            .collect();
        tracker.clear();
        drop(tracker);

        metrics::counter!("unit_of_work_commits_total").increment(1);
        tracing::info!(written, events = events.len(), "changes committed");

        if !events.is_empty() {
            self.publisher.publish(events).await;
        }
        Ok(written)
    }
}

fn check_entry(tables: &Tables, entry: &Entry) -> RepositoryResult<()> {
    match &entry.record {
        Record::User(a) => check(tables, entry.operation, a),
        Record::Project(a) => check(tables, entry.operation, a),
        Record::Task(a) => check(tables, entry.operation, a),
        Record::Comment(a) => check(tables, entry.operation, a),
    }
}

fn check<A: Stored>(tables: &Tables, operation: Operation, aggregate: &A) -> RepositoryResult<()> {
    let id = aggregate.id();
    match (operation, A::table(tables).get(&id)) {
        (Operation::Add, Some(_)) => Err(RepositoryError::Duplicate {
            aggregate_type: A::aggregate_type(),
            id: id.to_string(),
        }),
        (Operation::Add, None) => Ok(()),
        (_, None) => Err(RepositoryError::Missing {
            aggregate_type: A::aggregate_type(),
            id: id.to_string(),
        }),
        (_, Some(row)) if row.version() != aggregate.version() => {
            Err(RepositoryError::ConcurrencyConflict {
                aggregate_type: A::aggregate_type(),
                id: id.to_string(),
                expected: aggregate.version(),
                actual: row.version(),
            })
        }
        _ => Ok(()),
    }
}

/// Live users must have distinct emails once the staged changes are applied.
fn check_unique_emails(tables: &Tables, tracker: &ChangeTracker) -> RepositoryResult<()> {
    let staged: HashMap<UserId, &User> = tracker
        .entries()
        .iter()
        .filter_map(|entry| User::from_record(&entry.record))
        .map(|user| (user.id(), user))
        .collect();

    let mut owners: HashMap<&str, UserId> = HashMap::new();
    let committed = tables
        .users
        .values()
        .filter(|user| !staged.contains_key(&user.id()));
    for user in committed.chain(staged.values().copied()) {
        if user.is_deleted() {
            continue;
        }
        if let Some(other) = owners.insert(user.email().as_str(), user.id())
            && other != user.id()
        {
            return Err(RepositoryError::UniqueViolation(format!(
                "email '{}' is already in use",
                user.email()
            )));
        }
    }
    Ok(())
}

fn apply_entry(tables: &mut Tables, entry: &Entry) {
    match &entry.record {
        Record::User(a) => apply(tables, a),
        Record::Project(a) => apply(tables, a),
        Record::Task(a) => apply(tables, a),
        Record::Comment(a) => apply(tables, a),
    }
}

fn apply<A: Stored>(tables: &mut Tables, aggregate: &A) {
    let mut row = aggregate.to_row();
    row.set_version(aggregate.version().next());
    A::table_mut(tables).insert(row.id(), row);
}

/// Hands out units of work bound to one database and publisher.
#[derive(Clone)]
pub struct InMemoryUnitOfWorkFactory {
    database: InMemoryDatabase,
    publisher: Arc<dyn EventPublisher>,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new(database: InMemoryDatabase, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            database,
            publisher,
        }
    }

    pub fn database(&self) -> &InMemoryDatabase {
        &self.database
    }
}

impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(InMemoryUnitOfWork::new(
            self.database.clone(),
            self.publisher.clone(),
        ))
    }
}
