//! Repositories over a unit of work's staged changes and the committed tables.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use common::{PageRequest, PagedResult, ProjectId, TaskId};
use domain::{
    AggregateRoot, Comment, CommentRepository, Email, Project, ProjectFilter, ProjectRepository,
    Repository, RepositoryError, RepositoryResult, TaskFilter, TaskItem, TaskRepository, User,
    UserFilter, UserRepository,
};
use tokio_util::sync::CancellationToken;

use crate::database::Tables;
use crate::tracker::{ChangeTracker, Key, Operation, Record};
use crate::unit_of_work::Session;

/// An aggregate the in-memory store knows how to keep.
pub trait Stored: AggregateRoot {
    fn table(tables: &Tables) -> &HashMap<Self::Id, Self>;

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Self::Id, Self>;

    fn into_record(self) -> Record;

    fn from_record(record: &Record) -> Option<&Self>;

    fn key(id: Self::Id) -> Key;

    /// Attaches child aggregates after loading. No-op by default.
    fn hydrate(&mut self, _view: &View<'_>) {}

    /// Returns the copy kept in the committed table.
    fn to_row(&self) -> Self {
        let mut row = self.clone();
        row.clear_domain_events();
        row
    }
}

macro_rules! stored {
    (@hooks Project) => {
        fn hydrate(&mut self, view: &View<'_>) {
            let id = self.id();
            self.hydrate_tasks(
                view.all::<TaskItem>()
                    .into_iter()
                    .filter(|task| task.project_id() == id),
            );
        }

        fn to_row(&self) -> Self {
            let mut row = self.clone();
            row.clear_domain_events();
            row.hydrate_tasks(std::iter::empty());
            row
        }
    };
    (@hooks $variant:ident) => {};
    ($aggregate:ty, $table:ident, $variant:ident) => {
        impl Stored for $aggregate {
            fn table(tables: &Tables) -> &HashMap<Self::Id, Self> {
                &tables.$table
            }

            fn table_mut(tables: &mut Tables) -> &mut HashMap<Self::Id, Self> {
                &mut tables.$table
            }

            fn into_record(self) -> Record {
                Record::$variant(self)
            }

            fn from_record(record: &Record) -> Option<&Self> {
                match record {
                    Record::$variant(a) => Some(a),
                    _ => None,
                }
            }

            fn key(id: Self::Id) -> Key {
                Key::new(<$aggregate>::aggregate_type(), id.as_uuid())
            }

            stored!(@hooks $variant);
        }
    };
}

stored!(User, users, User);
stored!(Project, projects, Project);
stored!(TaskItem, tasks, Task);
stored!(Comment, comments, Comment);

/// Read view that overlays a unit's staged changes on the committed tables.
///
/// Soft-deleted aggregates are invisible through the view.
pub struct View<'a> {
    tables: &'a Tables,
    tracker: &'a ChangeTracker,
}

impl<'a> View<'a> {
    pub(crate) fn new(tables: &'a Tables, tracker: &'a ChangeTracker) -> Self {
        Self { tables, tracker }
    }

    /// Returns the current, hydrated aggregate with the given id.
    pub fn get<A: Stored>(&self, id: A::Id) -> Option<A> {
        let staged = self
            .tracker
            .find(A::key(id))
            .and_then(|entry| A::from_record(&entry.record));
        let mut aggregate = staged
            .or_else(|| A::table(self.tables).get(&id))
            .filter(|a| !a.is_deleted())
            .cloned()?;
        aggregate.hydrate(self);
        Some(aggregate)
    }

    /// Returns every visible aggregate of a type, unordered and not hydrated.
    pub fn all<A: Stored>(&self) -> Vec<A> {
        let mut rows: HashMap<A::Id, &A> = A::table(self.tables)
            .iter()
            .map(|(id, a)| (*id, a))
            .collect();
        for entry in self.tracker.entries() {
            if let Some(a) = A::from_record(&entry.record) {
                rows.insert(a.id(), a);
            }
        }
        rows.into_values()
            .filter(|a| !a.is_deleted())
            .cloned()
            .collect()
    }

    /// Like [`View::all`] but hydrated.
    pub fn all_hydrated<A: Stored>(&self) -> Vec<A> {
        let mut all = self.all::<A>();
        for aggregate in &mut all {
            aggregate.hydrate(self);
        }
        all
    }
}

/// Repository for one aggregate type inside a unit of work.
pub struct InMemoryRepository<A> {
    session: Arc<Session>,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A: Stored> InMemoryRepository<A> {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            _aggregate: PhantomData,
        }
    }

    async fn read<T>(
        &self,
        cancel: &CancellationToken,
        f: impl FnOnce(&View<'_>) -> T,
    ) -> RepositoryResult<T> {
        ensure_active(cancel)?;
        let tracker = self.session.tracker.lock().await;
        let tables = self.session.database.tables().read().await;
        Ok(f(&View::new(&tables, &tracker)))
    }

    async fn stage(
        &self,
        operation: Operation,
        aggregate: A,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        ensure_active(cancel)?;
        let mut tracker = self.session.tracker.lock().await;
        if operation == Operation::Add {
            let exists = tracker.find(A::key(aggregate.id())).is_some()
                || A::table(&*self.session.database.tables().read().await)
                    .contains_key(&aggregate.id());
            if exists {
                return Err(RepositoryError::Duplicate {
                    aggregate_type: A::aggregate_type(),
                    id: aggregate.id().to_string(),
                });
            }
        }
        tracing::debug!(
            aggregate_type = A::aggregate_type(),
            id = %aggregate.id(),
            ?operation,
            "staged"
        );
        tracker.stage(operation, aggregate.into_record());
        Ok(())
    }
}

fn ensure_active(cancel: &CancellationToken) -> RepositoryResult<()> {
    if cancel.is_cancelled() {
        return Err(RepositoryError::Cancelled);
    }
    Ok(())
}

#[async_trait]
impl<A: Stored> Repository<A> for InMemoryRepository<A> {
    async fn get_by_id(&self, id: A::Id, cancel: &CancellationToken) -> RepositoryResult<Option<A>> {
        self.read(cancel, |view| view.get::<A>(id)).await
    }

    async fn add(&self, aggregate: A, cancel: &CancellationToken) -> RepositoryResult<()> {
        self.stage(Operation::Add, aggregate, cancel).await
    }

    async fn update(&self, aggregate: A, cancel: &CancellationToken) -> RepositoryResult<()> {
        self.stage(Operation::Update, aggregate, cancel).await
    }

    async fn delete(&self, aggregate: A, cancel: &CancellationToken) -> RepositoryResult<()> {
        if !aggregate.is_deleted() {
            return Err(RepositoryError::NotSoftDeleted {
                aggregate_type: A::aggregate_type(),
                id: aggregate.id().to_string(),
            });
        }
        self.stage(Operation::Delete, aggregate, cancel).await
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn get_by_email(
        &self,
        email: &Email,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<User>> {
        self.read(cancel, |view| {
            view.all::<User>()
                .into_iter()
                .find(|user| user.email() == email)
        })
        .await
    }

    async fn search(
        &self,
        filter: &UserFilter,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> RepositoryResult<PagedResult<User>> {
        self.read(cancel, |view| {
            let mut users: Vec<User> = view
                .all::<User>()
                .into_iter()
                .filter(|user| filter.matches(user))
                .collect();
            users.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
            PagedResult::from_all(users, page)
        })
        .await
    }
}

#[async_trait]
impl ProjectRepository for InMemoryRepository<Project> {
    async fn search(
        &self,
        filter: &ProjectFilter,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> RepositoryResult<PagedResult<Project>> {
        self.read(cancel, |view| {
            let mut projects: Vec<Project> = view
                .all_hydrated::<Project>()
                .into_iter()
                .filter(|project| filter.matches(project))
                .collect();
            projects.sort_by_key(|p| (p.created_at(), p.id()));
            PagedResult::from_all(projects, page)
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository<TaskItem> {
    async fn list_by_project(
        &self,
        project_id: ProjectId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<TaskItem>> {
        self.read(cancel, |view| {
            let mut tasks: Vec<TaskItem> = view
                .all::<TaskItem>()
                .into_iter()
                .filter(|task| task.project_id() == project_id)
                .collect();
            tasks.sort_by_key(|t| (t.created_at(), t.id()));
            tasks
        })
        .await
    }

    async fn search(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> RepositoryResult<PagedResult<TaskItem>> {
        self.read(cancel, |view| {
            let mut tasks: Vec<TaskItem> = view
                .all::<TaskItem>()
                .into_iter()
                .filter(|task| filter.matches(task))
                .collect();
            tasks.sort_by(|a, b| {
                b.priority()
                    .cmp(&a.priority())
                    .then(a.created_at().cmp(&b.created_at()))
                    .then(a.id().cmp(&b.id()))
            });
            PagedResult::from_all(tasks, page)
        })
        .await
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository<Comment> {
    async fn list_by_task(
        &self,
        task_id: TaskId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Comment>> {
        self.read(cancel, |view| {
            let mut comments: Vec<Comment> = view
                .all::<Comment>()
                .into_iter()
                .filter(|comment| comment.task_id() == task_id)
                .collect();
            comments.sort_by_key(|c| (c.created_at(), c.id()));
            comments
        })
        .await
    }
}
