//! End-to-end use cases through the mediator and the in-memory store.

use std::sync::Arc;

use application::{
    ActivateProjectCommand, ActivateUserCommand, ActivityFeed, AddCommentCommand,
    ApplicationError, ApplicationSettings, AssignTaskCommand, CancelProjectCommand,
    ChangeUserRoleCommand, CompleteProjectCommand, CompleteTaskCommand, CreateProjectCommand,
    CreateTaskCommand, CreateUserCommand, DeactivateUserCommand, DeleteCommentCommand,
    DeleteProjectCommand, DeleteTaskCommand, DeleteUserCommand, EditCommentCommand, EventBus,
    GetCommentsByTaskQuery, GetProjectByIdQuery, GetProjectsQuery, GetTaskByIdQuery,
    GetTasksQuery, GetUserByIdQuery, GetUsersQuery, LoggingEventHandler, Mediator, MoneyInput,
    Outcome, ProjectDto, RecordUserLoginCommand, ReopenTaskCommand, Request,
    SetProjectBudgetCommand, StartTaskCommand, TaskDto, UnassignTaskCommand,
    UpdateProjectCommand, UpdateTaskCommand, UpdateUserProfileCommand, UserDto, build_mediator,
};
use chrono::NaiveDate;
use common::{ProjectId, UserId};
use domain::{AggregateRoot, Priority, ProjectStatus, TaskStatus, UserRole};
use store::{InMemoryDatabase, InMemoryUnitOfWorkFactory};
use tokio_util::sync::CancellationToken;

struct App {
    mediator: Mediator,
    db: InMemoryDatabase,
    feed: ActivityFeed,
    cancel: CancellationToken,
}

impl App {
    fn new() -> Self {
        let db = InMemoryDatabase::new();
        let feed = ActivityFeed::new();
        let mut bus = EventBus::new();
        bus.register(Arc::new(LoggingEventHandler))
            .register(Arc::new(feed.clone()));
        let factory = InMemoryUnitOfWorkFactory::new(db.clone(), Arc::new(bus));
        Self {
            mediator: build_mediator(Arc::new(factory), ApplicationSettings::default()),
            db,
            feed,
            cancel: CancellationToken::new(),
        }
    }

    async fn send<R: Request>(&self, request: R) -> Outcome<R::Response> {
        self.mediator.send(request, &self.cancel).await.unwrap()
    }

    async fn user(&self, email: &str, role: UserRole) -> UserDto {
        self.mediator
            .send(
                CreateUserCommand {
                    email: email.into(),
                    name: email.split('@').next().unwrap().into(),
                    role,
                },
                &self.cancel,
            )
            .await
            .unwrap()
            .into_value()
            .unwrap()
    }

    async fn project(&self, owner_id: UserId) -> Outcome<ProjectDto> {
        self.mediator
            .send(
                CreateProjectCommand {
                    name: "Website relaunch".into(),
                    description: Some("New marketing site".into()),
                    owner_id,
                    budget: Some(MoneyInput {
                        amount: 500_000,
                        currency: "USD".into(),
                    }),
                    start_date: date(3, 1),
                    end_date: Some(date(6, 30)),
                },
                &self.cancel,
            )
            .await
            .unwrap()
    }

    async fn task(&self, project_id: ProjectId, title: &str, priority: Priority) -> TaskDto {
        self.mediator
            .send(
                CreateTaskCommand {
                    project_id,
                    title: title.into(),
                    description: None,
                    priority,
                    due_date: None,
                    assignee_id: None,
                },
                &self.cancel,
            )
            .await
            .unwrap()
            .into_value()
            .unwrap()
    }
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

#[tokio::test]
async fn project_launch_from_draft_to_completed() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let dev = app.user("dev@example.com", UserRole::Member).await;
    let project = app.project(owner.id).await.into_value().unwrap();
    assert_eq!(project.status, ProjectStatus::Draft);
    assert_eq!(project.budget.as_ref().unwrap().formatted, "5000.00 USD");

    let task = app.task(project.id, "Design mockups", Priority::High).await;
    let assigned = app
        .mediator
        .send(
            AssignTaskCommand {
                task_id: task.id,
                assignee_id: dev.id,
            },
            &app.cancel,
        )
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(assigned.assignee_id, Some(dev.id));

    for outcome in [
        app.mediator
            .send(StartTaskCommand { task_id: task.id }, &app.cancel)
            .await
            .unwrap(),
        app.mediator
            .send(CompleteTaskCommand { task_id: task.id }, &app.cancel)
            .await
            .unwrap(),
    ] {
        assert!(outcome.is_success());
    }

    let completed = app
        .mediator
        .send(
            CompleteProjectCommand {
                project_id: project.id,
            },
            &app.cancel,
        )
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(completed.status, ProjectStatus::Completed);
    assert_eq!(completed.task_count, 1);
    assert_eq!(completed.completed_task_count, 1);

    let history: Vec<&str> = app
        .feed
        .for_aggregate(project.id.as_uuid())
        .await
        .iter()
        .map(|entry| entry.event_type)
        .collect();
    assert_eq!(
        history,
        vec![
            "ProjectCompleted",
            "ProjectActivated",
            "ProjectTaskAdded",
            "ProjectCreated"
        ]
    );
}

#[tokio::test]
async fn project_with_open_tasks_cannot_complete() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let project = app.project(owner.id).await.into_value().unwrap();
    app.task(project.id, "Write copy", Priority::Medium).await;

    let outcome = app
        .mediator
        .send(
            CompleteProjectCommand {
                project_id: project.id,
            },
            &app.cancel,
        )
        .await
        .unwrap();
    assert_eq!(
        outcome.message(),
        Some("Cannot complete project: 1 task(s) are not completed")
    );

    let reloaded = app
        .mediator
        .send(
            GetProjectByIdQuery {
                project_id: project.id,
            },
            &app.cancel,
        )
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(reloaded.status, ProjectStatus::Draft);
}

#[tokio::test]
async fn inactive_owner_cannot_create_project() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let deactivated = app
        .mediator
        .send(DeactivateUserCommand { user_id: owner.id }, &app.cancel)
        .await
        .unwrap();
    assert_eq!(deactivated, Outcome::ok());

    let outcome = app.project(owner.id).await;
    assert_eq!(outcome.message(), Some("Owner is not active"));
    assert_eq!(app.db.project_count().await, 0);
}

#[tokio::test]
async fn missing_owner_is_not_found() {
    let app = App::new();
    let outcome = app.project(UserId::new()).await;
    assert_eq!(outcome.message(), Some("User not found"));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = App::new();
    app.user("ada@example.com", UserRole::Member).await;

    let outcome = app
        .mediator
        .send(
            CreateUserCommand {
                email: "ADA@example.com".into(),
                name: "Ada again".into(),
                role: UserRole::Member,
            },
            &app.cancel,
        )
        .await
        .unwrap();
    assert_eq!(
        outcome.message(),
        Some("User with email 'ada@example.com' already exists")
    );
    assert_eq!(app.db.user_count().await, 1);
}

#[tokio::test]
async fn deleting_twice_reports_not_found() {
    let app = App::new();
    let user = app.user("gone@example.com", UserRole::Guest).await;

    let first = app
        .mediator
        .send(DeleteUserCommand { user_id: user.id }, &app.cancel)
        .await
        .unwrap();
    assert!(first.is_success());

    let second = app
        .mediator
        .send(DeleteUserCommand { user_id: user.id }, &app.cancel)
        .await
        .unwrap();
    assert_eq!(second.message(), Some("User not found"));

    let lookup = app
        .mediator
        .send(GetUserByIdQuery { user_id: user.id }, &app.cancel)
        .await
        .unwrap();
    assert_eq!(lookup.message(), Some("User not found"));

    let row = app.db.raw_user(user.id).await.unwrap();
    assert!(row.is_deleted());
}

#[tokio::test]
async fn validation_reports_every_field() {
    let app = App::new();
    let outcome = app
        .mediator
        .send(
            CreateUserCommand {
                email: "no-at-sign".into(),
                name: "".into(),
                role: UserRole::Member,
            },
            &app.cancel,
        )
        .await
        .unwrap();

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.message, "Validation failed");
    let fields: Vec<&str> = failure.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["Email", "Name"]);
    assert_eq!(app.db.user_count().await, 0);
}

#[tokio::test]
async fn budget_currency_is_fixed_once_set() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let project = app.project(owner.id).await.into_value().unwrap();

    let outcome = app
        .mediator
        .send(
            SetProjectBudgetCommand {
                project_id: project.id,
                budget: MoneyInput {
                    amount: 100,
                    currency: "EUR".into(),
                },
            },
            &app.cancel,
        )
        .await
        .unwrap();
    assert_eq!(
        outcome.message(),
        Some("Budget currency is fixed to USD and cannot change to EUR")
    );
}

#[tokio::test]
async fn deleting_a_project_hides_its_tasks() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let project = app.project(owner.id).await.into_value().unwrap();
    let task = app.task(project.id, "Draft copy", Priority::Low).await;

    let deleted = app
        .mediator
        .send(
            DeleteProjectCommand {
                project_id: project.id,
            },
            &app.cancel,
        )
        .await
        .unwrap();
    assert!(deleted.is_success());

    let lookup = app
        .mediator
        .send(GetTaskByIdQuery { task_id: task.id }, &app.cancel)
        .await
        .unwrap();
    assert_eq!(lookup.message(), Some("Task not found"));
    assert!(app.db.raw_task(task.id).await.unwrap().is_deleted());
}

#[tokio::test]
async fn task_search_orders_by_priority_and_pages() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let project = app.project(owner.id).await.into_value().unwrap();
    app.task(project.id, "Low", Priority::Low).await;
    app.task(project.id, "Critical", Priority::Critical).await;
    app.task(project.id, "High", Priority::High).await;

    let page = app
        .mediator
        .send(
            GetTasksQuery {
                project_id: Some(project.id),
                min_priority: Some(Priority::Medium),
                page_size: Some(1),
                ..GetTasksQuery::default()
            },
            &app.cancel,
        )
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(page.items[0].title, "Critical");
    assert_eq!(page.items[0].status, TaskStatus::Pending);
    assert!(page.has_next_page());
}

#[tokio::test]
async fn oversized_page_is_rejected() {
    let app = App::new();
    let outcome = app
        .mediator
        .send(
            GetUsersQuery {
                page_size: Some(1_000),
                ..GetUsersQuery::default()
            },
            &app.cancel,
        )
        .await
        .unwrap();
    assert_eq!(outcome.failure().unwrap().errors[0].field, "page_size");
}

#[tokio::test]
async fn replies_are_threaded_under_their_parent() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let project = app.project(owner.id).await.into_value().unwrap();
    let task = app.task(project.id, "Review", Priority::Medium).await;

    let root = app
        .mediator
        .send(
            AddCommentCommand {
                task_id: task.id,
                author_id: owner.id,
                content: "Looks good".into(),
                parent_id: None,
            },
            &app.cancel,
        )
        .await
        .unwrap()
        .into_value()
        .unwrap();
    let reply = app
        .mediator
        .send(
            AddCommentCommand {
                task_id: task.id,
                author_id: owner.id,
                content: "Agreed".into(),
                parent_id: Some(root.id),
            },
            &app.cancel,
        )
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(reply.parent_id, Some(root.id));

    let comments = app
        .mediator
        .send(GetCommentsByTaskQuery { task_id: task.id }, &app.cancel)
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].reply_ids, vec![reply.id]);
    assert_eq!(app.db.comment_count().await, 2);
}

#[tokio::test]
async fn cancelled_request_is_an_error() {
    let app = App::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = app
        .mediator
        .send(GetUsersQuery::default(), &cancel)
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::Cancelled);
}

#[tokio::test]
async fn empty_project_completes_straight_from_draft() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let project = app
        .send(CreateProjectCommand {
            name: "Launch".into(),
            description: None,
            owner_id: owner.id,
            budget: None,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: None,
        })
        .await
        .into_value()
        .unwrap();

    let completed = app
        .send(CompleteProjectCommand {
            project_id: project.id,
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(completed.name, "Launch");
    assert_eq!(completed.status, ProjectStatus::Completed);
    assert_eq!(completed.task_count, 0);

    let activate = app
        .send(ActivateProjectCommand {
            project_id: project.id,
        })
        .await;
    assert_eq!(
        activate.message(),
        Some("Cannot activate project in Completed state")
    );
    let cancel = app
        .send(CancelProjectCommand {
            project_id: project.id,
            reason: None,
        })
        .await;
    assert_eq!(cancel.message(), Some("Cannot cancel project in Completed state"));
}

#[tokio::test]
async fn tasks_of_a_completed_project_are_frozen() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let project = app.project(owner.id).await.into_value().unwrap();
    let task = app.task(project.id, "Ship", Priority::High).await;
    assert!(app.send(StartTaskCommand { task_id: task.id }).await.is_success());
    assert!(app.send(CompleteTaskCommand { task_id: task.id }).await.is_success());
    assert!(
        app.send(CompleteProjectCommand {
            project_id: project.id,
        })
        .await
        .is_success()
    );

    let frozen = Some("Cannot change tasks of project in Completed state");
    assert_eq!(
        app.send(ReopenTaskCommand { task_id: task.id }).await.message(),
        frozen
    );
    assert_eq!(
        app.send(AssignTaskCommand {
            task_id: task.id,
            assignee_id: owner.id,
        })
        .await
        .message(),
        frozen
    );
    assert_eq!(
        app.send(DeleteTaskCommand { task_id: task.id }).await.message(),
        frozen
    );

    let reloaded = app
        .send(GetProjectByIdQuery {
            project_id: project.id,
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(reloaded.task_count, 1);
    assert_eq!(reloaded.completed_task_count, 1);
    let task = app
        .send(GetTaskByIdQuery { task_id: task.id })
        .await
        .into_value()
        .unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert!(task.completed_at.is_some());
}

#[tokio::test]
async fn tasks_of_a_cancelled_project_cannot_start() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let project = app.project(owner.id).await.into_value().unwrap();
    let task = app.task(project.id, "Plan", Priority::Low).await;
    let cancelled = app
        .send(CancelProjectCommand {
            project_id: project.id,
            reason: Some("Budget cut".into()),
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(cancelled.status, ProjectStatus::Cancelled);

    let started = app.send(StartTaskCommand { task_id: task.id }).await;
    assert_eq!(
        started.message(),
        Some("Cannot change tasks of project in Cancelled state")
    );
    let renamed = app
        .send(UpdateTaskCommand {
            task_id: task.id,
            title: "Plan harder".into(),
            description: None,
            priority: Priority::Low,
            due_date: None,
        })
        .await;
    assert!(renamed.is_failure());
}

#[tokio::test]
async fn task_lifecycle_through_handlers() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let dev = app.user("dev@example.com", UserRole::Member).await;
    let project = app.project(owner.id).await.into_value().unwrap();
    let task = app
        .send(CreateTaskCommand {
            project_id: project.id,
            title: "Draft".into(),
            description: None,
            priority: Priority::Low,
            due_date: None,
            assignee_id: Some(dev.id),
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(task.assignee_id, Some(dev.id));

    let updated = app
        .send(UpdateTaskCommand {
            task_id: task.id,
            title: "Final draft".into(),
            description: Some("Two pages".into()),
            priority: Priority::Critical,
            due_date: Some(date(4, 15)),
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(updated.title, "Final draft");
    assert_eq!(updated.description.as_deref(), Some("Two pages"));
    assert_eq!(updated.priority, Priority::Critical);
    assert_eq!(updated.due_date, Some(date(4, 15)));

    let unassigned = app
        .send(UnassignTaskCommand { task_id: task.id })
        .await
        .into_value()
        .unwrap();
    assert_eq!(unassigned.assignee_id, None);
    assert_eq!(
        app.send(UnassignTaskCommand { task_id: task.id }).await.message(),
        Some("Task is not assigned")
    );

    let started = app
        .send(StartTaskCommand { task_id: task.id })
        .await
        .into_value()
        .unwrap();
    assert_eq!(started.status, TaskStatus::InProgress);
    let completed = app
        .send(CompleteTaskCommand { task_id: task.id })
        .await
        .into_value()
        .unwrap();
    assert!(completed.completed_at.is_some());

    let reopened = app
        .send(ReopenTaskCommand { task_id: task.id })
        .await
        .into_value()
        .unwrap();
    assert_eq!(reopened.status, TaskStatus::Pending);
    assert_eq!(reopened.completed_at, None);
    assert_eq!(
        app.send(ReopenTaskCommand { task_id: task.id }).await.message(),
        Some("Cannot reopen task in Pending state")
    );

    assert_eq!(
        app.send(DeleteTaskCommand { task_id: task.id }).await,
        Outcome::ok()
    );
    assert_eq!(
        app.send(GetTaskByIdQuery { task_id: task.id }).await.message(),
        Some("Task not found")
    );
    assert_eq!(
        app.send(DeleteTaskCommand { task_id: task.id }).await.message(),
        Some("Task not found")
    );
}

#[tokio::test]
async fn project_details_activation_and_listing() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let other = app.user("other@example.com", UserRole::Manager).await;
    let project = app.project(owner.id).await.into_value().unwrap();

    let updated = app
        .send(UpdateProjectCommand {
            project_id: project.id,
            name: "Website v2".into(),
            description: None,
            start_date: date(4, 1),
            end_date: Some(date(9, 30)),
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(updated.name, "Website v2");
    assert_eq!(updated.description, None);
    assert_eq!(updated.start_date, date(4, 1));
    assert_eq!(updated.end_date, Some(date(9, 30)));

    let backwards = app
        .send(UpdateProjectCommand {
            project_id: project.id,
            name: "Website v2".into(),
            description: None,
            start_date: date(9, 1),
            end_date: Some(date(4, 1)),
        })
        .await;
    assert_eq!(backwards.failure().unwrap().errors[0].field, "EndDate");

    let active = app
        .send(ActivateProjectCommand {
            project_id: project.id,
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(active.status, ProjectStatus::Active);
    assert_eq!(
        app.send(ActivateProjectCommand {
            project_id: project.id,
        })
        .await
        .message(),
        Some("Cannot activate project in Active state")
    );

    let cancelled = app
        .send(CancelProjectCommand {
            project_id: project.id,
            reason: Some("Merged into another effort".into()),
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(cancelled.status, ProjectStatus::Cancelled);
    assert_eq!(
        app.send(UpdateProjectCommand {
            project_id: project.id,
            name: "Revived".into(),
            description: None,
            start_date: date(4, 1),
            end_date: None,
        })
        .await
        .message(),
        Some("Cannot update project in Cancelled state")
    );

    let by_status = app
        .send(GetProjectsQuery {
            status: Some(ProjectStatus::Cancelled),
            ..GetProjectsQuery::default()
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(by_status.total_count, 1);
    assert_eq!(by_status.items[0].id, project.id);
    let by_other_owner = app
        .send(GetProjectsQuery {
            owner_id: Some(other.id),
            ..GetProjectsQuery::default()
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(by_other_owner.total_count, 0);
}

#[tokio::test]
async fn user_profile_role_and_login() {
    let app = App::new();
    let user = app.user("ada@example.com", UserRole::Member).await;

    let renamed = app
        .send(UpdateUserProfileCommand {
            user_id: user.id,
            name: "Ada Lovelace".into(),
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(renamed.name, "Ada Lovelace");
    assert!(renamed.updated_at.is_some());

    let promoted = app
        .send(ChangeUserRoleCommand {
            user_id: user.id,
            role: UserRole::Admin,
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(promoted.role, UserRole::Admin);

    assert_eq!(
        app.send(RecordUserLoginCommand { user_id: user.id }).await,
        Outcome::ok()
    );
    let reloaded = app
        .send(GetUserByIdQuery { user_id: user.id })
        .await
        .into_value()
        .unwrap();
    assert!(reloaded.last_login_at.is_some());

    assert!(app.send(DeactivateUserCommand { user_id: user.id }).await.is_success());
    assert_eq!(
        app.send(RecordUserLoginCommand { user_id: user.id }).await.message(),
        Some("Inactive users cannot log in")
    );
    assert_eq!(
        app.send(ActivateUserCommand { user_id: user.id }).await,
        Outcome::ok()
    );
    assert_eq!(
        app.send(ActivateUserCommand { user_id: user.id }).await.message(),
        Some("User is already active")
    );
    assert_eq!(
        app.send(UpdateUserProfileCommand {
            user_id: UserId::new(),
            name: "Nobody".into(),
        })
        .await
        .message(),
        Some("User not found")
    );

    let history: Vec<&str> = app
        .feed
        .for_aggregate(user.id.as_uuid())
        .await
        .iter()
        .map(|entry| entry.event_type)
        .collect();
    assert!(history.contains(&"UserRoleChanged"));
}

#[tokio::test]
async fn comments_can_be_edited_and_deleted() {
    let app = App::new();
    let owner = app.user("pm@example.com", UserRole::Manager).await;
    let project = app.project(owner.id).await.into_value().unwrap();
    let task = app.task(project.id, "Review", Priority::Medium).await;
    let comment = app
        .send(AddCommentCommand {
            task_id: task.id,
            author_id: owner.id,
            content: "First pass".into(),
            parent_id: None,
        })
        .await
        .into_value()
        .unwrap();

    let edited = app
        .send(EditCommentCommand {
            comment_id: comment.id,
            content: "Second pass".into(),
        })
        .await
        .into_value()
        .unwrap();
    assert_eq!(edited.content, "Second pass");
    assert!(edited.updated_at.is_some());

    let blank = app
        .send(EditCommentCommand {
            comment_id: comment.id,
            content: " ".into(),
        })
        .await;
    assert_eq!(blank.failure().unwrap().message, "Validation failed");

    assert_eq!(
        app.send(DeleteCommentCommand {
            comment_id: comment.id,
        })
        .await,
        Outcome::ok()
    );
    let remaining = app
        .send(GetCommentsByTaskQuery { task_id: task.id })
        .await
        .into_value()
        .unwrap();
    assert!(remaining.is_empty());
    assert_eq!(
        app.send(EditCommentCommand {
            comment_id: comment.id,
            content: "Too late".into(),
        })
        .await
        .message(),
        Some("Comment not found")
    );
}
