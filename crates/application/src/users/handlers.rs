use std::sync::Arc;

use async_trait::async_trait;
use common::{PagedResult, UserId};
use domain::{DomainError, Email, UnitOfWorkFactory, User, UserFilter};
use tokio_util::sync::CancellationToken;

use crate::dto::UserDto;
use crate::error::ApplicationResult;
use crate::mediator::RequestHandler;
use crate::outcome::Outcome;
use crate::settings::ApplicationSettings;
use crate::try_outcome;

use super::commands::{
    ActivateUserCommand, ChangeUserRoleCommand, CreateUserCommand, DeactivateUserCommand,
    DeleteUserCommand, RecordUserLoginCommand, UpdateUserProfileCommand,
};
use super::queries::{GetUserByIdQuery, GetUsersQuery};

/// Handles every user command and query. Each call runs in its own unit of
/// work.
#[derive(Clone)]
pub struct UserHandlers {
    uow: Arc<dyn UnitOfWorkFactory>,
    settings: ApplicationSettings,
}

impl UserHandlers {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>, settings: ApplicationSettings) -> Self {
        Self { uow, settings }
    }

    /// Loads a user, applies `change` and commits.
    async fn modify(
        &self,
        user_id: UserId,
        cancel: &CancellationToken,
        change: impl FnOnce(&mut User) -> Result<(), DomainError> + Send,
    ) -> ApplicationResult<Outcome<UserDto>> {
        let uow = self.uow.begin();
        let Some(mut user) = uow.users().get_by_id(user_id, cancel).await? else {
            return Ok(Outcome::not_found("User"));
        };
        try_outcome!(change(&mut user));

        let dto = UserDto::from(&user);
        uow.users().update(user, cancel).await?;
        uow.save_changes(cancel).await?;
        Ok(Outcome::Success(dto))
    }
}

#[async_trait]
impl RequestHandler<CreateUserCommand> for UserHandlers {
    #[tracing::instrument(name = "create_user", skip_all)]
    async fn handle(
        &self,
        request: CreateUserCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<UserDto>> {
        let email = try_outcome!(Email::parse(&request.email));
        let uow = self.uow.begin();
        if uow.users().exists_by_email(&email, cancel).await? {
            return Ok(Outcome::fail(format!(
                "User with email '{email}' already exists"
            )));
        }

        let user = try_outcome!(User::create(email.as_str(), &request.name, request.role));
        let dto = UserDto::from(&user);
        uow.users().add(user, cancel).await?;
        uow.save_changes(cancel).await?;

        tracing::info!(user_id = %dto.id, "user created");
        Ok(Outcome::Success(dto))
    }
}

#[async_trait]
impl RequestHandler<UpdateUserProfileCommand> for UserHandlers {
    #[tracing::instrument(name = "update_user_profile", skip_all, fields(user_id = %request.user_id))]
    async fn handle(
        &self,
        request: UpdateUserProfileCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<UserDto>> {
        self.modify(request.user_id, cancel, |user| {
            user.update_profile(&request.name)
        })
        .await
    }
}

#[async_trait]
impl RequestHandler<ChangeUserRoleCommand> for UserHandlers {
    #[tracing::instrument(name = "change_user_role", skip_all, fields(user_id = %request.user_id))]
    async fn handle(
        &self,
        request: ChangeUserRoleCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<UserDto>> {
        self.modify(request.user_id, cancel, |user| user.change_role(request.role))
            .await
    }
}

#[async_trait]
impl RequestHandler<DeactivateUserCommand> for UserHandlers {
    #[tracing::instrument(name = "deactivate_user", skip_all, fields(user_id = %request.user_id))]
    async fn handle(
        &self,
        request: DeactivateUserCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome> {
        let outcome = self.modify(request.user_id, cancel, User::deactivate).await?;
        Ok(outcome.map(|_| ()))
    }
}

#[async_trait]
impl RequestHandler<ActivateUserCommand> for UserHandlers {
    #[tracing::instrument(name = "activate_user", skip_all, fields(user_id = %request.user_id))]
    async fn handle(
        &self,
        request: ActivateUserCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome> {
        let outcome = self.modify(request.user_id, cancel, User::activate).await?;
        Ok(outcome.map(|_| ()))
    }
}

#[async_trait]
impl RequestHandler<RecordUserLoginCommand> for UserHandlers {
    #[tracing::instrument(name = "record_user_login", skip_all, fields(user_id = %request.user_id))]
    async fn handle(
        &self,
        request: RecordUserLoginCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome> {
        let outcome = self
            .modify(request.user_id, cancel, User::record_login)
            .await?;
        Ok(outcome.map(|_| ()))
    }
}

#[async_trait]
impl RequestHandler<DeleteUserCommand> for UserHandlers {
    #[tracing::instrument(name = "delete_user", skip_all, fields(user_id = %request.user_id))]
    async fn handle(
        &self,
        request: DeleteUserCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome> {
        let uow = self.uow.begin();
        let Some(mut user) = uow.users().get_by_id(request.user_id, cancel).await? else {
            return Ok(Outcome::not_found("User"));
        };
        try_outcome!(user.delete());
        uow.users().delete(user, cancel).await?;
        uow.save_changes(cancel).await?;
        Ok(Outcome::ok())
    }
}

#[async_trait]
impl RequestHandler<GetUserByIdQuery> for UserHandlers {
    #[tracing::instrument(name = "get_user_by_id", skip_all, fields(user_id = %request.user_id))]
    async fn handle(
        &self,
        request: GetUserByIdQuery,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<UserDto>> {
        let uow = self.uow.begin();
        Ok(match uow.users().get_by_id(request.user_id, cancel).await? {
            Some(user) => Outcome::Success(UserDto::from(&user)),
            None => Outcome::not_found("User"),
        })
    }
}

#[async_trait]
impl RequestHandler<GetUsersQuery> for UserHandlers {
    #[tracing::instrument(name = "get_users", skip_all)]
    async fn handle(
        &self,
        request: GetUsersQuery,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<PagedResult<UserDto>>> {
        let filter = UserFilter {
            role: request.role,
            is_active: request.is_active,
            search: request.search.filter(|term| !term.trim().is_empty()),
        };
        let page = self.settings.page_request(request.page, request.page_size);
        let uow = self.uow.begin();
        let users = uow.users().search(&filter, page, cancel).await?;
        Ok(Outcome::Success(users.map(|user| UserDto::from(&user))))
    }
}
