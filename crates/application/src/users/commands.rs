use common::UserId;
use domain::UserRole;
use serde::{Deserialize, Serialize};

use crate::dto::UserDto;
use crate::mediator::commands;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserCommand {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserProfileCommand {
    pub user_id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeUserRoleCommand {
    pub user_id: UserId,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivateUserCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateUserCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUserLoginCommand {
    pub user_id: UserId,
}

/// Soft-deletes a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserCommand {
    pub user_id: UserId,
}

commands! {
    CreateUserCommand => UserDto,
    UpdateUserProfileCommand => UserDto,
    ChangeUserRoleCommand => UserDto,
    DeactivateUserCommand => (),
    ActivateUserCommand => (),
    RecordUserLoginCommand => (),
    DeleteUserCommand => (),
}
