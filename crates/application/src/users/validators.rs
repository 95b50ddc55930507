use crate::mediator::Validator;
use crate::outcome::FieldError;
use crate::settings::ApplicationSettings;
use crate::validation::ValidationErrors;

use super::commands::{
    ActivateUserCommand, ChangeUserRoleCommand, CreateUserCommand, DeactivateUserCommand,
    DeleteUserCommand, RecordUserLoginCommand, UpdateUserProfileCommand,
};
use super::queries::{GetUserByIdQuery, GetUsersQuery};

const MAX_NAME_LENGTH: usize = 100;
const MAX_SEARCH_LENGTH: usize = 100;

/// Structural checks for user requests.
#[derive(Debug, Clone, Copy)]
pub struct UserValidators {
    settings: ApplicationSettings,
}

impl UserValidators {
    pub fn new(settings: ApplicationSettings) -> Self {
        Self { settings }
    }
}

impl Validator<CreateUserCommand> for UserValidators {
    fn validate(&self, request: &CreateUserCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.email("Email", &request.email)
            .required_text("Name", &request.name, MAX_NAME_LENGTH);
        v.into_errors()
    }
}

impl Validator<UpdateUserProfileCommand> for UserValidators {
    fn validate(&self, request: &UpdateUserProfileCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("UserId", request.user_id.as_uuid())
            .required_text("Name", &request.name, MAX_NAME_LENGTH);
        v.into_errors()
    }
}

/// Requests that only carry a user id.
macro_rules! user_id_validators {
    ($($request:ty),+ $(,)?) => {
        $(
            impl Validator<$request> for UserValidators {
                fn validate(&self, request: &$request) -> Vec<FieldError> {
                    let mut v = ValidationErrors::new();
                    v.id("UserId", request.user_id.as_uuid());
                    v.into_errors()
                }
            }
        )+
    };
}

user_id_validators!(
    ChangeUserRoleCommand,
    DeactivateUserCommand,
    ActivateUserCommand,
    RecordUserLoginCommand,
    DeleteUserCommand,
    GetUserByIdQuery,
);

impl Validator<GetUsersQuery> for UserValidators {
    fn validate(&self, request: &GetUsersQuery) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.paging(request.page, request.page_size, &self.settings)
            .optional_text("Search", request.search.as_deref(), MAX_SEARCH_LENGTH);
        v.into_errors()
    }
}
