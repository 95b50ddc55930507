use common::{PagedResult, UserId};
use domain::UserRole;
use serde::{Deserialize, Serialize};

use crate::dto::UserDto;
use crate::mediator::queries;
use crate::settings::first_page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserByIdQuery {
    pub user_id: UserId,
}

/// Users ordered by name. Unset filters match everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUsersQuery {
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Case-insensitive match on name or email.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "first_page")]
    pub page: u32,
    /// Falls back to the configured default page size.
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl Default for GetUsersQuery {
    fn default() -> Self {
        Self {
            role: None,
            is_active: None,
            search: None,
            page: first_page(),
            page_size: None,
        }
    }
}

queries! {
    GetUserByIdQuery => UserDto,
    GetUsersQuery => PagedResult<UserDto>,
}
