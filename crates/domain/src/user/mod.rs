//! User aggregate and related types.

mod aggregate;
mod events;

pub use aggregate::User;
pub use events::UserEvent;

use serde::{Deserialize, Serialize};

use crate::value_objects::ValueError;

/// Role a user plays across projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Member,
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Manager => "Manager",
            UserRole::Member => "Member",
            UserRole::Guest => "Guest",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "member" => Ok(UserRole::Member),
            "guest" => Ok(UserRole::Guest),
            _ => Err(ValueError::UnknownRole(s.to_string())),
        }
    }
}
