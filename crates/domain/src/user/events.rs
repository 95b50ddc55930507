//! User domain events.

use chrono::{DateTime, Utc};
use common::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainEvent;
use crate::value_objects::Email;

use super::UserRole;

/// Events raised by the user aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UserEvent {
    /// A user was registered.
    Created {
        user_id: UserId,
        email: Email,
        name: String,
        role: UserRole,
        occurred_at: DateTime<Utc>,
    },

    /// The display name changed.
    ProfileUpdated {
        user_id: UserId,
        name: String,
        occurred_at: DateTime<Utc>,
    },

    RoleChanged {
        user_id: UserId,
        previous: UserRole,
        role: UserRole,
        occurred_at: DateTime<Utc>,
    },

    Deactivated {
        user_id: UserId,
        occurred_at: DateTime<Utc>,
    },

    Activated {
        user_id: UserId,
        occurred_at: DateTime<Utc>,
    },

    LoggedIn {
        user_id: UserId,
        occurred_at: DateTime<Utc>,
    },

    /// The user was soft-deleted.
    Deleted {
        user_id: UserId,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::Created { .. } => "UserCreated",
            UserEvent::ProfileUpdated { .. } => "UserProfileUpdated",
            UserEvent::RoleChanged { .. } => "UserRoleChanged",
            UserEvent::Deactivated { .. } => "UserDeactivated",
            UserEvent::Activated { .. } => "UserActivated",
            UserEvent::LoggedIn { .. } => "UserLoggedIn",
            UserEvent::Deleted { .. } => "UserDeleted",
        }
    }

    fn aggregate_id(&self) -> Uuid {
        match self {
            UserEvent::Created { user_id, .. }
            | UserEvent::ProfileUpdated { user_id, .. }
            | UserEvent::RoleChanged { user_id, .. }
            | UserEvent::Deactivated { user_id, .. }
            | UserEvent::Activated { user_id, .. }
            | UserEvent::LoggedIn { user_id, .. }
            | UserEvent::Deleted { user_id, .. } => user_id.as_uuid(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            UserEvent::Created { occurred_at, .. }
            | UserEvent::ProfileUpdated { occurred_at, .. }
            | UserEvent::RoleChanged { occurred_at, .. }
            | UserEvent::Deactivated { occurred_at, .. }
            | UserEvent::Activated { occurred_at, .. }
            | UserEvent::LoggedIn { occurred_at, .. }
            | UserEvent::Deleted { occurred_at, .. } => *occurred_at,
        }
    }
}
