//! User aggregate implementation.

use chrono::{DateTime, Utc};
use common::{UserId, Version};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateRoot;
use crate::error::{DomainError, required_text};
use crate::value_objects::Email;

use super::{UserEvent, UserRole};

const MAX_NAME_LENGTH: usize = 100;

/// User aggregate root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,

    #[serde(default)]
    version: Version,

    email: Email,
    name: String,
    role: UserRole,
    is_active: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    events: Vec<UserEvent>,
}

impl AggregateRoot for User {
    type Id = UserId;
    type Event = UserEvent;

    fn aggregate_type() -> &'static str {
        "User"
    }

    fn id(&self) -> UserId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn domain_events(&self) -> &[UserEvent] {
        &self.events
    }

    fn clear_domain_events(&mut self) {
        self.events.clear();
    }
}

// Query methods
impl User {
    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

// Command methods
impl User {
    /// Registers a new, active user.
    pub fn create(email: &str, name: &str, role: UserRole) -> Result<User, DomainError> {
        let email = Email::parse(email)?;
        let name = required_text("Name", name, MAX_NAME_LENGTH)?;
        let now = Utc::now();
        let id = UserId::new();

        let mut user = User {
            id,
            version: Version::initial(),
            email: email.clone(),
            name: name.clone(),
            role,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: None,
            is_deleted: false,
            deleted_at: None,
            events: Vec::new(),
        };
        user.events.push(UserEvent::Created {
            user_id: id,
            email,
            name,
            role,
            occurred_at: now,
        });
        Ok(user)
    }

    /// Changes the display name.
    pub fn update_profile(&mut self, name: &str) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        let name = required_text("Name", name, MAX_NAME_LENGTH)?;
        let now = self.touch();
        self.name = name.clone();
        self.events.push(UserEvent::ProfileUpdated {
            user_id: self.id,
            name,
            occurred_at: now,
        });
        Ok(())
    }

    /// Changes the role. Assigning the current role records nothing.
    pub fn change_role(&mut self, role: UserRole) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        if self.role == role {
            return Ok(());
        }
        let now = self.touch();
        let previous = std::mem::replace(&mut self.role, role);
        self.events.push(UserEvent::RoleChanged {
            user_id: self.id,
            previous,
            role,
            occurred_at: now,
        });
        Ok(())
    }

    pub fn deactivate(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        if !self.is_active {
            return Err(DomainError::ActivationUnchanged { state: "inactive" });
        }
        let now = self.touch();
        self.is_active = false;
        self.events.push(UserEvent::Deactivated {
            user_id: self.id,
            occurred_at: now,
        });
        Ok(())
    }

    pub fn activate(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        if self.is_active {
            return Err(DomainError::ActivationUnchanged { state: "active" });
        }
        let now = self.touch();
        self.is_active = true;
        self.events.push(UserEvent::Activated {
            user_id: self.id,
            occurred_at: now,
        });
        Ok(())
    }

    /// Stamps `last_login_at`. Inactive users cannot log in.
    pub fn record_login(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        if !self.is_active {
            return Err(DomainError::InactiveLogin);
        }
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.events.push(UserEvent::LoggedIn {
            user_id: self.id,
            occurred_at: now,
        });
        Ok(())
    }

    /// Marks the user as logically deleted.
    pub fn delete(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        let now = self.touch();
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.events.push(UserEvent::Deleted {
            user_id: self.id,
            occurred_at: now,
        });
        Ok(())
    }

    fn ensure_not_deleted(&self) -> Result<(), DomainError> {
        if self.is_deleted {
            return Err(DomainError::Deleted { entity: "User" });
        }
        Ok(())
    }

    fn touch(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.updated_at = Some(now);
        now
    }
}
