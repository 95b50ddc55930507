//! Structural checks shared by request validators.
//!
//! Validators never touch persistence; they only look at the request.

use domain::Email;
use uuid::Uuid;

use crate::outcome::FieldError;
use crate::settings::ApplicationSettings;

/// Collects field errors for one request.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    /// Text must be non-blank and at most `max` characters once trimmed.
    pub fn required_text(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, format!("{field} is required"));
        } else if trimmed.chars().count() > max {
            self.add(field, format!("{field} must not exceed {max} characters"));
        }
        self
    }

    /// Optional text, when present, must be at most `max` characters.
    pub fn optional_text(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(value) = value
            && value.trim().chars().count() > max
        {
            self.add(field, format!("{field} must not exceed {max} characters"));
        }
        self
    }

    /// Identifiers must not be the nil UUID.
    pub fn id(&mut self, field: &str, id: Uuid) -> &mut Self {
        if id.is_nil() {
            self.add(field, format!("{field} is required"));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, format!("{field} is required"));
        } else if Email::parse(value).is_err() {
            self.add(field, format!("{field} is not a valid email address"));
        }
        self
    }

    /// `page >= 1` and, when given, `1 <= page_size <= max_page_size`.
    pub fn paging(
        &mut self,
        page: u32,
        page_size: Option<u32>,
        settings: &ApplicationSettings,
    ) -> &mut Self {
        if page < 1 {
            self.add("page", "Page must be at least 1");
        }
        if let Some(size) = page_size
            && !(1..=settings.max_page_size).contains(&size)
        {
            self.add(
                "page_size",
                format!("Page size must be between 1 and {}", settings.max_page_size),
            );
        }
        self
    }

    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.add(field, message);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}
