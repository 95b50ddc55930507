use chrono::NaiveDate;

use crate::mediator::Validator;
use crate::outcome::FieldError;
use crate::settings::ApplicationSettings;
use crate::validation::ValidationErrors;

use super::commands::{
    ActivateProjectCommand, CancelProjectCommand, CompleteProjectCommand, CreateProjectCommand,
    DeleteProjectCommand, MoneyInput, SetProjectBudgetCommand, UpdateProjectCommand,
};
use super::queries::{GetProjectByIdQuery, GetProjectsQuery};

const MAX_NAME_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 2000;
const MAX_REASON_LENGTH: usize = 500;

/// Structural checks for project requests.
#[derive(Debug, Clone, Copy)]
pub struct ProjectValidators {
    settings: ApplicationSettings,
}

impl ProjectValidators {
    pub fn new(settings: ApplicationSettings) -> Self {
        Self { settings }
    }
}

fn details(
    v: &mut ValidationErrors,
    name: &str,
    description: Option<&str>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) {
    v.required_text("Name", name, MAX_NAME_LENGTH)
        .optional_text("Description", description, MAX_DESCRIPTION_LENGTH)
        .check(
            end_date.is_none_or(|end| end > start_date),
            "EndDate",
            "End date must be after start date",
        );
}

fn budget(v: &mut ValidationErrors, budget: &MoneyInput) {
    v.check(
        budget.amount >= 0,
        "Budget",
        "Budget amount must not be negative",
    )
    .check(
        budget.currency.trim().len() == 3,
        "Currency",
        "Currency must be a three-letter code",
    );
}

impl Validator<CreateProjectCommand> for ProjectValidators {
    fn validate(&self, request: &CreateProjectCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("OwnerId", request.owner_id.as_uuid());
        details(
            &mut v,
            &request.name,
            request.description.as_deref(),
            request.start_date,
            request.end_date,
        );
        if let Some(input) = &request.budget {
            budget(&mut v, input);
        }
        v.into_errors()
    }
}

impl Validator<UpdateProjectCommand> for ProjectValidators {
    fn validate(&self, request: &UpdateProjectCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("ProjectId", request.project_id.as_uuid());
        details(
            &mut v,
            &request.name,
            request.description.as_deref(),
            request.start_date,
            request.end_date,
        );
        v.into_errors()
    }
}

impl Validator<SetProjectBudgetCommand> for ProjectValidators {
    fn validate(&self, request: &SetProjectBudgetCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("ProjectId", request.project_id.as_uuid());
        budget(&mut v, &request.budget);
        v.into_errors()
    }
}

impl Validator<CancelProjectCommand> for ProjectValidators {
    fn validate(&self, request: &CancelProjectCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("ProjectId", request.project_id.as_uuid()).optional_text(
            "Reason",
            request.reason.as_deref(),
            MAX_REASON_LENGTH,
        );
        v.into_errors()
    }
}

macro_rules! project_id_validators {
    ($($request:ty),+ $(,)?) => {
        $(
            impl Validator<$request> for ProjectValidators {
                fn validate(&self, request: &$request) -> Vec<FieldError> {
                    let mut v = ValidationErrors::new();
                    v.id("ProjectId", request.project_id.as_uuid());
                    v.into_errors()
                }
            }
        )+
    };
}

project_id_validators!(
    ActivateProjectCommand,
    CompleteProjectCommand,
    DeleteProjectCommand,
    GetProjectByIdQuery,
);

impl Validator<GetProjectsQuery> for ProjectValidators {
    fn validate(&self, request: &GetProjectsQuery) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.paging(request.page, request.page_size, &self.settings);
        v.into_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::UserId;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn create() -> CreateProjectCommand {
        CreateProjectCommand {
            name: "Launch".into(),
            description: None,
            owner_id: UserId::new(),
            budget: Some(MoneyInput {
                amount: 10_000,
                currency: "USD".into(),
            }),
            start_date: date(3, 1),
            end_date: Some(date(6, 30)),
        }
    }

    #[test]
    fn valid_create_passes() {
        let validators = ProjectValidators::new(ApplicationSettings::default());
        assert!(validators.validate(&create()).is_empty());
    }

    #[test]
    fn create_collects_schedule_and_budget_errors() {
        let validators = ProjectValidators::new(ApplicationSettings::default());
        let command = CreateProjectCommand {
            name: String::new(),
            end_date: Some(date(2, 1)),
            budget: Some(MoneyInput {
                amount: -1,
                currency: "US".into(),
            }),
            ..create()
        };
        let fields: Vec<String> = validators
            .validate(&command)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["Name", "EndDate", "Budget", "Currency"]);
    }

    #[test]
    fn end_date_equal_to_start_is_rejected() {
        let validators = ProjectValidators::new(ApplicationSettings::default());
        let command = CreateProjectCommand {
            end_date: Some(date(3, 1)),
            ..create()
        };
        let errors = validators.validate(&command);
        assert_eq!(errors, vec![FieldError::new("EndDate", "End date must be after start date")]);
    }
}
