use crate::mediator::Validator;
use crate::outcome::FieldError;
use crate::settings::ApplicationSettings;
use crate::validation::ValidationErrors;

use super::commands::{
    AssignTaskCommand, CompleteTaskCommand, CreateTaskCommand, DeleteTaskCommand,
    ReopenTaskCommand, StartTaskCommand, UnassignTaskCommand, UpdateTaskCommand,
};
use super::queries::{GetTaskByIdQuery, GetTasksQuery};

const MAX_TITLE_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Structural checks for task requests.
#[derive(Debug, Clone, Copy)]
pub struct TaskValidators {
    settings: ApplicationSettings,
}

impl TaskValidators {
    pub fn new(settings: ApplicationSettings) -> Self {
        Self { settings }
    }
}

impl Validator<CreateTaskCommand> for TaskValidators {
    fn validate(&self, request: &CreateTaskCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("ProjectId", request.project_id.as_uuid())
            .required_text("Title", &request.title, MAX_TITLE_LENGTH)
            .optional_text(
                "Description",
                request.description.as_deref(),
                MAX_DESCRIPTION_LENGTH,
            );
        if let Some(assignee_id) = request.assignee_id {
            v.id("AssigneeId", assignee_id.as_uuid());
        }
        v.into_errors()
    }
}

impl Validator<UpdateTaskCommand> for TaskValidators {
    fn validate(&self, request: &UpdateTaskCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("TaskId", request.task_id.as_uuid())
            .required_text("Title", &request.title, MAX_TITLE_LENGTH)
            .optional_text(
                "Description",
                request.description.as_deref(),
                MAX_DESCRIPTION_LENGTH,
            );
        v.into_errors()
    }
}

impl Validator<AssignTaskCommand> for TaskValidators {
    fn validate(&self, request: &AssignTaskCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("TaskId", request.task_id.as_uuid())
            .id("AssigneeId", request.assignee_id.as_uuid());
        v.into_errors()
    }
}

macro_rules! task_id_validators {
    ($($request:ty),+ $(,)?) => {
        $(
            impl Validator<$request> for TaskValidators {
                fn validate(&self, request: &$request) -> Vec<FieldError> {
                    let mut v = ValidationErrors::new();
                    v.id("TaskId", request.task_id.as_uuid());
                    v.into_errors()
                }
            }
        )+
    };
}

task_id_validators!(
    UnassignTaskCommand,
    StartTaskCommand,
    CompleteTaskCommand,
    ReopenTaskCommand,
    DeleteTaskCommand,
    GetTaskByIdQuery,
);

impl Validator<GetTasksQuery> for TaskValidators {
    fn validate(&self, request: &GetTasksQuery) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.paging(request.page, request.page_size, &self.settings);
        v.into_errors()
    }
}
