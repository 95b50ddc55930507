use crate::mediator::Validator;
use crate::outcome::FieldError;
use crate::validation::ValidationErrors;

use super::commands::{AddCommentCommand, DeleteCommentCommand, EditCommentCommand};
use super::queries::GetCommentsByTaskQuery;

const MAX_CONTENT_LENGTH: usize = 2000;

/// Structural checks for comment requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentValidators;

impl Validator<AddCommentCommand> for CommentValidators {
    fn validate(&self, request: &AddCommentCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("TaskId", request.task_id.as_uuid())
            .id("AuthorId", request.author_id.as_uuid())
            .required_text("Content", &request.content, MAX_CONTENT_LENGTH);
        if let Some(parent_id) = request.parent_id {
            v.id("ParentId", parent_id.as_uuid());
        }
        v.into_errors()
    }
}

impl Validator<EditCommentCommand> for CommentValidators {
    fn validate(&self, request: &EditCommentCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("CommentId", request.comment_id.as_uuid())
            .required_text("Content", &request.content, MAX_CONTENT_LENGTH);
        v.into_errors()
    }
}

impl Validator<DeleteCommentCommand> for CommentValidators {
    fn validate(&self, request: &DeleteCommentCommand) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("CommentId", request.comment_id.as_uuid());
        v.into_errors()
    }
}

impl Validator<GetCommentsByTaskQuery> for CommentValidators {
    fn validate(&self, request: &GetCommentsByTaskQuery) -> Vec<FieldError> {
        let mut v = ValidationErrors::new();
        v.id("TaskId", request.task_id.as_uuid());
        v.into_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{CommentId, TaskId, UserId};

    #[test]
    fn blank_content_is_rejected() {
        let errors = CommentValidators.validate(&AddCommentCommand {
            task_id: TaskId::new(),
            author_id: UserId::new(),
            content: "   ".into(),
            parent_id: Some(CommentId::new()),
        });
        assert_eq!(errors, vec![FieldError::new("Content", "Content is required")]);
    }
}
