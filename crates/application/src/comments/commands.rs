use common::{CommentId, TaskId, UserId};
use serde::{Deserialize, Serialize};

use crate::dto::CommentDto;
use crate::mediator::commands;

/// Adds a comment to a task, or a reply when `parent_id` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCommentCommand {
    pub task_id: TaskId,
    pub author_id: UserId,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCommentCommand {
    pub comment_id: CommentId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCommentCommand {
    pub comment_id: CommentId,
}

commands! {
    AddCommentCommand => CommentDto,
    EditCommentCommand => CommentDto,
    DeleteCommentCommand => (),
}
