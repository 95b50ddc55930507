use common::TaskId;
use serde::{Deserialize, Serialize};

use crate::dto::CommentDto;
use crate::mediator::queries;

/// Comments of a task in the order they were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCommentsByTaskQuery {
    pub task_id: TaskId,
}

queries! {
    GetCommentsByTaskQuery => Vec<CommentDto>,
}
