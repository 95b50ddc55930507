use std::sync::Arc;

use async_trait::async_trait;
use domain::{Comment, UnitOfWorkFactory};
use tokio_util::sync::CancellationToken;

use crate::dto::CommentDto;
use crate::error::ApplicationResult;
use crate::mediator::RequestHandler;
use crate::outcome::Outcome;
use crate::try_outcome;

use super::commands::{AddCommentCommand, DeleteCommentCommand, EditCommentCommand};
use super::queries::GetCommentsByTaskQuery;

/// Handles every comment command and query.
#[derive(Clone)]
pub struct CommentHandlers {
    uow: Arc<dyn UnitOfWorkFactory>,
}

impl CommentHandlers {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl RequestHandler<AddCommentCommand> for CommentHandlers {
    #[tracing::instrument(name = "add_comment", skip_all, fields(task_id = %request.task_id))]
    async fn handle(
        &self,
        request: AddCommentCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<CommentDto>> {
        let uow = self.uow.begin();
        if uow.tasks().get_by_id(request.task_id, cancel).await?.is_none() {
            return Ok(Outcome::not_found("Task"));
        }
        if uow.users().get_by_id(request.author_id, cancel).await?.is_none() {
            return Ok(Outcome::not_found("User"));
        }

        let comment = match request.parent_id {
            Some(parent_id) => {
                let Some(mut parent) = uow.comments().get_by_id(parent_id, cancel).await? else {
                    return Ok(Outcome::not_found("Comment"));
                };
                let reply = try_outcome!(Comment::reply(
                    request.task_id,
                    request.author_id,
                    &request.content,
                    &mut parent,
                ));
                uow.comments().update(parent, cancel).await?;
                reply
            }
            None => try_outcome!(Comment::create(
                request.task_id,
                request.author_id,
                &request.content,
            )),
        };

        let dto = CommentDto::from(&comment);
        uow.comments().add(comment, cancel).await?;
        uow.save_changes(cancel).await?;
        Ok(Outcome::Success(dto))
    }
}

#[async_trait]
impl RequestHandler<EditCommentCommand> for CommentHandlers {
    #[tracing::instrument(name = "edit_comment", skip_all, fields(comment_id = %request.comment_id))]
    async fn handle(
        &self,
        request: EditCommentCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<CommentDto>> {
        let uow = self.uow.begin();
        let Some(mut comment) = uow.comments().get_by_id(request.comment_id, cancel).await? else {
            return Ok(Outcome::not_found("Comment"));
        };
        try_outcome!(comment.edit(&request.content));

        let dto = CommentDto::from(&comment);
        uow.comments().update(comment, cancel).await?;
        uow.save_changes(cancel).await?;
        Ok(Outcome::Success(dto))
    }
}

#[async_trait]
impl RequestHandler<DeleteCommentCommand> for CommentHandlers {
    #[tracing::instrument(name = "delete_comment", skip_all, fields(comment_id = %request.comment_id))]
    async fn handle(
        &self,
        request: DeleteCommentCommand,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome> {
        let uow = self.uow.begin();
        let Some(mut comment) = uow.comments().get_by_id(request.comment_id, cancel).await? else {
            return Ok(Outcome::not_found("Comment"));
        };
        try_outcome!(comment.delete());
        uow.comments().delete(comment, cancel).await?;
        uow.save_changes(cancel).await?;
        Ok(Outcome::ok())
    }
}

#[async_trait]
impl RequestHandler<GetCommentsByTaskQuery> for CommentHandlers {
    #[tracing::instrument(name = "get_comments_by_task", skip_all, fields(task_id = %request.task_id))]
    async fn handle(
        &self,
        request: GetCommentsByTaskQuery,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<Vec<CommentDto>>> {
        let uow = self.uow.begin();
        if uow.tasks().get_by_id(request.task_id, cancel).await?.is_none() {
            return Ok(Outcome::not_found("Task"));
        }
        let comments = uow.comments().list_by_task(request.task_id, cancel).await?;
        Ok(Outcome::Success(comments.iter().map(CommentDto::from).collect()))
    }
}
