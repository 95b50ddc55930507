use chrono::{DateTime, Utc};
use common::{CommentId, TaskId, UserId, Version};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateRoot;
use crate::error::{DomainError, required_text};

use super::CommentEvent;

const MAX_CONTENT_LENGTH: usize = 2000;

/// A comment on a task, optionally replying to another comment of the same task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,

    #[serde(default)]
    version: Version,

    content: String,
    task_id: TaskId,
    author_id: UserId,
    parent_id: Option<CommentId>,
    reply_ids: Vec<CommentId>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    events: Vec<CommentEvent>,
}

impl AggregateRoot for Comment {
    type Id = CommentId;
    type Event = CommentEvent;

    fn aggregate_type() -> &'static str {
        "Comment"
    }

    fn id(&self) -> CommentId {
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

    fn domain_events(&self) -> &[CommentEvent] {
        &self.events
    }

    fn clear_domain_events(&mut self) {
        self.events.clear();
    }
}

impl Comment {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }

    pub fn reply_ids(&self) -> &[CommentId] {
        &self.reply_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Creates a top-level comment on a task.
    pub fn create(task_id: TaskId, author_id: UserId, content: &str) -> Result<Comment, DomainError> {
        Self::new(task_id, author_id, content, None)
    }

    /// Creates a reply to `parent`, which must belong to the same task.
    ///
    /// The parent records the reply id and raises its own event, so both
    /// comments have to be persisted.
    pub fn reply(
        task_id: TaskId,
        author_id: UserId,
        content: &str,
        parent: &mut Comment,
    ) -> Result<Comment, DomainError> {
        parent.ensure_not_deleted()?;
        if parent.task_id != task_id {
            return Err(DomainError::ParentTaskMismatch);
        }
        let reply = Self::new(task_id, author_id, content, Some(parent.id))?;

        let now = parent.touch();
        parent.reply_ids.push(reply.id);
        parent.events.push(CommentEvent::ReplyAdded {
            comment_id: parent.id,
            reply_id: reply.id,
            occurred_at: now,
        });
        Ok(reply)
    }

    fn new(
        task_id: TaskId,
        author_id: UserId,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> Result<Comment, DomainError> {
        let content = required_text("Content", content, MAX_CONTENT_LENGTH)?;
        let now = Utc::now();
        let id = CommentId::new();
        let mut comment = Comment {
            id,
            version: Version::initial(),
            content,
            task_id,
            author_id,
            parent_id,
            reply_ids: Vec::new(),
            created_at: now,
            updated_at: None,
            is_deleted: false,
            deleted_at: None,
            events: Vec::new(),
        };
        comment.events.push(CommentEvent::Added {
            comment_id: id,
            task_id,
            author_id,
            parent_id,
            occurred_at: now,
        });
        Ok(comment)
    }

    pub fn edit(&mut self, content: &str) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        let content = required_text("Content", content, MAX_CONTENT_LENGTH)?;
        let now = self.touch();
        self.content = content.clone();
        self.events.push(CommentEvent::Edited {
            comment_id: self.id,
            content,
            occurred_at: now,
        });
        Ok(())
    }

    pub fn delete(&mut self) -> Result<(), DomainError> {
        self.ensure_not_deleted()?;
        let now = self.touch();
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.events.push(CommentEvent::Deleted {
            comment_id: self.id,
            occurred_at: now,
        });
        Ok(())
    }

    fn ensure_not_deleted(&self) -> Result<(), DomainError> {
        if self.is_deleted {
            return Err(DomainError::Deleted { entity: "Comment" });
        }
        Ok(())
    }

    fn touch(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.updated_at = Some(now);
        now
    }
}
