//! Comment domain events.

use chrono::{DateTime, Utc};
use common::{CommentId, TaskId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::DomainEvent;

/// Events raised by the comment aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CommentEvent {
    Added {
        comment_id: CommentId,
        task_id: TaskId,
        author_id: UserId,
        parent_id: Option<CommentId>,
        occurred_at: DateTime<Utc>,
    },

    /// A reply was attached to this comment.
    ReplyAdded {
        comment_id: CommentId,
        reply_id: CommentId,
        occurred_at: DateTime<Utc>,
    },

    Edited {
        comment_id: CommentId,
        content: String,
        occurred_at: DateTime<Utc>,
    },

    Deleted {
        comment_id: CommentId,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent for CommentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CommentEvent::Added { .. } => "CommentAdded",
            CommentEvent::ReplyAdded { .. } => "CommentReplyAdded",
            CommentEvent::Edited { .. } => "CommentEdited",
            CommentEvent::Deleted { .. } => "CommentDeleted",
        }
    }

    fn aggregate_id(&self) -> Uuid {
        match self {
            CommentEvent::Added { comment_id, .. }
            | CommentEvent::ReplyAdded { comment_id, .. }
            | CommentEvent::Edited { comment_id, .. }
            | CommentEvent::Deleted { comment_id, .. } => comment_id.as_uuid(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CommentEvent::Added { occurred_at, .. }
            | CommentEvent::ReplyAdded { occurred_at, .. }
            | CommentEvent::Edited { occurred_at, .. }
            | CommentEvent::Deleted { occurred_at, .. } => *occurred_at,
        }
    }
}
