//! Shared types for the task-management core.

pub mod paging;
pub mod types;

pub use paging::{PageRequest, PagedResult};
pub use types::{CommentId, ProjectId, TaskId, UserId, Version};
