//! Comment aggregate.

mod aggregate;
mod events;

pub use aggregate::Comment;
pub use events::CommentEvent;
