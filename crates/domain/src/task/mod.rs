//! Task aggregate and related types.

mod aggregate;
mod events;
mod state;

pub use aggregate::TaskItem;
pub use events::TaskEvent;
pub use state::TaskStatus;
