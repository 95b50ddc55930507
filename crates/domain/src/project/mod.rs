//! Project aggregate and related types.

mod aggregate;
mod events;
mod state;

pub use aggregate::Project;
pub use events::ProjectEvent;
pub use state::ProjectStatus;
