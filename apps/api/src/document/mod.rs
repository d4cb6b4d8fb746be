// Editing side of the résumé document: section order controller, content mutators,
// the skills list view and the in-memory session that hands out snapshots.

pub mod demo;
pub mod handlers;
pub mod mutators;
pub mod order;
pub mod session;
pub mod skills;

pub use mutators::{DocumentEdit, EditError};
pub use session::EditorSession;
