//! Manual editing support for GroupForge.
//!
//! This crate backs drag-and-drop editing of an assignment list:
//! - [`DropGuard`] decides whether a single-person move is allowed
//! - [`EditHistory`] keeps undo/redo snapshots
//! - [`PreviewCoordinator`] scores hovered moves through an external
//!   [`ScoringService`], showing only the most recently issued result
//! - [`EditorSession`] wires guard, history and compliance evaluation together

pub mod error;
pub mod guard;
pub mod history;
pub mod moves;
pub mod preview;
pub mod session;

#[cfg(test)]
mod guard_tests;
#[cfg(test)]
mod session_tests;

pub use error::EditorError;
pub use guard::{DropDecision, DropGuard, DropRejection, DropWarning, LockState};
pub use history::{AssignmentHistory, EditHistory};
pub use moves::PersonMove;
pub use preview::{
    PreviewCoordinator, PreviewInvalidator, PreviewKey, PreviewResult, PreviewState,
    PreviewStatus, PreviewTicket, ScoringError, ScoringService, Solution,
};
pub use session::EditorSession;

pub use groupforge_config::EditMode;
