//! Live what-if scoring of hovered moves.
//!
//! While the user drags a person over a group, [`PreviewCoordinator::hover`]
//! builds the hypothetical assignment list and, after a debounce delay, hands
//! it to the external [`ScoringService`]. Responses can arrive in any order;
//! only the most recently issued request may publish its result.

mod coordinator;
mod service;


pub use coordinator::{
    PreviewCoordinator, PreviewInvalidator, PreviewKey, PreviewResult, PreviewState,
    PreviewStatus, PreviewTicket,
};
pub use service::{ScoringError, ScoringService, Solution};
