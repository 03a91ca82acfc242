//! GroupForge - constraint compliance for multi-session group assignment
//!
//! Given a problem (people, groups, sessions, constraints) and a concrete
//! assignment list, GroupForge reports per constraint whether it holds and
//! where it breaks, counts unique contacts, and backs a manual editor with
//! drop checks, undo/redo and debounced preview scoring.
//!
//! # Example
//!
//! ```rust
//! use groupforge::prelude::*;
//!
//! let problem = Problem::from_json_str(r#"{
//!     "people": [{"id": "a"}, {"id": "b"}, {"id": "c"}],
//!     "groups": [{"id": "g1", "size": 3}],
//!     "num_sessions": 2,
//!     "constraints": [{"type": "RepeatEncounter", "max_allowed_encounters": 1}]
//! }"#).unwrap();
//!
//! let assignments = vec![
//!     Assignment::new("a", "g1", 0),
//!     Assignment::new("b", "g1", 0),
//!     Assignment::new("a", "g1", 1),
//!     Assignment::new("b", "g1", 1),
//! ];
//!
//! let evaluation = evaluate_assignments(&problem, &assignments);
//! assert_eq!(evaluation.report.entries[0].violation_count, 1);
//! assert_eq!(evaluation.contacts.unique_contacts, 1);
//! ```

pub use groupforge_core::{
    dedupe_assignments, reassign, Assignment, AttributeBalance, BalanceMode, Constraint,
    ConstraintKind, Group, GroupForgeError, ImmovablePeople, ImmovablePerson, PenaltyFunction,
    Person, Problem, RepeatEncounter, Severity, ShouldNotBeTogether, StayTogether,
};

pub use groupforge_scoring::{
    evaluate_assignments, evaluate_compliance, validate_problem, ComplianceEvaluator,
    ComplianceReport, ComplianceSummary, ConstraintCompliance, ContactCounter, ContactMetrics,
    Evaluation, IndictmentMap, PersonIndictment, ProblemIssue, ProblemIssueKind, ScheduleIndex,
    Violation,
};

pub use groupforge_config::{
    ConfigError, EditMode, EditorConfig, EvaluationConfig, HistoryConfig, PreviewConfig,
};

pub use groupforge_editor::{
    AssignmentHistory, DropDecision, DropGuard, DropRejection, DropWarning, EditHistory,
    EditorError, EditorSession, LockState, PersonMove, PreviewCoordinator, PreviewInvalidator,
    PreviewKey, PreviewResult, PreviewState, PreviewStatus, PreviewTicket, ScoringError,
    ScoringService, Solution,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{Assignment, Constraint, Group, Person, Problem};
    pub use super::{evaluate_assignments, ComplianceReport, Evaluation, ScheduleIndex};
    pub use super::{EditMode, EditorConfig, EditorSession, PersonMove};
    pub use super::{PreviewCoordinator, PreviewStatus, ScoringService, Solution};
}
