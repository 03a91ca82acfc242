//! Tests for EditorSession.

use std::future::{ready, Future};
use std::sync::Arc;

use groupforge_config::{ConfigError, EditMode, EditorConfig};
use groupforge_core::{Assignment, GroupForgeError, Problem};
use groupforge_scoring::ProblemIssueKind;
use groupforge_test::constraints::should_not_be_together;
use groupforge_test::{assignments, ProblemBuilder};

use crate::error::EditorError;
use crate::guard::DropRejection;
use crate::moves::PersonMove;
use crate::preview::{PreviewCoordinator, ScoringError, ScoringService, Solution};
use crate::session::EditorSession;

fn problem() -> Arc<Problem> {
    let problem = ProblemBuilder::new(2)
        .people(&["a", "b", "c"])
        .group("g1", 2)
        .group("g2", 2)
        .constraint(should_not_be_together(&["a", "b"], &[]))
        .build();
    Arc::new(problem)
}

fn start() -> Vec<Assignment> {
    assignments(&[
        ("a", "g1", 0),
        ("b", "g1", 0),
        ("c", "g2", 0),
        ("a", "g1", 1),
        ("b", "g2", 1),
        ("c", "g2", 1),
    ])
}

fn session(config: EditorConfig) -> EditorSession {
    EditorSession::new(problem(), start(), config).unwrap()
}

#[test]
fn test_initial_evaluation() {
    let session = session(EditorConfig::default());
    let entry = session.report().get(0).unwrap();

    assert!(!entry.satisfied);
    assert_eq!(entry.violation_count, 1);
    assert_eq!(session.evaluation().contacts.unique_contacts, 2);
    assert_eq!(session.index().members(0, "g1"), ["a", "b"]);
}

#[test]
fn test_move_commits_and_refreshes() {
    let mut session = session(EditorConfig::default());

    let decision = session.move_person(&PersonMove::new("b", "g2", 0)).unwrap();
    assert!(decision.ok);

    assert!(session.report().is_compliant());
    assert_eq!(session.index().members(0, "g2"), ["b", "c"]);
    assert_eq!(session.assignments().len(), 6);
    assert_eq!(session.history().undo_depth(), 1);
}

#[test]
fn test_rejected_move_leaves_state_untouched() {
    let mut session = session(EditorConfig::default().with_mode(EditMode::Strict));
    let before = session.assignments().to_vec();

    let err = session.move_person(&PersonMove::new("a", "g2", 1)).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Rejected(DropRejection::CapacityExceeded)
    ));
    assert_eq!(err.to_string(), "Move rejected: Capacity exceeded");

    assert_eq!(session.assignments(), before.as_slice());
    assert!(!session.history().can_undo());
}

#[test]
fn test_free_mode_allows_overfull_group_with_warning() {
    let mut session = session(EditorConfig::default().with_mode(EditMode::Strict));
    session.set_mode(EditMode::Free);

    let decision = session.move_person(&PersonMove::new("a", "g2", 1)).unwrap();
    assert_eq!(decision.warnings.len(), 1);
    assert_eq!(session.index().occupancy(1, "g2"), 3);
}

#[test]
fn test_session_out_of_range() {
    let mut session = session(EditorConfig::default());
    let err = session.move_person(&PersonMove::new("a", "g2", 5)).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Core(GroupForgeError::SessionOutOfRange {
            session: 5,
            num_sessions: 2
        })
    ));
}

#[test]
fn test_locked_person_rejected_in_any_mode() {
    let mut session = session(EditorConfig::default().with_mode(EditMode::Free));
    session.locks_mut().lock_person("b");

    let err = session.move_person(&PersonMove::new("b", "g2", 0)).unwrap_err();
    assert!(matches!(err, EditorError::Rejected(DropRejection::PersonLocked)));
    assert!(session.locks().is_person_locked("b"));
}

#[test]
fn test_undo_redo_restore_evaluation() {
    let mut session = session(EditorConfig::default());
    session.move_person(&PersonMove::new("b", "g2", 0)).unwrap();
    assert!(session.report().is_compliant());

    assert!(session.undo());
    assert!(!session.report().is_compliant());
    assert_eq!(session.assignments(), start().as_slice());

    assert!(session.redo());
    assert!(session.report().is_compliant());
    assert!(!session.redo());
}

#[test]
fn test_history_depth_from_config() {
    let mut session = session(EditorConfig::default().with_history_depth(1));
    session.move_person(&PersonMove::new("c", "g1", 1)).unwrap();
    session.move_person(&PersonMove::new("c", "g2", 1)).unwrap();

    assert_eq!(session.history().undo_depth(), 1);
    assert!(session.undo());
    assert!(!session.undo());
}

#[test]
fn test_zero_history_depth_is_rejected() {
    let config = EditorConfig::default().with_history_depth(0);
    let err = EditorSession::new(problem(), start(), config).unwrap_err();

    assert!(matches!(err, EditorError::Config(ConfigError::Invalid(_))));
    assert_eq!(
        err.to_string(),
        "Invalid configuration: history.max_depth must be at least 1"
    );
}

#[test]
fn test_dedupe_assignments_option() {
    let mut list = start();
    list.push(Assignment::new("a", "g2", 0));

    let raw = EditorSession::new(problem(), list.clone(), EditorConfig::default()).unwrap();
    assert!(raw.index().contains(0, "g1", "a"));
    assert!(raw.index().contains(0, "g2", "a"));

    let deduped = EditorSession::new(
        problem(),
        list,
        EditorConfig::default().with_dedupe_assignments(true),
    )
    .unwrap();
    assert!(!deduped.index().contains(0, "g1", "a"));
    assert!(deduped.index().contains(0, "g2", "a"));
    assert_eq!(deduped.assignments().len(), 7);
}

#[test]
fn test_validate_reports_ghosts() {
    let mut session = session(EditorConfig::default());
    let mut list = start();
    list.push(Assignment::new("ghost", "g1", 1));
    session.commit(list);

    let issues = session.validate();
    assert!(issues
        .iter()
        .any(|issue| issue.kind == ProblemIssueKind::UnknownPerson));
}

struct NullScorer;

impl ScoringService for NullScorer {
    fn evaluate(
        &self,
        _problem: Arc<Problem>,
        _assignments: Vec<Assignment>,
    ) -> impl Future<Output = Result<Solution, ScoringError>> + Send {
        ready(Ok(Solution::default()))
    }
}

#[test]
fn test_commit_undo_redo_invalidate_preview() {
    let mut session = session(EditorConfig::default());
    let coordinator = PreviewCoordinator::new(NullScorer, session.problem_arc());
    session.attach_preview(coordinator.invalidator());

    session.move_person(&PersonMove::new("b", "g2", 0)).unwrap();
    assert_eq!(coordinator.generation(), 1);

    session.undo();
    session.redo();
    assert_eq!(coordinator.generation(), 3);

    // Underflow does not touch the preview.
    session.redo();
    assert_eq!(coordinator.generation(), 3);
}
