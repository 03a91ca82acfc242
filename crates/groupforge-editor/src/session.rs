//! The editing data flow.
//!
//! A move runs through the drop guard, is committed to history, and the
//! schedule index and evaluation are rebuilt from the new assignment list.

use std::sync::Arc;

use groupforge_config::{EditMode, EditorConfig};
use groupforge_core::{dedupe_assignments, Assignment, Problem};
use groupforge_scoring::{
    evaluate_compliance, validate_problem, ComplianceReport, ContactCounter, Evaluation,
    ProblemIssue, ScheduleIndex,
};
use tracing::debug;

use crate::error::EditorError;
use crate::guard::{DropDecision, DropGuard, LockState};
use crate::history::AssignmentHistory;
use crate::moves::PersonMove;
use crate::preview::PreviewInvalidator;

/// Committed editing state for one problem.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use groupforge_config::EditorConfig;
/// use groupforge_core::{Assignment, Group, Person, Problem};
/// use groupforge_editor::{EditorSession, PersonMove};
///
/// let problem = Problem::new(
///     vec![Person::new("a"), Person::new("b")],
///     vec![Group::new("g1", 2), Group::new("g2", 2)],
///     1,
/// );
/// let start = vec![Assignment::new("a", "g1", 0), Assignment::new("b", "g1", 0)];
/// let mut session =
///     EditorSession::new(Arc::new(problem), start, EditorConfig::default()).unwrap();
/// assert_eq!(session.evaluation().contacts.unique_contacts, 1);
///
/// session.move_person(&PersonMove::new("b", "g2", 0)).unwrap();
/// assert_eq!(session.evaluation().contacts.unique_contacts, 0);
///
/// session.undo();
/// assert_eq!(session.evaluation().contacts.unique_contacts, 1);
/// ```
#[derive(Debug)]
pub struct EditorSession {
    problem: Arc<Problem>,
    config: EditorConfig,
    locks: LockState,
    history: AssignmentHistory,
    index: ScheduleIndex,
    evaluation: Evaluation,
    preview: Option<PreviewInvalidator>,
}

impl EditorSession {
    /// Starts a session on `assignments`.
    ///
    /// # Errors
    ///
    /// [`EditorError::Config`] if `config` fails validation, e.g. a zero
    /// history depth set through the builder.
    pub fn new(
        problem: Arc<Problem>,
        assignments: Vec<Assignment>,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        config.validate()?;
        let history = AssignmentHistory::new(assignments).with_max_depth(config.history.max_depth);
        let mut session = Self {
            problem,
            config,
            locks: LockState::new(),
            history,
            index: ScheduleIndex::default(),
            evaluation: Evaluation::default(),
            preview: None,
        };
        session.refresh();
        Ok(session)
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn problem_arc(&self) -> Arc<Problem> {
        Arc::clone(&self.problem)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The committed assignment list, as given (duplicates included).
    pub fn assignments(&self) -> &[Assignment] {
        self.history.current()
    }

    pub fn index(&self) -> &ScheduleIndex {
        &self.index
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn report(&self) -> &ComplianceReport {
        &self.evaluation.report
    }

    pub fn history(&self) -> &AssignmentHistory {
        &self.history
    }

    pub fn locks(&self) -> &LockState {
        &self.locks
    }

    pub fn locks_mut(&mut self) -> &mut LockState {
        &mut self.locks
    }

    pub fn mode(&self) -> EditMode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.config.mode = mode;
    }

    /// Commits, undo and redo will supersede previews through `invalidator`.
    pub fn attach_preview(&mut self, invalidator: PreviewInvalidator) {
        self.preview = Some(invalidator);
    }

    /// Runs the drop guard against the committed state without applying.
    pub fn check_move(&self, mv: &PersonMove) -> DropDecision {
        DropGuard::new(&self.problem, &self.index, &self.locks, self.config.mode).can_drop(mv)
    }

    /// Checks and applies `mv`.
    ///
    /// Returns the guard's decision so callers can surface its warnings.
    ///
    /// # Errors
    ///
    /// [`EditorError::Core`] if the session index is out of range and
    /// [`EditorError::Rejected`] if the guard vetoes the move.
    pub fn move_person(&mut self, mv: &PersonMove) -> Result<DropDecision, EditorError> {
        self.problem.check_session(mv.session)?;
        let decision = self.check_move(mv);
        if let Some(reason) = decision.reason {
            return Err(EditorError::Rejected(reason));
        }

        let next = mv.apply(self.history.current());
        self.commit(next);
        debug!(
            event = "move_committed",
            person = %mv.person_id,
            group = %mv.group_id,
            session = mv.session,
            warnings = decision.warnings.len(),
        );
        Ok(decision)
    }

    /// Replaces the whole assignment list, e.g. with a solver result.
    pub fn commit(&mut self, assignments: Vec<Assignment>) {
        self.history.commit(assignments);
        self.invalidate_preview();
        self.refresh();
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo();
        if changed {
            self.invalidate_preview();
            self.refresh();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo();
        if changed {
            self.invalidate_preview();
            self.refresh();
        }
        changed
    }

    /// Structural problems in the problem and the committed assignments.
    pub fn validate(&self) -> Vec<ProblemIssue> {
        validate_problem(&self.problem, self.history.current())
    }

    fn invalidate_preview(&self) {
        if let Some(preview) = &self.preview {
            preview.invalidate();
        }
    }

    fn refresh(&mut self) {
        let current = self.history.current();
        self.index = if self.config.evaluation.dedupe_assignments {
            ScheduleIndex::build(&dedupe_assignments(current))
        } else {
            ScheduleIndex::build(current)
        };
        self.evaluation = Evaluation {
            report: evaluate_compliance(&self.problem, &self.index),
            contacts: ContactCounter::new(&self.index).metrics(self.problem.people.len()),
        };
    }
}
