//! Drop checks for manual single-person moves.
//!
//! Checks run in a fixed order and the first veto wins:
//! 1. the person is locked
//! 2. the target group is locked
//! 3. the target group would exceed its size (vetoes only in strict mode)
//! 4. an immovable constraint pins the person elsewhere (vetoes only in strict mode)
//!
//! Outside strict mode, checks 3 and 4 produce warnings instead. A move into a
//! session the person does not attend always produces a warning.

use std::collections::HashSet;
use std::fmt;

use groupforge_config::EditMode;
use groupforge_core::Problem;
use groupforge_scoring::ScheduleIndex;
use thiserror::Error;
use tracing::debug;

use crate::moves::PersonMove;

/// People and groups the user has locked against edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockState {
    pub people: HashSet<String>,
    pub groups: HashSet<String>,
}

impl LockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock_person(&mut self, person_id: impl Into<String>) {
        self.people.insert(person_id.into());
    }

    pub fn unlock_person(&mut self, person_id: &str) {
        self.people.remove(person_id);
    }

    pub fn lock_group(&mut self, group_id: impl Into<String>) {
        self.groups.insert(group_id.into());
    }

    pub fn unlock_group(&mut self, group_id: &str) {
        self.groups.remove(group_id);
    }

    pub fn is_person_locked(&self, person_id: &str) -> bool {
        self.people.contains(person_id)
    }

    pub fn is_group_locked(&self, group_id: &str) -> bool {
        self.groups.contains(group_id)
    }
}

/// Why a drop was vetoed. The display text is the user-facing reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DropRejection {
    #[error("Person locked")]
    PersonLocked,
    #[error("Group locked")]
    GroupLocked,
    #[error("Capacity exceeded")]
    CapacityExceeded,
    #[error("Immovable constraint")]
    ImmovableConstraint,
}

/// A permitted drop the caller should flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropWarning {
    CapacityExceeded {
        group_id: String,
        occupancy: usize,
        size: usize,
    },
    Immovable {
        constraint_index: usize,
        required_group: String,
    },
    IneligibleSession {
        session: usize,
    },
}

impl fmt::Display for DropWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropWarning::CapacityExceeded {
                group_id,
                occupancy,
                size,
            } => write!(f, "Group {group_id} would hold {occupancy} of {size}"),
            DropWarning::Immovable { required_group, .. } => {
                write!(f, "Person is pinned to {required_group}")
            }
            DropWarning::IneligibleSession { session } => {
                write!(f, "Person does not attend session {session}")
            }
        }
    }
}

/// Outcome of a drop check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDecision {
    pub ok: bool,
    pub reason: Option<DropRejection>,
    pub warnings: Vec<DropWarning>,
}

impl DropDecision {
    fn allowed(warnings: Vec<DropWarning>) -> Self {
        Self {
            ok: true,
            reason: None,
            warnings,
        }
    }

    fn rejected(reason: DropRejection, warnings: Vec<DropWarning>) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
            warnings,
        }
    }

    /// The rejection reason as display text.
    pub fn reason_text(&self) -> Option<String> {
        self.reason.map(|r| r.to_string())
    }
}

/// Checks moves against locks, capacity and immovable constraints.
///
/// The guard is a pure function of the move, the mode, the locks, the problem
/// and the current schedule; it never mutates anything.
///
/// # Example
///
/// ```
/// use groupforge_core::{Assignment, Group, Person, Problem};
/// use groupforge_editor::{DropGuard, EditMode, LockState, PersonMove};
/// use groupforge_scoring::ScheduleIndex;
///
/// let problem = Problem::new(
///     vec![Person::new("a"), Person::new("b"), Person::new("c")],
///     vec![Group::new("g", 2)],
///     1,
/// );
/// let index = ScheduleIndex::build(&[Assignment::new("a", "g", 0), Assignment::new("b", "g", 0)]);
/// let locks = LockState::new();
/// let drop_c = PersonMove::new("c", "g", 0);
///
/// let strict = DropGuard::new(&problem, &index, &locks, EditMode::Strict).can_drop(&drop_c);
/// assert!(!strict.ok);
/// assert_eq!(strict.reason_text().as_deref(), Some("Capacity exceeded"));
///
/// let free = DropGuard::new(&problem, &index, &locks, EditMode::Free).can_drop(&drop_c);
/// assert!(free.ok);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DropGuard<'a> {
    problem: &'a Problem,
    index: &'a ScheduleIndex,
    locks: &'a LockState,
    mode: EditMode,
}

impl<'a> DropGuard<'a> {
    pub fn new(
        problem: &'a Problem,
        index: &'a ScheduleIndex,
        locks: &'a LockState,
        mode: EditMode,
    ) -> Self {
        Self {
            problem,
            index,
            locks,
            mode,
        }
    }

    /// Decides whether `mv` may be dropped.
    pub fn can_drop(&self, mv: &PersonMove) -> DropDecision {
        let decision = self.check(mv);
        if let Some(reason) = decision.reason {
            debug!(
                event = "drop_rejected",
                person = %mv.person_id,
                group = %mv.group_id,
                session = mv.session,
                reason = %reason,
            );
        }
        decision
    }

    fn check(&self, mv: &PersonMove) -> DropDecision {
        let mut warnings = Vec::new();

        if self.locks.is_person_locked(&mv.person_id) {
            return DropDecision::rejected(DropRejection::PersonLocked, warnings);
        }
        if self.locks.is_group_locked(&mv.group_id) {
            return DropDecision::rejected(DropRejection::GroupLocked, warnings);
        }

        if let Some(person) = self.problem.person(&mv.person_id) {
            if !person.attends(mv.session) {
                warnings.push(DropWarning::IneligibleSession {
                    session: mv.session,
                });
            }
        }

        if let Some(group) = self.problem.group(&mv.group_id) {
            let occupancy = self.hypothetical_occupancy(mv);
            if occupancy > group.size {
                if self.mode.is_strict() {
                    return DropDecision::rejected(DropRejection::CapacityExceeded, warnings);
                }
                warnings.push(DropWarning::CapacityExceeded {
                    group_id: group.id.clone(),
                    occupancy,
                    size: group.size,
                });
            }
        }

        for (constraint_index, constraint) in self.problem.constraints.iter().enumerate() {
            let Some(required) = constraint.required_group(self.problem, &mv.person_id, mv.session)
            else {
                continue;
            };
            if required == mv.group_id {
                continue;
            }
            if self.mode.is_strict() {
                return DropDecision::rejected(DropRejection::ImmovableConstraint, warnings);
            }
            warnings.push(DropWarning::Immovable {
                constraint_index,
                required_group: required.to_string(),
            });
        }

        DropDecision::allowed(warnings)
    }

    /// Occupancy of the target group if the move were applied.
    fn hypothetical_occupancy(&self, mv: &PersonMove) -> usize {
        let current = self.index.occupancy(mv.session, &mv.group_id);
        if self.index.contains(mv.session, &mv.group_id, &mv.person_id) {
            current
        } else {
            current + 1
        }
    }
}
