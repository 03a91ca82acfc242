//! Tests for DropGuard.

use groupforge_config::EditMode;
use groupforge_core::{Person, Problem};
use groupforge_scoring::ScheduleIndex;
use groupforge_test::constraints::{immovable_people, immovable_person};
use groupforge_test::{session, ProblemBuilder};

use crate::guard::*;
use crate::moves::PersonMove;

fn problem() -> Problem {
    ProblemBuilder::new(2)
        .people(&["a", "b", "c", "d"])
        .group("g1", 2)
        .group("g2", 3)
        .constraint(immovable_person("d", "g2", &[1]))
        .build()
}

fn full_g1() -> ScheduleIndex {
    ScheduleIndex::build(&session(0, &[("g1", &["a", "b"]), ("g2", &["c"])]))
}

fn check(
    problem: &Problem,
    index: &ScheduleIndex,
    locks: &LockState,
    mode: EditMode,
    mv: PersonMove,
) -> DropDecision {
    DropGuard::new(problem, index, locks, mode).can_drop(&mv)
}

#[test]
fn test_strict_capacity_rejects() {
    let (problem, index, locks) = (problem(), full_g1(), LockState::new());
    let decision = check(&problem, &index, &locks, EditMode::Strict, PersonMove::new("c", "g1", 0));

    assert!(!decision.ok);
    assert_eq!(decision.reason, Some(DropRejection::CapacityExceeded));
    assert_eq!(decision.reason_text().as_deref(), Some("Capacity exceeded"));
}

#[test]
fn test_free_and_warn_capacity_allow_with_warning() {
    let (problem, index, locks) = (problem(), full_g1(), LockState::new());
    for mode in [EditMode::Free, EditMode::Warn] {
        let decision = check(&problem, &index, &locks, mode, PersonMove::new("c", "g1", 0));
        assert!(decision.ok);
        assert_eq!(decision.reason, None);
        assert_eq!(
            decision.warnings,
            vec![DropWarning::CapacityExceeded {
                group_id: "g1".to_string(),
                occupancy: 3,
                size: 2,
            }]
        );
    }
}

#[test]
fn test_member_of_full_group_can_be_dropped_in_place() {
    let (problem, index, locks) = (problem(), full_g1(), LockState::new());
    let decision = check(&problem, &index, &locks, EditMode::Strict, PersonMove::new("a", "g1", 0));
    assert!(decision.ok);
    assert!(decision.warnings.is_empty());
}

#[test]
fn test_locks_checked_first() {
    let (problem, index) = (problem(), full_g1());
    let mut locks = LockState::new();
    locks.lock_person("c");
    locks.lock_group("g1");

    let decision = check(&problem, &index, &locks, EditMode::Free, PersonMove::new("c", "g1", 0));
    assert_eq!(decision.reason, Some(DropRejection::PersonLocked));

    locks.unlock_person("c");
    let decision = check(&problem, &index, &locks, EditMode::Free, PersonMove::new("c", "g1", 0));
    assert_eq!(decision.reason, Some(DropRejection::GroupLocked));

    locks.unlock_group("g1");
    assert!(!locks.is_group_locked("g1"));
}

#[test]
fn test_immovable_only_in_scope_sessions() {
    let (problem, index, locks) = (problem(), full_g1(), LockState::new());

    // Pinned to g2 in session 1 only.
    let session_zero = check(&problem, &index, &locks, EditMode::Strict, PersonMove::new("d", "g1", 0));
    assert_eq!(session_zero.reason, Some(DropRejection::CapacityExceeded));

    let index = ScheduleIndex::build(&[]);
    let session_one = check(&problem, &index, &locks, EditMode::Strict, PersonMove::new("d", "g1", 1));
    assert_eq!(session_one.reason, Some(DropRejection::ImmovableConstraint));

    let to_required = check(&problem, &index, &locks, EditMode::Strict, PersonMove::new("d", "g2", 1));
    assert!(to_required.ok);
}

#[test]
fn test_immovable_warns_outside_strict() {
    let problem = ProblemBuilder::new(1)
        .people(&["a"])
        .group("g1", 5)
        .group("g2", 5)
        .constraint(immovable_people(&["a"], "g2", &[]))
        .build();
    let index = ScheduleIndex::build(&[]);
    let locks = LockState::new();

    let decision = check(&problem, &index, &locks, EditMode::Warn, PersonMove::new("a", "g1", 0));
    assert!(decision.ok);
    assert_eq!(
        decision.warnings,
        vec![DropWarning::Immovable {
            constraint_index: 0,
            required_group: "g2".to_string(),
        }]
    );
}

#[test]
fn test_ineligible_session_warns() {
    let problem = ProblemBuilder::new(2)
        .add_person(Person::new("a").with_sessions([0]))
        .group("g1", 5)
        .build();
    let index = ScheduleIndex::build(&[]);
    let locks = LockState::new();

    let decision = check(&problem, &index, &locks, EditMode::Strict, PersonMove::new("a", "g1", 1));
    assert!(decision.ok);
    assert_eq!(
        decision.warnings,
        vec![DropWarning::IneligibleSession { session: 1 }]
    );
}

#[test]
fn test_unknown_group_has_no_capacity_check() {
    let (problem, index, locks) = (problem(), full_g1(), LockState::new());
    let decision = check(&problem, &index, &locks, EditMode::Strict, PersonMove::new("a", "overflow", 0));
    assert!(decision.ok);
}
