//! Structural diagnostics for problems and assignment lists.
//!
//! The evaluator tolerates ghosts, duplicates and overfull groups; this
//! module reports them so callers can decide what to surface. Detects:
//! - Duplicate person or group ids
//! - Groups without capacity, problems without sessions
//! - Assignments or constraints naming unknown people or groups
//! - Assignments outside `0..num_sessions` or in sessions a person skips
//! - More than one assignment per person and session
//! - Groups holding more people than their size

use std::collections::{BTreeMap, HashMap, HashSet};

use groupforge_core::{Assignment, Constraint, Problem};

/// A detected issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemIssue {
    /// Issue category.
    pub kind: ProblemIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of problem issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemIssueKind {
    /// Two people or two groups share an id.
    DuplicateId,
    /// A group has size zero.
    EmptyGroup,
    /// The problem declares no sessions.
    NoSessions,
    /// An assignment or constraint names a person not in the problem.
    UnknownPerson,
    /// An assignment or constraint names a group not in the problem.
    UnknownGroup,
    /// An assignment uses a session index outside the problem.
    SessionOutOfRange,
    /// A person has more than one assignment in a session.
    DuplicateAssignment,
    /// A group holds more people than its size in a session.
    CapacityExceeded,
    /// A person is assigned in a session they do not attend.
    IneligibleSession,
}

impl ProblemIssue {
    fn new(kind: ProblemIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks a problem and an assignment list for structural issues.
///
/// Returns every issue found, in check order; an empty list means clean.
///
/// # Example
///
/// ```
/// use groupforge_core::{Assignment, Group, Person, Problem};
/// use groupforge_scoring::{validate_problem, ProblemIssueKind};
///
/// let problem = Problem::new(vec![Person::new("a")], vec![Group::new("g", 1)], 1);
/// let issues = validate_problem(&problem, &[Assignment::new("ghost", "g", 0)]);
///
/// assert_eq!(issues.len(), 1);
/// assert_eq!(issues[0].kind, ProblemIssueKind::UnknownPerson);
/// ```
pub fn validate_problem(problem: &Problem, assignments: &[Assignment]) -> Vec<ProblemIssue> {
    let mut issues = Vec::new();

    if problem.num_sessions == 0 {
        issues.push(ProblemIssue::new(
            ProblemIssueKind::NoSessions,
            "Problem has no sessions",
        ));
    }

    let mut person_ids = HashSet::new();
    for person in &problem.people {
        if !person_ids.insert(person.id.as_str()) {
            issues.push(ProblemIssue::new(
                ProblemIssueKind::DuplicateId,
                format!("Duplicate person ID: {}", person.id),
            ));
        }
    }

    let mut group_sizes: HashMap<&str, usize> = HashMap::new();
    for group in &problem.groups {
        if group_sizes.insert(group.id.as_str(), group.size).is_some() {
            issues.push(ProblemIssue::new(
                ProblemIssueKind::DuplicateId,
                format!("Duplicate group ID: {}", group.id),
            ));
        }
        if group.size == 0 {
            issues.push(ProblemIssue::new(
                ProblemIssueKind::EmptyGroup,
                format!("Group '{}' has size 0", group.id),
            ));
        }
    }

    check_constraint_references(problem, &person_ids, &group_sizes, &mut issues);

    let mut seen: HashSet<(&str, usize)> = HashSet::new();
    let mut occupancy: BTreeMap<(usize, &str), usize> = BTreeMap::new();
    for a in assignments {
        let known_person = problem.person(&a.person_id);
        if known_person.is_none() {
            issues.push(ProblemIssue::new(
                ProblemIssueKind::UnknownPerson,
                format!("Assignment references unknown person '{}'", a.person_id),
            ));
        }
        if !group_sizes.contains_key(a.group_id.as_str()) {
            issues.push(ProblemIssue::new(
                ProblemIssueKind::UnknownGroup,
                format!("Assignment references unknown group '{}'", a.group_id),
            ));
        }
        if a.session_id >= problem.num_sessions {
            issues.push(ProblemIssue::new(
                ProblemIssueKind::SessionOutOfRange,
                format!(
                    "Assignment of '{}' uses session {} (problem has {})",
                    a.person_id, a.session_id, problem.num_sessions
                ),
            ));
        }
        if known_person.is_some_and(|p| !p.attends(a.session_id)) {
            issues.push(ProblemIssue::new(
                ProblemIssueKind::IneligibleSession,
                format!(
                    "Person '{}' is assigned in session {} they do not attend",
                    a.person_id, a.session_id
                ),
            ));
        }
        if !seen.insert((a.person_id.as_str(), a.session_id)) {
            issues.push(ProblemIssue::new(
                ProblemIssueKind::DuplicateAssignment,
                format!(
                    "Person '{}' has more than one assignment in session {}",
                    a.person_id, a.session_id
                ),
            ));
        }
        *occupancy
            .entry((a.session_id, a.group_id.as_str()))
            .or_default() += 1;
    }

    for ((session, group_id), count) in occupancy {
        if let Some(&size) = group_sizes.get(group_id) {
            if count > size {
                issues.push(ProblemIssue::new(
                    ProblemIssueKind::CapacityExceeded,
                    format!(
                        "Group '{group_id}' holds {count} people in session {session} (size {size})"
                    ),
                ));
            }
        }
    }

    issues
}

fn check_constraint_references(
    problem: &Problem,
    person_ids: &HashSet<&str>,
    group_sizes: &HashMap<&str, usize>,
    issues: &mut Vec<ProblemIssue>,
) {
    for (i, constraint) in problem.constraints.iter().enumerate() {
        let (people, group): (Vec<&str>, Option<&str>) = match constraint {
            Constraint::AttributeBalance(c) => (Vec::new(), c.group_id.as_deref()),
            Constraint::ImmovablePerson(c) => (
                c.person_id.as_deref().into_iter().collect(),
                c.group_id.as_deref(),
            ),
            Constraint::ImmovablePeople(c) => (
                c.people.iter().map(String::as_str).collect(),
                c.group_id.as_deref(),
            ),
            Constraint::MustStayTogether(c) | Constraint::ShouldStayTogether(c) => {
                (c.people.iter().map(String::as_str).collect(), None)
            }
            Constraint::ShouldNotBeTogether(c) => {
                (c.people.iter().map(String::as_str).collect(), None)
            }
            Constraint::RepeatEncounter(_) | Constraint::Unrecognized(_) => continue,
        };

        for person_id in people {
            if !person_ids.contains(person_id) {
                issues.push(ProblemIssue::new(
                    ProblemIssueKind::UnknownPerson,
                    format!("Constraint {i} references unknown person '{person_id}'"),
                ));
            }
        }
        if let Some(group_id) = group {
            if !group_sizes.contains_key(group_id) {
                issues.push(ProblemIssue::new(
                    ProblemIssueKind::UnknownGroup,
                    format!("Constraint {i} references unknown group '{group_id}'"),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupforge_core::Person;
    use groupforge_test::constraints::{immovable_person, should_not_be_together};
    use groupforge_test::{assignments, ProblemBuilder};

    fn kinds(issues: &[ProblemIssue]) -> Vec<ProblemIssueKind> {
        issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_clean_problem() {
        let problem = ProblemBuilder::new(2)
            .people(&["a", "b"])
            .group("g1", 2)
            .constraint(should_not_be_together(&["a", "b"], &[]))
            .build();
        let schedule = assignments(&[("a", "g1", 0), ("b", "g1", 0), ("a", "g1", 1)]);
        assert!(validate_problem(&problem, &schedule).is_empty());
    }

    #[test]
    fn test_duplicate_ids_and_empty_group() {
        let problem = ProblemBuilder::new(1)
            .people(&["a", "a"])
            .group("g1", 0)
            .group("g1", 2)
            .build();
        let issues = validate_problem(&problem, &[]);
        assert_eq!(
            kinds(&issues),
            vec![
                ProblemIssueKind::DuplicateId,
                ProblemIssueKind::EmptyGroup,
                ProblemIssueKind::DuplicateId,
            ]
        );
    }

    #[test]
    fn test_assignment_issues() {
        let problem = ProblemBuilder::new(1)
            .add_person(Person::new("a").with_sessions([0]))
            .people(&["b", "c"])
            .group("g1", 1)
            .build();
        let schedule = assignments(&[
            ("a", "g1", 0),
            ("b", "g1", 0),
            ("b", "g1", 0),
            ("c", "nowhere", 0),
            ("a", "g1", 3),
        ]);
        let issues = validate_problem(&problem, &schedule);
        let kinds = kinds(&issues);

        assert!(kinds.contains(&ProblemIssueKind::DuplicateAssignment));
        assert!(kinds.contains(&ProblemIssueKind::UnknownGroup));
        assert!(kinds.contains(&ProblemIssueKind::SessionOutOfRange));
        assert!(kinds.contains(&ProblemIssueKind::IneligibleSession));
        assert!(kinds.contains(&ProblemIssueKind::CapacityExceeded));
    }

    #[test]
    fn test_constraint_references() {
        let problem = ProblemBuilder::new(1)
            .people(&["a"])
            .group("g1", 2)
            .constraint(immovable_person("ghost", "nowhere", &[]))
            .build();
        let issues = validate_problem(&problem, &[]);
        assert_eq!(
            kinds(&issues),
            vec![ProblemIssueKind::UnknownPerson, ProblemIssueKind::UnknownGroup]
        );
    }

    #[test]
    fn test_no_sessions() {
        let problem = ProblemBuilder::new(0).build();
        assert_eq!(
            kinds(&validate_problem(&problem, &[])),
            vec![ProblemIssueKind::NoSessions]
        );
    }
}
