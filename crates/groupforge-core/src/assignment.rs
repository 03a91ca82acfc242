//! Person-to-group assignments and helpers for editing assignment lists.
//!
//! Assignment lists are treated as immutable values: every helper here
//! returns a fresh list and leaves its input untouched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Places one person in one group for one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub person_id: String,
    pub group_id: String,
    pub session_id: usize,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(person_id: impl Into<String>, group_id: impl Into<String>, session_id: usize) -> Self {
        Self {
            person_id: person_id.into(),
            group_id: group_id.into(),
            session_id,
        }
    }

    /// Returns true if this assignment places `person_id` in `session`.
    pub fn is_for(&self, person_id: &str, session: usize) -> bool {
        self.session_id == session && self.person_id == person_id
    }
}

/// Returns a copy of `assignments` with `person_id` moved to `group_id` in `session`.
///
/// Every existing assignment of the person in that session is redirected, so
/// duplicate entries stay duplicated. If the person had no assignment in the
/// session, one is appended.
///
/// # Example
///
/// ```
/// use groupforge_core::{reassign, Assignment};
///
/// let current = vec![Assignment::new("a", "g1", 0), Assignment::new("a", "g1", 1)];
/// let moved = reassign(&current, "a", "g2", 1);
///
/// assert_eq!(moved[0].group_id, "g1");
/// assert_eq!(moved[1].group_id, "g2");
/// assert_eq!(current[1].group_id, "g1");
/// ```
pub fn reassign(
    assignments: &[Assignment],
    person_id: &str,
    group_id: &str,
    session: usize,
) -> Vec<Assignment> {
    let mut found = false;
    let mut next: Vec<Assignment> = assignments
        .iter()
        .map(|a| {
            if a.is_for(person_id, session) {
                found = true;
                Assignment::new(person_id, group_id, session)
            } else {
                a.clone()
            }
        })
        .collect();

    if !found {
        next.push(Assignment::new(person_id, group_id, session));
    }
    next
}

/// Keeps only the last assignment per `(person, session)`.
///
/// The engine itself tolerates duplicates; callers that need the
/// one-group-per-session invariant run this before indexing. Relative order
/// of the surviving assignments is preserved.
pub fn dedupe_assignments(assignments: &[Assignment]) -> Vec<Assignment> {
    let mut last: HashMap<(&str, usize), usize> = HashMap::with_capacity(assignments.len());
    for (i, a) in assignments.iter().enumerate() {
        last.insert((a.person_id.as_str(), a.session_id), i);
    }

    assignments
        .iter()
        .enumerate()
        .filter(|(i, a)| last.get(&(a.person_id.as_str(), a.session_id)) == Some(i))
        .map(|(_, a)| a.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reassign_appends_when_missing() {
        let current = vec![Assignment::new("a", "g1", 0)];
        let moved = reassign(&current, "b", "g1", 0);
        assert_eq!(moved.len(), 2);
        assert_eq!(moved[1], Assignment::new("b", "g1", 0));
    }

    #[test]
    fn test_reassign_redirects_duplicates() {
        let current = vec![
            Assignment::new("a", "g1", 0),
            Assignment::new("a", "g3", 0),
            Assignment::new("a", "g1", 1),
        ];
        let moved = reassign(&current, "a", "g2", 0);
        assert_eq!(moved.len(), 3);
        assert_eq!(moved[0].group_id, "g2");
        assert_eq!(moved[1].group_id, "g2");
        assert_eq!(moved[2].group_id, "g1");
    }

    #[test]
    fn test_dedupe_keeps_last() {
        let assignments = vec![
            Assignment::new("a", "g1", 0),
            Assignment::new("b", "g1", 0),
            Assignment::new("a", "g2", 0),
            Assignment::new("a", "g1", 1),
        ];
        let deduped = dedupe_assignments(&assignments);
        assert_eq!(
            deduped,
            vec![
                Assignment::new("b", "g1", 0),
                Assignment::new("a", "g2", 0),
                Assignment::new("a", "g1", 1),
            ]
        );
    }
}
