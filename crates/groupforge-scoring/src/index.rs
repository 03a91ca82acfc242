//! Session → group → members index over an assignment list.
//!
//! # Example
//!
//! ```
//! use groupforge_core::Assignment;
//! use groupforge_scoring::ScheduleIndex;
//!
//! let index = ScheduleIndex::build(&[
//!     Assignment::new("a", "g1", 0),
//!     Assignment::new("b", "g1", 0),
//!     Assignment::new("a", "g2", 1),
//! ]);
//!
//! assert_eq!(index.members(0, "g1"), ["a", "b"]);
//! assert_eq!(index.group_of(1, "a"), Some("g2"));
//! assert_eq!(index.group_of(1, "b"), None);
//! assert!(index.members(5, "g1").is_empty());
//! ```

use std::collections::BTreeMap;

use groupforge_core::Assignment;

/// Grouped view of an assignment list.
///
/// Sessions and groups iterate in ascending id order; members keep the order
/// in which they appeared in the assignment list. Duplicate assignments are
/// kept as duplicate members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleIndex {
    sessions: BTreeMap<usize, BTreeMap<String, Vec<String>>>,
    assignment_count: usize,
}

impl ScheduleIndex {
    /// Builds the index from scratch.
    pub fn build(assignments: &[Assignment]) -> Self {
        let mut sessions: BTreeMap<usize, BTreeMap<String, Vec<String>>> = BTreeMap::new();
        for a in assignments {
            sessions
                .entry(a.session_id)
                .or_default()
                .entry(a.group_id.clone())
                .or_default()
                .push(a.person_id.clone());
        }
        Self {
            sessions,
            assignment_count: assignments.len(),
        }
    }

    /// Returns true if no assignments were indexed.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of assignments the index was built from.
    pub fn assignment_count(&self) -> usize {
        self.assignment_count
    }

    /// Sessions that have at least one assignment, ascending.
    pub fn session_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.sessions.keys().copied()
    }

    /// Occupied groups of a session with their members.
    pub fn groups(&self, session: usize) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.sessions
            .get(&session)
            .into_iter()
            .flat_map(|groups| groups.iter().map(|(g, m)| (g.as_str(), m.as_slice())))
    }

    /// Members of a group in a session. Empty if the group is unoccupied.
    pub fn members(&self, session: usize, group_id: &str) -> &[String] {
        self.sessions
            .get(&session)
            .and_then(|groups| groups.get(group_id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of members (including duplicates) of a group in a session.
    pub fn occupancy(&self, session: usize, group_id: &str) -> usize {
        self.members(session, group_id).len()
    }

    /// Returns true if `person_id` is a member of the group in the session.
    pub fn contains(&self, session: usize, group_id: &str, person_id: &str) -> bool {
        self.members(session, group_id).iter().any(|p| p == person_id)
    }

    /// The group holding `person_id` in `session`.
    ///
    /// With duplicate assignments the first group in id order wins.
    pub fn group_of(&self, session: usize, person_id: &str) -> Option<&str> {
        self.groups(session)
            .find(|(_, members)| members.iter().any(|p| p == person_id))
            .map(|(group_id, _)| group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = ScheduleIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.session_ids().count(), 0);
        assert_eq!(index.group_of(0, "a"), None);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let index = ScheduleIndex::build(&[
            Assignment::new("a", "g1", 0),
            Assignment::new("a", "g1", 0),
            Assignment::new("a", "g2", 0),
        ]);
        assert_eq!(index.occupancy(0, "g1"), 2);
        assert_eq!(index.occupancy(0, "g2"), 1);
        assert_eq!(index.group_of(0, "a"), Some("g1"));
        assert_eq!(index.assignment_count(), 3);
    }

    #[test]
    fn test_groups_iterate_in_id_order() {
        let index = ScheduleIndex::build(&[
            Assignment::new("a", "zeta", 0),
            Assignment::new("b", "alpha", 0),
        ]);
        let ids: Vec<&str> = index.groups(0).map(|(g, _)| g).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_build_is_order_independent_for_membership() {
        let forward = ScheduleIndex::build(&[
            Assignment::new("a", "g1", 0),
            Assignment::new("b", "g2", 1),
        ]);
        let backward = ScheduleIndex::build(&[
            Assignment::new("b", "g2", 1),
            Assignment::new("a", "g1", 0),
        ]);
        assert_eq!(forward, backward);
    }
}
