//! Unique-contact metrics.
//!
//! A unique contact is an unordered pair of people who shared a group in at
//! least one session. Meeting again in a later session does not add a new
//! contact.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::index::ScheduleIndex;

/// Contact statistics for one assignment list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactMetrics {
    /// Number of distinct pairs that ever met.
    pub unique_contacts: usize,
    /// `2 × unique_contacts / max(1, person_count)`.
    pub avg_unique_contacts: f64,
    /// Distinct people each person met.
    pub per_person: BTreeMap<String, usize>,
}

/// Computes unique contacts from a [`ScheduleIndex`].
///
/// # Example
///
/// ```
/// use groupforge_core::Assignment;
/// use groupforge_scoring::{ContactCounter, ScheduleIndex};
///
/// let index = ScheduleIndex::build(&[
///     Assignment::new("p1", "g", 0),
///     Assignment::new("p2", "g", 0),
///     Assignment::new("p1", "g", 1),
///     Assignment::new("p2", "g", 1),
/// ]);
///
/// let metrics = ContactCounter::new(&index).metrics(2);
/// assert_eq!(metrics.unique_contacts, 1);
/// assert_eq!(metrics.avg_unique_contacts, 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContactCounter<'a> {
    index: &'a ScheduleIndex,
}

impl<'a> ContactCounter<'a> {
    pub fn new(index: &'a ScheduleIndex) -> Self {
        Self { index }
    }

    /// Distinct co-located pairs, each stored as `(min, max)` by id.
    pub fn pairs(&self) -> BTreeSet<(&'a str, &'a str)> {
        let mut pairs = BTreeSet::new();
        for session in self.index.session_ids() {
            for (_, members) in self.index.groups(session) {
                for (i, a) in members.iter().enumerate() {
                    for b in &members[i + 1..] {
                        if a != b {
                            pairs.insert(ordered_pair(a, b));
                        }
                    }
                }
            }
        }
        pairs
    }

    /// Computes contact metrics over `person_count` people.
    pub fn metrics(&self, person_count: usize) -> ContactMetrics {
        let pairs = self.pairs();

        let mut per_person: BTreeMap<String, usize> = BTreeMap::new();
        for (a, b) in &pairs {
            *per_person.entry((*a).to_string()).or_default() += 1;
            *per_person.entry((*b).to_string()).or_default() += 1;
        }

        let unique_contacts = pairs.len();
        ContactMetrics {
            unique_contacts,
            avg_unique_contacts: 2.0 * unique_contacts as f64 / person_count.max(1) as f64,
            per_person,
        }
    }
}

pub(crate) fn ordered_pair<'s>(a: &'s str, b: &'s str) -> (&'s str, &'s str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupforge_core::Assignment;

    fn same_group_two_sessions() -> ScheduleIndex {
        let mut assignments = Vec::new();
        for session in 0..2 {
            for p in ["p1", "p2", "p3"] {
                assignments.push(Assignment::new(p, "g", session));
            }
        }
        ScheduleIndex::build(&assignments)
    }

    #[test]
    fn test_pairs_counted_once_across_sessions() {
        let index = same_group_two_sessions();
        let metrics = ContactCounter::new(&index).metrics(3);
        assert_eq!(metrics.unique_contacts, 3);
        assert_eq!(metrics.avg_unique_contacts, 2.0);
        assert_eq!(metrics.per_person.get("p2"), Some(&2));
    }

    #[test]
    fn test_pair_symmetry() {
        let forward = ScheduleIndex::build(&[
            Assignment::new("a", "g", 0),
            Assignment::new("b", "g", 0),
        ]);
        let backward = ScheduleIndex::build(&[
            Assignment::new("b", "g", 0),
            Assignment::new("a", "g", 0),
        ]);
        assert_eq!(
            ContactCounter::new(&forward).pairs(),
            ContactCounter::new(&backward).pairs()
        );
    }

    #[test]
    fn test_self_pairs_ignored() {
        let index = ScheduleIndex::build(&[
            Assignment::new("a", "g", 0),
            Assignment::new("a", "g", 0),
        ]);
        assert!(ContactCounter::new(&index).pairs().is_empty());
    }

    #[test]
    fn test_zero_people_does_not_divide_by_zero() {
        let index = ScheduleIndex::build(&[]);
        let metrics = ContactCounter::new(&index).metrics(0);
        assert_eq!(metrics.unique_contacts, 0);
        assert_eq!(metrics.avg_unique_contacts, 0.0);
    }
}
