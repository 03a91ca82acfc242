//! Assignment list helpers.
//!
//! # Example
//!
//! ```
//! use groupforge_test::{assignments, session};
//!
//! let flat = assignments(&[("a", "g1", 0), ("b", "g1", 0)]);
//! let grouped = session(0, &[("g1", &["a", "b"])]);
//! assert_eq!(flat, grouped);
//! ```

use groupforge_core::Assignment;

/// Builds assignments from `(person, group, session)` rows.
pub fn assignments(rows: &[(&str, &str, usize)]) -> Vec<Assignment> {
    rows.iter()
        .map(|(person, group, session)| Assignment::new(*person, *group, *session))
        .collect()
}

/// Builds one session's assignments from `(group, members)` rows.
pub fn session(session_id: usize, groups: &[(&str, &[&str])]) -> Vec<Assignment> {
    groups
        .iter()
        .flat_map(|(group, members)| {
            members
                .iter()
                .map(move |person| Assignment::new(*person, *group, session_id))
        })
        .collect()
}

/// Converts string literals to owned ids.
pub fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| (*id).to_string()).collect()
}
