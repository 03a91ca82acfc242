//! Single-person moves.

use std::fmt;

use groupforge_core::{reassign, Assignment};
use serde::{Deserialize, Serialize};

/// Moves one person into a group for one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonMove {
    pub person_id: String,
    pub group_id: String,
    pub session: usize,
}

impl PersonMove {
    pub fn new(person_id: impl Into<String>, group_id: impl Into<String>, session: usize) -> Self {
        Self {
            person_id: person_id.into(),
            group_id: group_id.into(),
            session,
        }
    }

    /// Returns a copy of `assignments` with this move applied.
    pub fn apply(&self, assignments: &[Assignment]) -> Vec<Assignment> {
        reassign(assignments, &self.person_id, &self.group_id, self.session)
    }
}

impl fmt::Display for PersonMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (session {})",
            self.person_id, self.group_id, self.session
        )
    }
}
