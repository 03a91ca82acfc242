//! Problem definition types.
//!
//! A [`Problem`] lists the people to place, the groups they can be placed in,
//! the number of sessions, and the constraints the placement should honor.
//!
//! # Example
//!
//! ```
//! use groupforge_core::{Group, Person, Problem};
//!
//! let problem = Problem::new(
//!     vec![Person::new("alice").with_attribute("name", "Alice"), Person::new("bob")],
//!     vec![Group::new("table-1", 4)],
//!     2,
//! );
//!
//! assert_eq!(problem.display_name("alice"), "Alice");
//! assert_eq!(problem.display_name("bob"), "bob");
//! assert_eq!(problem.display_name("ghost"), "ghost");
//! assert_eq!(problem.sessions_in_scope(None), vec![0, 1]);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constraint::Constraint;
use crate::error::{GroupForgeError, Result};

/// Attribute key holding a person's display name.
pub const NAME_ATTRIBUTE: &str = "name";

/// A person to be placed into groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier.
    pub id: String,

    /// Free-form attributes (e.g. gender, department). `"name"` is the display name.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Sessions this person takes part in. `None` means every session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<BTreeSet<usize>>,
}

impl Person {
    /// Creates a person with no attributes who attends every session.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
            sessions: None,
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Restricts the person to the given sessions.
    pub fn with_sessions(mut self, sessions: impl IntoIterator<Item = usize>) -> Self {
        self.sessions = Some(sessions.into_iter().collect());
        self
    }

    /// Returns the attribute value for `key`, if set.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns the display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.attribute(NAME_ATTRIBUTE).unwrap_or(&self.id)
    }

    /// Returns true if the person participates in `session`.
    pub fn attends(&self, session: usize) -> bool {
        self.sessions
            .as_ref()
            .map_or(true, |sessions| sessions.contains(&session))
    }
}

/// A group with a fixed per-session capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier.
    pub id: String,
    /// Maximum number of people per session.
    pub size: usize,
}

impl Group {
    /// Creates a group.
    pub fn new(id: impl Into<String>, size: usize) -> Self {
        Self {
            id: id.into(),
            size,
        }
    }
}

/// A complete group-assignment problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub people: Vec<Person>,
    pub groups: Vec<Group>,
    pub num_sessions: usize,

    /// Declared constraints. Order only matters for report indexing.
    #[serde(default)]
    pub constraints: Vec<Constraint>,

    /// Solver settings, passed through untouched.
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl Problem {
    /// Creates a problem without constraints.
    pub fn new(people: Vec<Person>, groups: Vec<Group>, num_sessions: usize) -> Self {
        Self {
            people,
            groups,
            num_sessions,
            constraints: Vec::new(),
            settings: serde_json::Value::Null,
        }
    }

    /// Appends a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Parses a problem from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or a problem without sessions.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let problem: Problem = serde_json::from_str(s)?;
        if problem.num_sessions == 0 {
            return Err(GroupForgeError::InvalidProblem(
                "num_sessions must be positive".to_string(),
            ));
        }
        Ok(problem)
    }

    /// Serializes the problem to JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Looks up a person by id.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Looks up a group by id.
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Display name for a person id. Unknown ids display as themselves.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.person(id).map_or(id, Person::display_name)
    }

    /// Resolves the sessions a constraint applies to.
    ///
    /// An explicit, non-empty list is sorted and deduplicated; otherwise every
    /// session `0..num_sessions` is in scope.
    pub fn sessions_in_scope(&self, explicit: Option<&[usize]>) -> Vec<usize> {
        match explicit {
            Some(sessions) if !sessions.is_empty() => {
                let set: BTreeSet<usize> = sessions.iter().copied().collect();
                set.into_iter().collect()
            }
            _ => (0..self.num_sessions).collect(),
        }
    }

    /// Returns an error if `session` is not a valid session index.
    pub fn check_session(&self, session: usize) -> Result<()> {
        if session < self.num_sessions {
            Ok(())
        } else {
            Err(GroupForgeError::SessionOutOfRange {
                session,
                num_sessions: self.num_sessions,
            })
        }
    }
}
