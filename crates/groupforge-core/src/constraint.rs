//! Constraint kinds a problem can declare.
//!
//! Constraints are a closed sum type tagged by `"type"` on the wire. Every
//! field is optional when deserializing: a missing field means "no
//! restriction" so that half-edited constraints never make evaluation fail.
//! Unknown tags deserialize to [`Constraint::Unrecognized`] with the raw
//! payload preserved.
//!
//! # Example
//!
//! ```
//! use groupforge_core::{Constraint, ConstraintKind, Severity};
//!
//! let c: Constraint = serde_json::from_str(
//!     r#"{"type": "MustStayTogether", "people": ["a", "b"], "sessions": [0]}"#,
//! ).unwrap();
//!
//! assert_eq!(c.kind(), ConstraintKind::MustStayTogether);
//! assert_eq!(c.severity(), Severity::Hard);
//! assert_eq!(c.sessions(), Some(&[0][..]));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Problem;

/// A declared constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Constraint {
    RepeatEncounter(RepeatEncounter),
    AttributeBalance(AttributeBalance),
    ImmovablePerson(ImmovablePerson),
    ImmovablePeople(ImmovablePeople),
    MustStayTogether(StayTogether),
    ShouldStayTogether(StayTogether),
    ShouldNotBeTogether(ShouldNotBeTogether),
    /// Any constraint this version cannot read, kept verbatim so that saving
    /// the problem writes it back unchanged.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Limits how often the same pair of people may meet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepeatEncounter {
    /// Encounters allowed per pair before it counts as a violation.
    /// `None` disables the limit.
    pub max_allowed_encounters: Option<usize>,
    pub penalty_function: PenaltyFunction,
    pub penalty_weight: Option<f64>,
}

/// Requests a distribution of attribute values inside one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeBalance {
    pub group_id: Option<String>,
    pub attribute_key: Option<String>,
    /// Desired head count per attribute value.
    pub desired_values: BTreeMap<String, usize>,
    pub mode: BalanceMode,
    pub penalty_weight: Option<f64>,
    pub sessions: Option<Vec<usize>>,
}

/// Pins one person to a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImmovablePerson {
    pub person_id: Option<String>,
    pub group_id: Option<String>,
    pub sessions: Option<Vec<usize>>,
}

/// Pins several people to a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImmovablePeople {
    pub people: Vec<String>,
    pub group_id: Option<String>,
    pub sessions: Option<Vec<usize>>,
}

/// Keeps people in the same group. Shared by the hard and soft variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StayTogether {
    pub people: Vec<String>,
    pub sessions: Option<Vec<usize>>,
    pub penalty_weight: Option<f64>,
}

/// Keeps people apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShouldNotBeTogether {
    pub people: Vec<String>,
    pub sessions: Option<Vec<usize>>,
    pub penalty_weight: Option<f64>,
}

/// How repeat-encounter overage is turned into a penalty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyFunction {
    #[default]
    Linear,
    Squared,
}

impl PenaltyFunction {
    /// Applies the function to an overage count.
    pub fn apply(self, overage: usize) -> f64 {
        let x = overage as f64;
        match self {
            PenaltyFunction::Linear => x,
            PenaltyFunction::Squared => x * x,
        }
    }
}

/// Attribute balance comparison mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceMode {
    /// Actual counts must equal the desired counts.
    #[default]
    Exact,
    /// Actual counts must reach at least the desired counts.
    AtLeast,
}

/// Whether violating a constraint makes an assignment infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Hard,
    Soft,
}

/// Discriminant of [`Constraint`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConstraintKind {
    RepeatEncounter,
    AttributeBalance,
    ImmovablePerson,
    ImmovablePeople,
    MustStayTogether,
    ShouldStayTogether,
    ShouldNotBeTogether,
    Unrecognized,
}

impl ConstraintKind {
    /// Returns the wire tag of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintKind::RepeatEncounter => "RepeatEncounter",
            ConstraintKind::AttributeBalance => "AttributeBalance",
            ConstraintKind::ImmovablePerson => "ImmovablePerson",
            ConstraintKind::ImmovablePeople => "ImmovablePeople",
            ConstraintKind::MustStayTogether => "MustStayTogether",
            ConstraintKind::ShouldStayTogether => "ShouldStayTogether",
            ConstraintKind::ShouldNotBeTogether => "ShouldNotBeTogether",
            ConstraintKind::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Constraint {
    /// Returns the kind of this constraint.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::RepeatEncounter(_) => ConstraintKind::RepeatEncounter,
            Constraint::AttributeBalance(_) => ConstraintKind::AttributeBalance,
            Constraint::ImmovablePerson(_) => ConstraintKind::ImmovablePerson,
            Constraint::ImmovablePeople(_) => ConstraintKind::ImmovablePeople,
            Constraint::MustStayTogether(_) => ConstraintKind::MustStayTogether,
            Constraint::ShouldStayTogether(_) => ConstraintKind::ShouldStayTogether,
            Constraint::ShouldNotBeTogether(_) => ConstraintKind::ShouldNotBeTogether,
            Constraint::Unrecognized(_) => ConstraintKind::Unrecognized,
        }
    }

    /// Returns the severity of this constraint.
    pub fn severity(&self) -> Severity {
        match self {
            Constraint::ImmovablePerson(_)
            | Constraint::ImmovablePeople(_)
            | Constraint::MustStayTogether(_) => Severity::Hard,
            _ => Severity::Soft,
        }
    }

    /// Returns the explicit session list, if the constraint carries one.
    pub fn sessions(&self) -> Option<&[usize]> {
        match self {
            Constraint::AttributeBalance(c) => c.sessions.as_deref(),
            Constraint::ImmovablePerson(c) => c.sessions.as_deref(),
            Constraint::ImmovablePeople(c) => c.sessions.as_deref(),
            Constraint::MustStayTogether(c) | Constraint::ShouldStayTogether(c) => {
                c.sessions.as_deref()
            }
            Constraint::ShouldNotBeTogether(c) => c.sessions.as_deref(),
            Constraint::RepeatEncounter(_) | Constraint::Unrecognized(_) => None,
        }
    }

    /// Weight applied to violations when computing a penalty.
    ///
    /// Hard constraints and constraints without an explicit weight use 1.0.
    pub fn penalty_weight(&self) -> f64 {
        let weight = match self {
            Constraint::RepeatEncounter(c) => c.penalty_weight,
            Constraint::AttributeBalance(c) => c.penalty_weight,
            Constraint::ShouldStayTogether(c) => c.penalty_weight,
            Constraint::ShouldNotBeTogether(c) => c.penalty_weight,
            _ => None,
        };
        weight.unwrap_or(1.0)
    }

    /// Returns the group this constraint pins `person_id` to in `session`, if any.
    pub fn required_group(&self, problem: &Problem, person_id: &str, session: usize) -> Option<&str> {
        let (applies, group_id) = match self {
            Constraint::ImmovablePerson(c) => (
                c.person_id.as_deref() == Some(person_id),
                c.group_id.as_deref(),
            ),
            Constraint::ImmovablePeople(c) => (
                c.people.iter().any(|p| p == person_id),
                c.group_id.as_deref(),
            ),
            _ => return None,
        };
        if !applies || !problem.sessions_in_scope(self.sessions()).contains(&session) {
            return None;
        }
        group_id
    }

    /// Human-readable title for reports.
    pub fn title(&self, problem: &Problem) -> String {
        match self {
            Constraint::RepeatEncounter(c) => match c.max_allowed_encounters {
                Some(max) => format!("Repeat Encounter (max {max})"),
                None => "Repeat Encounter".to_string(),
            },
            Constraint::AttributeBalance(c) => format!(
                "Attribute Balance: {} in {}",
                c.attribute_key.as_deref().unwrap_or("?"),
                c.group_id.as_deref().unwrap_or("?")
            ),
            Constraint::ImmovablePerson(c) => format!(
                "Immovable Person: {} in {}",
                c.person_id
                    .as_deref()
                    .map_or("?", |id| problem.display_name(id)),
                c.group_id.as_deref().unwrap_or("?")
            ),
            Constraint::ImmovablePeople(c) => format!(
                "Immovable People: {} in {}",
                join_names(problem, &c.people),
                c.group_id.as_deref().unwrap_or("?")
            ),
            Constraint::MustStayTogether(c) => {
                format!("Must Stay Together: {}", join_names(problem, &c.people))
            }
            Constraint::ShouldStayTogether(c) => {
                format!("Should Stay Together: {}", join_names(problem, &c.people))
            }
            Constraint::ShouldNotBeTogether(c) => {
                format!("Should Not Be Together: {}", join_names(problem, &c.people))
            }
            Constraint::Unrecognized(raw) => match raw.get("type").and_then(|t| t.as_str()) {
                Some(tag) => format!("Unrecognized constraint: {tag}"),
                None => "Unrecognized constraint".to_string(),
            },
        }
    }
}

fn join_names(problem: &Problem, ids: &[String]) -> String {
    ids.iter()
        .map(|id| problem.display_name(id))
        .collect::<Vec<_>>()
        .join(", ")
}
