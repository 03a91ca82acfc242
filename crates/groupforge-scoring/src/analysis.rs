//! Compliance report types.
//!
//! This module provides the per-constraint report produced by the evaluator,
//! the individual violation records behind each count, summary statistics,
//! and person-level indictments.

use std::collections::BTreeMap;

use groupforge_core::{ConstraintKind, Severity};
use serde::{Deserialize, Serialize};

use crate::contacts::ContactMetrics;

/// One located violation of a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum Violation {
    /// A pair met more often than allowed.
    RepeatEncounter {
        pair: (String, String),
        count: usize,
        overage: usize,
        /// Sessions where the pair shared a group, ascending.
        sessions: Vec<usize>,
    },
    /// An attribute value count in a group missed its target.
    AttributeBalance {
        session: usize,
        group_id: String,
        value: String,
        desired: usize,
        actual: usize,
    },
    /// A pinned person was not in the required group.
    Displaced {
        session: usize,
        person_id: String,
        required_group: String,
        actual_group: Option<String>,
    },
    /// People meant to share a group were split up or unassigned.
    Separated {
        session: usize,
        people: Vec<String>,
        unassigned: Vec<String>,
        /// Distinct groups the assigned people were found in.
        groups: Vec<String>,
    },
    /// People meant to be apart shared a group.
    Clustered {
        session: usize,
        group_id: String,
        people: Vec<String>,
    },
}

impl Violation {
    /// How much this record adds to the constraint's violation count.
    pub fn contribution(&self) -> usize {
        match self {
            Violation::RepeatEncounter { overage, .. } => *overage,
            Violation::AttributeBalance {
                desired, actual, ..
            } => desired.abs_diff(*actual),
            Violation::Displaced { .. } => 1,
            Violation::Separated {
                unassigned, groups, ..
            } => unassigned.len() + groups.len().saturating_sub(1),
            Violation::Clustered { people, .. } => people.len().saturating_sub(1),
        }
    }

    /// The session the violation occurred in, if it is session-specific.
    pub fn session(&self) -> Option<usize> {
        match self {
            Violation::RepeatEncounter { .. } => None,
            Violation::AttributeBalance { session, .. }
            | Violation::Displaced { session, .. }
            | Violation::Separated { session, .. }
            | Violation::Clustered { session, .. } => Some(*session),
        }
    }

    /// People implicated by this violation.
    ///
    /// Attribute balance violations concern a group as a whole and implicate
    /// nobody in particular.
    pub fn people(&self) -> Vec<&str> {
        match self {
            Violation::RepeatEncounter { pair, .. } => vec![pair.0.as_str(), pair.1.as_str()],
            Violation::AttributeBalance { .. } => Vec::new(),
            Violation::Displaced { person_id, .. } => vec![person_id.as_str()],
            Violation::Separated { people, .. } | Violation::Clustered { people, .. } => {
                people.iter().map(String::as_str).collect()
            }
        }
    }
}

/// Compliance of a single declared constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintCompliance {
    /// Position of the constraint in the problem's list.
    pub constraint_index: usize,
    pub kind: ConstraintKind,
    pub title: String,
    pub severity: Severity,
    pub satisfied: bool,
    /// Sum of [`Violation::contribution`] over `details`.
    pub violation_count: usize,
    /// Weighted penalty for this constraint.
    pub penalty: f64,
    pub details: Vec<Violation>,
}

impl ConstraintCompliance {
    /// Returns true if this is a hard constraint.
    pub fn is_hard(&self) -> bool {
        self.severity == Severity::Hard
    }
}

/// Per-constraint compliance for one assignment list, in constraint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub entries: Vec<ConstraintCompliance>,
}

impl ComplianceReport {
    pub fn new(entries: Vec<ConstraintCompliance>) -> Self {
        Self { entries }
    }

    /// Returns true if every constraint is satisfied.
    pub fn is_compliant(&self) -> bool {
        self.entries.iter().all(|e| e.satisfied)
    }

    /// Returns true if no hard constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.entries.iter().all(|e| e.satisfied || !e.is_hard())
    }

    /// Total violation count across constraints.
    pub fn total_violations(&self) -> usize {
        self.entries.iter().map(|e| e.violation_count).sum()
    }

    /// Sum of weighted penalties across constraints.
    pub fn total_penalty(&self) -> f64 {
        self.entries.iter().map(|e| e.penalty).sum()
    }

    /// Entries that are not satisfied.
    pub fn violated(&self) -> impl Iterator<Item = &ConstraintCompliance> {
        self.entries.iter().filter(|e| !e.satisfied)
    }

    /// Entry for the constraint at `constraint_index`.
    pub fn get(&self, constraint_index: usize) -> Option<&ConstraintCompliance> {
        self.entries.get(constraint_index)
    }

    /// Aggregate counts for a summary view.
    pub fn summary(&self) -> ComplianceSummary {
        let mut summary = ComplianceSummary::default();
        for entry in &self.entries {
            summary.constraint_count += 1;
            if entry.satisfied {
                summary.satisfied_count += 1;
            } else {
                summary.violated_count += 1;
            }
            match entry.severity {
                Severity::Hard => summary.hard_violations += entry.violation_count,
                Severity::Soft => summary.soft_violations += entry.violation_count,
            }
            *summary.violations_by_kind.entry(entry.kind).or_default() += entry.violation_count;
        }
        summary
    }

    /// Builds person indictments from all violation details.
    pub fn indictments(&self) -> IndictmentMap {
        IndictmentMap::from_report(self)
    }
}

/// Aggregate counts over a compliance report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub constraint_count: usize,
    pub satisfied_count: usize,
    pub violated_count: usize,
    pub hard_violations: usize,
    pub soft_violations: usize,
    pub violations_by_kind: BTreeMap<ConstraintKind, usize>,
}

/// Compliance report together with contact metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub report: ComplianceReport,
    pub contacts: ContactMetrics,
}

/// How one person contributes to constraint violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonIndictment {
    pub person_id: String,
    /// Sum of contributions of every violation naming this person.
    pub total: usize,
    /// Contribution per constraint index.
    pub by_constraint: BTreeMap<usize, usize>,
}

impl PersonIndictment {
    pub fn new(person_id: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            ..Self::default()
        }
    }

    /// Adds a violation of constraint `constraint_index`.
    pub fn add(&mut self, constraint_index: usize, contribution: usize) {
        self.total += contribution;
        *self.by_constraint.entry(constraint_index).or_default() += contribution;
    }

    /// Number of distinct constraints this person is implicated in.
    pub fn constraint_count(&self) -> usize {
        self.by_constraint.len()
    }
}

/// Indictments keyed by person id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndictmentMap {
    pub indictments: BTreeMap<String, PersonIndictment>,
}

impl IndictmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds indictments from every violation in a report.
    ///
    /// Each implicated person is charged the full contribution of the record.
    pub fn from_report(report: &ComplianceReport) -> Self {
        let mut map = Self::new();
        for entry in &report.entries {
            for violation in &entry.details {
                let contribution = violation.contribution();
                for person in violation.people() {
                    map.indictments
                        .entry(person.to_string())
                        .or_insert_with(|| PersonIndictment::new(person))
                        .add(entry.constraint_index, contribution);
                }
            }
        }
        map
    }

    pub fn get(&self, person_id: &str) -> Option<&PersonIndictment> {
        self.indictments.get(person_id)
    }

    /// Indictments sorted by total contribution, largest first; ties by id.
    pub fn worst(&self) -> Vec<&PersonIndictment> {
        let mut all: Vec<_> = self.indictments.values().collect();
        all.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.person_id.cmp(&b.person_id)));
        all
    }

    pub fn len(&self) -> usize {
        self.indictments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indictments.is_empty()
    }
}
