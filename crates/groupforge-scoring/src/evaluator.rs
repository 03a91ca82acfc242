//! Per-constraint compliance evaluation.
//!
//! Each constraint kind has a dedicated check that produces violation
//! records; the violation count of a constraint is the sum of the records'
//! contributions. Records are ordered by session, then by discovery order
//! (groups in id order, people in list order).
//!
//! Logging levels:
//! - **DEBUG**: One summary event per evaluation
//! - **TRACE**: One event per constraint

use std::collections::HashMap;
use std::time::Instant;

use groupforge_core::{
    Assignment, AttributeBalance, BalanceMode, Constraint, ImmovablePeople, ImmovablePerson,
    Person, Problem, RepeatEncounter, ShouldNotBeTogether, StayTogether,
};
use tracing::{debug, trace};

use crate::analysis::{ComplianceReport, ConstraintCompliance, Evaluation, Violation};
use crate::contacts::{ordered_pair, ContactCounter};
use crate::index::ScheduleIndex;

/// Evaluates every constraint of a problem against one schedule.
///
/// # Example
///
/// ```
/// use groupforge_core::{Assignment, Constraint, Group, Person, Problem, ShouldNotBeTogether};
/// use groupforge_scoring::{ComplianceEvaluator, ScheduleIndex};
///
/// let problem = Problem::new(
///     vec![Person::new("x"), Person::new("y")],
///     vec![Group::new("g", 2)],
///     1,
/// )
/// .with_constraint(Constraint::ShouldNotBeTogether(ShouldNotBeTogether {
///     people: vec!["x".into(), "y".into()],
///     ..Default::default()
/// }));
///
/// let index = ScheduleIndex::build(&[Assignment::new("x", "g", 0), Assignment::new("y", "g", 0)]);
/// let report = ComplianceEvaluator::new(&problem, &index).evaluate();
///
/// assert!(!report.entries[0].satisfied);
/// assert_eq!(report.entries[0].violation_count, 1);
/// ```
pub struct ComplianceEvaluator<'a> {
    problem: &'a Problem,
    index: &'a ScheduleIndex,
    people: HashMap<&'a str, &'a Person>,
}

impl<'a> ComplianceEvaluator<'a> {
    pub fn new(problem: &'a Problem, index: &'a ScheduleIndex) -> Self {
        let people = problem
            .people
            .iter()
            .map(|p| (p.id.as_str(), p))
            .collect();
        Self {
            problem,
            index,
            people,
        }
    }

    /// Evaluates all constraints, in declaration order.
    pub fn evaluate(&self) -> ComplianceReport {
        let start = Instant::now();

        let entries = self
            .problem
            .constraints
            .iter()
            .enumerate()
            .map(|(i, constraint)| self.evaluate_constraint(i, constraint))
            .collect();
        let report = ComplianceReport::new(entries);

        debug!(
            event = "compliance_evaluated",
            constraint_count = report.entries.len(),
            violated_count = report.violated().count(),
            total_violations = report.total_violations(),
            elapsed_us = start.elapsed().as_micros() as u64,
        );
        report
    }

    /// Evaluates one constraint.
    pub fn evaluate_constraint(
        &self,
        constraint_index: usize,
        constraint: &Constraint,
    ) -> ConstraintCompliance {
        let details = match constraint {
            Constraint::RepeatEncounter(c) => self.repeat_encounter(c),
            Constraint::AttributeBalance(c) => self.attribute_balance(c),
            Constraint::ImmovablePerson(c) => self.immovable_person(c),
            Constraint::ImmovablePeople(c) => self.immovable_people(c),
            Constraint::MustStayTogether(c) | Constraint::ShouldStayTogether(c) => {
                self.stay_together(c)
            }
            Constraint::ShouldNotBeTogether(c) => self.should_not_be_together(c),
            Constraint::Unrecognized(_) => Vec::new(),
        };

        let violation_count: usize = details.iter().map(Violation::contribution).sum();
        let weight = constraint.penalty_weight();
        let penalty = match constraint {
            Constraint::RepeatEncounter(c) => {
                weight
                    * details
                        .iter()
                        .map(|d| c.penalty_function.apply(d.contribution()))
                        .sum::<f64>()
            }
            _ => weight * violation_count as f64,
        };

        trace!(
            event = "constraint_evaluated",
            constraint_index,
            kind = constraint.kind().as_str(),
            violation_count,
        );

        ConstraintCompliance {
            constraint_index,
            kind: constraint.kind(),
            title: constraint.title(self.problem),
            severity: constraint.severity(),
            satisfied: violation_count == 0,
            violation_count,
            penalty,
            details,
        }
    }

    fn scope(&self, constraint_sessions: Option<&[usize]>) -> Vec<usize> {
        self.problem.sessions_in_scope(constraint_sessions)
    }

    fn repeat_encounter(&self, c: &RepeatEncounter) -> Vec<Violation> {
        let Some(max) = c.max_allowed_encounters else {
            return Vec::new();
        };

        // Pairs in first-seen order with (occurrences, sessions).
        let mut order: Vec<(&str, &str)> = Vec::new();
        let mut seen: HashMap<(&str, &str), (usize, Vec<usize>)> = HashMap::new();

        for session in self.index.session_ids() {
            for (_, members) in self.index.groups(session) {
                for (i, a) in members.iter().enumerate() {
                    for b in &members[i + 1..] {
                        if a == b {
                            continue;
                        }
                        let key = ordered_pair(a, b);
                        let (count, sessions) = seen.entry(key).or_insert_with(|| {
                            order.push(key);
                            (0, Vec::new())
                        });
                        *count += 1;
                        if sessions.last() != Some(&session) {
                            sessions.push(session);
                        }
                    }
                }
            }
        }

        order
            .into_iter()
            .filter_map(|key| {
                let (count, sessions) = seen.remove(&key)?;
                (count > max).then(|| Violation::RepeatEncounter {
                    pair: (key.0.to_string(), key.1.to_string()),
                    count,
                    overage: count - max,
                    sessions,
                })
            })
            .collect()
    }

    fn attribute_balance(&self, c: &AttributeBalance) -> Vec<Violation> {
        let (Some(group_id), Some(key)) = (c.group_id.as_deref(), c.attribute_key.as_deref())
        else {
            return Vec::new();
        };

        let mut details = Vec::new();
        for session in self.scope(c.sessions.as_deref()) {
            // People without the attribute, and unknown people, are not tallied.
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for person_id in self.index.members(session, group_id) {
                if let Some(value) = self
                    .people
                    .get(person_id.as_str())
                    .and_then(|p| p.attribute(key))
                {
                    *counts.entry(value).or_default() += 1;
                }
            }

            for (value, &desired) in &c.desired_values {
                let actual = counts.get(value.as_str()).copied().unwrap_or(0);
                let violated = match c.mode {
                    BalanceMode::Exact => actual != desired,
                    BalanceMode::AtLeast => actual < desired,
                };
                if violated {
                    details.push(Violation::AttributeBalance {
                        session,
                        group_id: group_id.to_string(),
                        value: value.clone(),
                        desired,
                        actual,
                    });
                }
            }
        }
        details
    }

    fn immovable_person(&self, c: &ImmovablePerson) -> Vec<Violation> {
        let (Some(person_id), Some(group_id)) = (c.person_id.as_deref(), c.group_id.as_deref())
        else {
            return Vec::new();
        };

        self.scope(c.sessions.as_deref())
            .into_iter()
            .filter_map(|session| {
                let actual = self.index.group_of(session, person_id);
                (actual != Some(group_id)).then(|| Violation::Displaced {
                    session,
                    person_id: person_id.to_string(),
                    required_group: group_id.to_string(),
                    actual_group: actual.map(str::to_string),
                })
            })
            .collect()
    }

    fn immovable_people(&self, c: &ImmovablePeople) -> Vec<Violation> {
        let Some(group_id) = c.group_id.as_deref() else {
            return Vec::new();
        };

        let mut details = Vec::new();
        for session in self.scope(c.sessions.as_deref()) {
            for person_id in &c.people {
                if !self.index.contains(session, group_id, person_id) {
                    details.push(Violation::Displaced {
                        session,
                        person_id: person_id.clone(),
                        required_group: group_id.to_string(),
                        actual_group: self.index.group_of(session, person_id).map(str::to_string),
                    });
                }
            }
        }
        details
    }

    fn stay_together(&self, c: &StayTogether) -> Vec<Violation> {
        if c.people.is_empty() {
            return Vec::new();
        }

        let mut details = Vec::new();
        for session in self.scope(c.sessions.as_deref()) {
            let mut unassigned = Vec::new();
            let mut groups: Vec<String> = Vec::new();
            for person_id in &c.people {
                match self.index.group_of(session, person_id) {
                    None => unassigned.push(person_id.clone()),
                    Some(group_id) => {
                        if !groups.iter().any(|g| g == group_id) {
                            groups.push(group_id.to_string());
                        }
                    }
                }
            }

            if !unassigned.is_empty() || groups.len() > 1 {
                details.push(Violation::Separated {
                    session,
                    people: c.people.clone(),
                    unassigned,
                    groups,
                });
            }
        }
        details
    }

    fn should_not_be_together(&self, c: &ShouldNotBeTogether) -> Vec<Violation> {
        let mut listed: Vec<&str> = Vec::with_capacity(c.people.len());
        for person_id in &c.people {
            if !listed.contains(&person_id.as_str()) {
                listed.push(person_id);
            }
        }
        if listed.len() < 2 {
            return Vec::new();
        }

        let mut details = Vec::new();
        for session in self.scope(c.sessions.as_deref()) {
            for (group_id, members) in self.index.groups(session) {
                let together: Vec<String> = listed
                    .iter()
                    .filter(|p| members.iter().any(|m| m == *p))
                    .map(|p| (*p).to_string())
                    .collect();
                if together.len() > 1 {
                    details.push(Violation::Clustered {
                        session,
                        group_id: group_id.to_string(),
                        people: together,
                    });
                }
            }
        }
        details
    }
}

/// Evaluates all constraints of `problem` against a prebuilt index.
pub fn evaluate_compliance(problem: &Problem, index: &ScheduleIndex) -> ComplianceReport {
    ComplianceEvaluator::new(problem, index).evaluate()
}

/// Indexes `assignments` and returns the compliance report with contact metrics.
pub fn evaluate_assignments(problem: &Problem, assignments: &[Assignment]) -> Evaluation {
    let index = ScheduleIndex::build(assignments);
    Evaluation {
        report: evaluate_compliance(problem, &index),
        contacts: ContactCounter::new(&index).metrics(problem.people.len()),
    }
}
