//! Constraint compliance evaluation for GroupForge.
//!
//! This crate turns a problem and a concrete assignment list into:
//! - A [`ScheduleIndex`] (session → group → members)
//! - Unique-contact metrics ([`ContactCounter`])
//! - A per-constraint [`ComplianceReport`] ([`ComplianceEvaluator`])
//! - Structural diagnostics for problems and assignments ([`validate_problem`])
//!
//! # Architecture
//!
//! Everything here is a pure function of its inputs. The index is rebuilt
//! from scratch for every assignment list and nothing is mutated in place,
//! so callers can evaluate snapshots from any thread.

pub mod analysis;
pub mod contacts;
pub mod evaluator;
pub mod index;
pub mod validation;

#[cfg(test)]
mod analysis_tests;

pub use analysis::{
    ComplianceReport, ComplianceSummary, ConstraintCompliance, Evaluation, IndictmentMap,
    PersonIndictment, Violation,
};
pub use contacts::{ContactCounter, ContactMetrics};
pub use evaluator::{evaluate_assignments, evaluate_compliance, ComplianceEvaluator};
pub use index::ScheduleIndex;
pub use validation::{validate_problem, ProblemIssue, ProblemIssueKind};
