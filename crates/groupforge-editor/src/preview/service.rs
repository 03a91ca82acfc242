//! The external scoring collaborator.

use std::future::Future;
use std::sync::Arc;

use groupforge_core::{Assignment, Problem};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A scored assignment list as returned by the solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub final_score: f64,
    pub unique_contacts: usize,
    pub repetition_penalty: f64,
    pub attribute_balance_penalty: f64,
    pub constraint_penalty: f64,
    pub iteration_count: u64,
    pub elapsed_time_ms: u64,
}

/// Why a scoring call produced no solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Scoring service unavailable: {0}")]
    Unavailable(String),
    #[error("Scoring failed: {0}")]
    Failed(String),
}

/// Scores a full assignment list against a problem.
///
/// Calls may be slow, may fail, and may complete out of order. Each call
/// handles exactly one request.
pub trait ScoringService: Send + Sync + 'static {
    fn evaluate(
        &self,
        problem: Arc<Problem>,
        assignments: Vec<Assignment>,
    ) -> impl Future<Output = Result<Solution, ScoringError>> + Send;
}
