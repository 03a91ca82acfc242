use std::sync::Arc;
use std::time::Duration;

use groupforge_config::{PreviewConfig, DEFAULT_DEBOUNCE_MS};
use groupforge_core::{Assignment, Problem};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::service::{ScoringError, ScoringService, Solution};
use crate::moves::PersonMove;

const NO_RUNTIME: &str = "no Tokio runtime available to run the preview";

/// Identifies a preview request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewKey {
    pub person_id: String,
    pub session: usize,
    pub group_id: String,
    pub assignment_count: usize,
}

impl PreviewKey {
    pub fn new(mv: &PersonMove, assignment_count: usize) -> Self {
        Self {
            person_id: mv.person_id.clone(),
            session: mv.session,
            group_id: mv.group_id.clone(),
            assignment_count,
        }
    }
}

/// A published preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewResult {
    pub key: PreviewKey,
    pub solution: Solution,
    /// `final_score` minus the baseline's, when a baseline is set.
    pub score_delta: Option<f64>,
    pub unique_contacts_delta: Option<i64>,
}

impl PreviewResult {
    fn new(key: PreviewKey, solution: Solution, baseline: Option<&Solution>) -> Self {
        let score_delta = baseline.map(|b| solution.final_score - b.final_score);
        let unique_contacts_delta =
            baseline.map(|b| solution.unique_contacts as i64 - b.unique_contacts as i64);
        Self {
            key,
            solution,
            score_delta,
            unique_contacts_delta,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PreviewStatus {
    #[default]
    Idle,
    Pending {
        key: PreviewKey,
    },
    Ready(PreviewResult),
    Failed {
        key: PreviewKey,
        error: String,
    },
}

impl PreviewStatus {
    pub fn key(&self) -> Option<&PreviewKey> {
        match self {
            PreviewStatus::Idle => None,
            PreviewStatus::Pending { key } | PreviewStatus::Failed { key, .. } => Some(key),
            PreviewStatus::Ready(result) => Some(&result.key),
        }
    }
}

/// What subscribers observe. `generation` increases on every hover, cancel
/// and invalidation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewState {
    pub generation: u64,
    pub status: PreviewStatus,
}

/// Returned by [`PreviewCoordinator::hover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTicket {
    pub generation: u64,
    pub key: PreviewKey,
}

/// Supersedes in-flight previews without access to the coordinator.
///
/// Cheap to clone; an [`EditorSession`](crate::EditorSession) holds one so
/// commits, undo and redo drop any pending preview.
#[derive(Debug, Clone)]
pub struct PreviewInvalidator {
    state: Arc<watch::Sender<PreviewState>>,
}

impl PreviewInvalidator {
    /// Bumps the generation and returns to idle.
    pub fn invalidate(&self) {
        supersede(&self.state);
    }
}

fn supersede(state: &watch::Sender<PreviewState>) {
    state.send_modify(|s| {
        s.generation += 1;
        s.status = PreviewStatus::Idle;
    });
}

/// Debounced, cancelable driver for preview scoring.
///
/// Each hover spawns a task on the current Tokio runtime. The task sleeps for
/// the debounce delay, gives up if a newer request has been issued meanwhile,
/// calls the service, and publishes only if its generation is still current.
/// Late responses are dropped silently.
pub struct PreviewCoordinator<S: ScoringService> {
    service: Arc<S>,
    problem: Arc<Problem>,
    debounce: Duration,
    baseline: Option<Solution>,
    state: Arc<watch::Sender<PreviewState>>,
}

impl<S: ScoringService> PreviewCoordinator<S> {
    pub fn new(service: S, problem: Arc<Problem>) -> Self {
        Self {
            service: Arc::new(service),
            problem,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            baseline: None,
            state: Arc::new(watch::Sender::new(PreviewState::default())),
        }
    }

    pub fn from_config(service: S, problem: Arc<Problem>, config: &PreviewConfig) -> Self {
        Self::new(service, problem).with_debounce(config.debounce())
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Replaces the problem sent with future requests and supersedes any
    /// request in flight.
    ///
    /// The baseline was scored against the old problem, so it is cleared.
    pub fn set_problem(&mut self, problem: Arc<Problem>) {
        self.problem = problem;
        self.baseline = None;
        supersede(&self.state);
    }

    pub fn baseline(&self) -> Option<&Solution> {
        self.baseline.as_ref()
    }

    /// Sets the solution deltas are computed against.
    pub fn set_baseline(&mut self, baseline: Option<Solution>) {
        self.baseline = baseline;
    }

    /// Scores `assignments` directly and stores the result as the baseline.
    pub async fn score_baseline(
        &mut self,
        assignments: &[Assignment],
    ) -> Result<&Solution, ScoringError> {
        let solution = self
            .service
            .evaluate(Arc::clone(&self.problem), assignments.to_vec())
            .await?;
        let baseline: &Solution = self.baseline.insert(solution);
        Ok(baseline)
    }

    /// Starts a preview of `mv` applied to `assignments`.
    ///
    /// The scoring task runs on the current Tokio runtime. Without one the
    /// request is published as [`PreviewStatus::Failed`] right away.
    pub fn hover(&self, mv: &PersonMove, assignments: &[Assignment]) -> PreviewTicket {
        let key = PreviewKey::new(mv, assignments.len());
        let hypothetical = mv.apply(assignments);

        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            s.status = PreviewStatus::Pending { key: key.clone() };
            generation = s.generation;
        });

        let ticket = PreviewTicket {
            generation,
            key: key.clone(),
        };

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(error) => {
                warn!(
                    event = "preview_failed",
                    generation,
                    person = %key.person_id,
                    group = %key.group_id,
                    error = %error,
                );
                let status = PreviewStatus::Failed {
                    key,
                    error: NO_RUNTIME.to_string(),
                };
                self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.status = status;
                    true
                });
                return ticket;
            }
        };

        let state = Arc::clone(&self.state);
        let service = Arc::clone(&self.service);
        let problem = Arc::clone(&self.problem);
        let baseline = self.baseline.clone();
        let debounce = self.debounce;

        handle.spawn(async move {
            tokio::time::sleep(debounce).await;
            let current = state.borrow().generation;
            if current != generation {
                debug!(
                    event = "preview_discarded",
                    stage = "debounce",
                    generation,
                    person = %key.person_id,
                    group = %key.group_id,
                );
                return;
            }

            let status = match service.evaluate(problem, hypothetical).await {
                Ok(solution) => PreviewStatus::Ready(PreviewResult::new(
                    key.clone(),
                    solution,
                    baseline.as_ref(),
                )),
                Err(error) => {
                    warn!(
                        event = "preview_failed",
                        generation,
                        person = %key.person_id,
                        group = %key.group_id,
                        error = %error,
                    );
                    PreviewStatus::Failed {
                        key: key.clone(),
                        error: error.to_string(),
                    }
                }
            };

            let published = state.send_if_modified(|s| {
                if s.generation != generation {
                    return false;
                }
                s.status = status;
                true
            });
            if !published {
                debug!(
                    event = "preview_discarded",
                    stage = "response",
                    generation,
                    person = %key.person_id,
                    group = %key.group_id,
                );
            }
        });

        ticket
    }

    /// Drops the current preview, pending or shown.
    pub fn cancel(&self) {
        supersede(&self.state);
    }

    pub fn invalidator(&self) -> PreviewInvalidator {
        PreviewInvalidator {
            state: Arc::clone(&self.state),
        }
    }

    pub fn state(&self) -> PreviewState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> PreviewStatus {
        self.state.borrow().status.clone()
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.state.subscribe()
    }
}

impl<S: ScoringService> std::fmt::Debug for PreviewCoordinator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewCoordinator")
            .field("debounce", &self.debounce)
            .field("baseline", &self.baseline)
            .field("state", &*self.state.borrow())
            .finish()
    }
}
