//! Snapshot-based undo/redo.
//!
//! Every commit stores an owned copy of the prior state. Callers only ever
//! receive clones, so mutating a returned snapshot never reaches the stacks.

use std::collections::VecDeque;

use groupforge_core::Assignment;
use tracing::trace;

/// Undo/redo history over assignment lists.
pub type AssignmentHistory = EditHistory<Vec<Assignment>>;

/// Two stacks of snapshots around a current state.
///
/// # Example
///
/// ```
/// use groupforge_editor::EditHistory;
///
/// let mut history = EditHistory::new(vec![0]);
/// history.commit(vec![1]);
/// history.commit(vec![2]);
///
/// assert!(history.undo());
/// assert_eq!(history.current(), &vec![1]);
/// assert!(history.redo());
/// assert_eq!(history.current(), &vec![2]);
/// assert!(!history.redo());
/// ```
#[derive(Debug, Clone)]
pub struct EditHistory<S: Clone> {
    current: S,
    undo: VecDeque<S>,
    redo: Vec<S>,
    max_depth: Option<usize>,
}

impl<S: Clone> EditHistory<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_depth: None,
        }
    }

    /// Caps the undo stack; the oldest snapshot is dropped first.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self.trim();
        self
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    /// An owned copy of the current state.
    pub fn snapshot(&self) -> S {
        self.current.clone()
    }

    /// Makes `next` current, pushing the prior state and clearing redo.
    pub fn commit(&mut self, next: S) {
        let prior = std::mem::replace(&mut self.current, next);
        self.undo.push_back(prior);
        self.redo.clear();
        self.trim();
        trace!(
            event = "history_commit",
            undo_depth = self.undo.len(),
        );
    }

    /// Restores the previous state. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, previous);
        self.redo.push(current);
        trace!(
            event = "history_undo",
            undo_depth = self.undo.len(),
            redo_depth = self.redo.len(),
        );
        true
    }

    /// Re-applies the last undone state. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, next);
        self.undo.push_back(current);
        self.trim();
        trace!(
            event = "history_redo",
            undo_depth = self.undo.len(),
            redo_depth = self.redo.len(),
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Drops both stacks, keeping the current state.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn trim(&mut self) {
        if let Some(max) = self.max_depth {
            while self.undo.len() > max {
                self.undo.pop_front();
            }
        }
    }
}
