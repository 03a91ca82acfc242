//! Error types for GroupForge

use thiserror::Error;

/// Main error type for GroupForge operations
#[derive(Debug, Error)]
pub enum GroupForgeError {
    /// Problem or assignment payload could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Problem definition is structurally unusable
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// A session index outside `0..num_sessions`
    #[error("Session {session} is out of range (problem has {num_sessions} sessions)")]
    SessionOutOfRange { session: usize, num_sessions: usize },
}

/// Result type alias for GroupForge operations
pub type Result<T> = std::result::Result<T, GroupForgeError>;
