//! Error types for the editor

use groupforge_config::ConfigError;
use groupforge_core::GroupForgeError;
use thiserror::Error;

use crate::guard::DropRejection;

/// Errors returned by [`EditorSession`](crate::EditorSession) operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The drop guard vetoed the move.
    #[error("Move rejected: {0}")]
    Rejected(DropRejection),

    #[error(transparent)]
    Core(#[from] GroupForgeError),

    /// The editor configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
