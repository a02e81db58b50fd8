//! Error types for AppRestart
//!
//! One top-level error enum covers the fatal failure modes. Expected
//! conditions are deliberately not errors: a vanished target is a
//! scheduler outcome, and a read timeout in the command reader is a
//! plain `None`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for AppRestart operations
pub type Result<T> = std::result::Result<T, AppRestartError>;

/// Main error type for AppRestart
#[derive(Error, Debug)]
pub enum AppRestartError {
    /// A process matching the name exists but its metadata could not be
    /// read (it vanished mid-enumeration or access was denied).
    #[error("Process lookup failed for '{0}': metadata unavailable")]
    ProcessLookup(String),

    #[error("Failed to start replacement process {path:?}: {source}")]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
