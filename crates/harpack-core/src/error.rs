//! Error types for harpack

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using HarpackError
pub type Result<T> = std::result::Result<T, HarpackError>;

/// Main error type for harpack operations
#[derive(Debug, Error)]
pub enum HarpackError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Pipeline-related errors
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl HarpackError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Pipeline-related errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Project root has no usable directory name
    #[error("Cannot derive a project name from {0}")]
    InvalidProjectRoot(PathBuf),

    /// External command could not be spawned
    #[error("Failed to spawn command '{command}': {reason}")]
    CommandSpawnFailed { command: String, reason: String },

    /// External command terminated with a non-zero exit code
    #[error("Command '{command}' failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },

    /// More than one candidate matched a single-file artifact category
    #[error("Ambiguous {category} artifact: {} candidates found", candidates.len())]
    AmbiguousArtifact {
        category: String,
        candidates: Vec<PathBuf>,
    },

    /// Archive creation failed
    #[error("Failed to create archive: {0}")]
    ArchiveFailed(String),

    /// IO error during collection or staging
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
