//! Error types for Lata

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Lata operations
pub type Result<T> = std::result::Result<T, LataError>;

/// Main error type for Lata
#[derive(Error, Debug)]
pub enum LataError {
    /// Task definition file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Task definition file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Taskfile does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read '{path}': {error}")]
    Read { path: PathBuf, error: io::Error },

    #[error("Failed to parse '{path}': {error}")]
    Parse {
        path: PathBuf,
        error: serde_yaml::Error,
    },

    #[error("Task '{0}' is not defined")]
    TaskNotFound(String),

    #[error("Menu choice {choice} is out of range (1-{count})")]
    ChoiceOutOfRange { choice: usize, count: usize },
}

/// Errors raised while invoking the external runner or a registered handler
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Failed to start '{program}': {error}")]
    Spawn { program: String, error: io::Error },

    #[error("Task listing failed: {0}")]
    ListFailed(String),

    #[error("Task '{name}' failed: {reason}")]
    Handler { name: String, reason: String },
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Helper to tell a missing definition file apart from other configuration errors
pub fn is_not_found(err: &LataError) -> bool {
    matches!(err, LataError::Config(ConfigError::NotFound(_)))
}
