//! Error types for engine operations.

use simple_runtime::RuntimeError;

/// Errors that can occur in registry and reconciliation operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A schedule already exists for the container; callers must remove it
    /// first (or use the compound replace operation).
    #[error("a schedule for container '{0}' already exists")]
    DuplicateSchedule(String),

    /// No schedule is registered under the container name.
    #[error("no schedule registered for container '{0}'")]
    ScheduleNotFound(String),

    /// The cron expression could not be parsed.
    #[error("invalid schedule expression '{expression}': {source}")]
    Expression {
        expression: String,
        #[source]
        source: cron::error::Error,
    },

    /// Error from the container runtime collaborator.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
