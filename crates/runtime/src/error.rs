//! Error types for runtime client operations.

/// Errors that can occur talking to the container runtime.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The runtime binary could not be executed at all.
    #[error("failed to exec {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// The runtime rejected a command (non-zero exit status).
    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// JSON output from the runtime could not be parsed.
    #[error("failed to parse runtime JSON output: {0}")]
    Parse(#[from] serde_json::Error),

    /// The event stream could not be established.
    #[error("event stream error: {0}")]
    EventStream(String),
}

/// Result alias for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
