//! Error types for the HAL crate.

use thiserror::Error;

/// Failures at the execution boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The job ran and reported a failure.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// The job was cancelled before producing counts.
    #[error("Job cancelled")]
    JobCancelled,

    /// No job with this id is known to the backend.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Circuit is structurally unusable, e.g. a state of the wrong size.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Backend configuration value is missing or out of range.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Polling gave up before the job reached a terminal state.
    #[error("Timed out waiting for job {0}")]
    Timeout(String),

    /// Circuit is wider than the backend register.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Instruction the backend cannot execute.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Shot count is zero or above the backend limit.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Backend state is inconsistent with the request.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
