//! Error types for drilldown-core.

/// Scheduler-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    /// The task ID is unknown, was cancelled, or the task has already run.
    #[error("invalid or expired scheduled task id")]
    InvalidTaskId,
}

/// A specialized Result type for drilldown-core operations.
pub type Result<T> = std::result::Result<T, SchedulerError>;
