//! Error type shared by all spawned units of work.
//!
//! A guard never intercepts, retries, or logs a failure: the error travels
//! through the spawned task's completion and surfaces via the execution
//! context's reporting convention (see [`TokioSpawner`](crate::TokioSpawner)).
//! A failed task counts as "not active", so the next trigger is free to
//! start fresh work.

use thiserror::Error;

/// # Errors produced by a unit of work.
///
/// [`Canceled`](TaskError::Canceled) is the graceful exit taken when a task
/// observes cancellation; it is reported as a normal stop, not a failure.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Work failed with an application error.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Work was cancelled before completing.
    #[error("cancelled")]
    Canceled,
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskgate::TaskError;
    ///
    /// let err = TaskError::Fail { error: "boom".into() };
    /// assert_eq!(err.as_label(), "task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Canceled => "cancelled".to_string(),
        }
    }

    /// Wraps an arbitrary error into [`TaskError::Fail`].
    pub fn fail(error: impl std::fmt::Display) -> Self {
        TaskError::Fail {
            error: error.to_string(),
        }
    }
}
