//! # Lifecycle events emitted for spawned tasks.
//!
//! [`EventKind`] classifies the three points of a task's life the spawner
//! reports: start, graceful stop, failure. The [`Event`] struct carries the
//! task name, an optional error message, a wall-clock timestamp, and a
//! globally monotonic sequence number.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use taskgate::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::TaskFailed)
//!     .with_task("refresh")
//!     .with_error("connection refused");
//!
//! assert_eq!(ev.kind, EventKind::TaskFailed);
//! assert_eq!(ev.task.as_deref(), Some("refresh"));
//! assert_eq!(ev.error.as_deref(), Some("connection refused"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of task lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Task is starting.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TaskStarting,

    /// Task has stopped (finished successfully **or** was cancelled gracefully).
    ///
    /// Sets:
    /// - `task`: task name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TaskStopped,

    /// Task failed with an error.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `error`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TaskFailed,
}

/// A single lifecycle event.
///
/// Every spawn produces exactly one `TaskStarting` followed by exactly one
/// terminal event (`TaskStopped` or `TaskFailed`).
#[derive(Debug, Clone)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Name of the task the event refers to.
    pub task: Option<String>,
    /// Failure message (set for `TaskFailed`).
    pub error: Option<String>,
    /// Wall-clock timestamp taken at creation.
    pub at: SystemTime,
    /// Globally monotonic sequence number.
    pub seq: u64,
}

impl Event {
    /// Creates an event stamped with the current time and the next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            kind,
            task: None,
            error: None,
            at: SystemTime::now(),
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    /// Sets the task name.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Sets the failure message.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::now(EventKind::TaskStarting);
        let b = Event::now(EventKind::TaskStopped);
        let c = Event::now(EventKind::TaskFailed);
        assert!(a.seq < b.seq);
        assert!(b.seq < c.seq);
    }

    #[test]
    fn test_builders_set_fields() {
        let ev = Event::now(EventKind::TaskFailed)
            .with_task("worker")
            .with_error("boom");
        assert_eq!(ev.task.as_deref(), Some("worker"));
        assert_eq!(ev.error.as_deref(), Some("boom"));
    }
}
