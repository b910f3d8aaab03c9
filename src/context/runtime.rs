//! # Tokio-backed spawn capability.
//!
//! [`TokioSpawner`] runs each unit of work on [`tokio::spawn`], racing the
//! work future against its [`CancellationToken`]. When the token trips, the
//! future is dropped at its next suspension point, so a cancelled task never
//! runs its remaining effects.
//!
//! ## Event flow
//! ```text
//! spawn() ──► publish TaskStarting
//!             task body:
//!               Ok(())            ──► publish TaskStopped
//!               Err(Canceled)     ──► publish TaskStopped (graceful exit)
//!               Err(other)        ──► publish TaskFailed
//! ```
//!
//! ## Rules
//! - Every spawn publishes **exactly one** terminal event.
//! - Cancellation is a graceful exit: it maps to `TaskStopped`, not `TaskFailed`.
//! - Failures are reported, never retried; retrying is the caller's call.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::context::handle::{HandleRef, TaskHandle};
use crate::context::spawn::{Spawn, SpawnRef, Work};
use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};

/// Spawn capability backed by the ambient tokio runtime.
///
/// Must be used from within a runtime context (`spawn` panics otherwise,
/// same as [`tokio::spawn`]).
///
/// # Example
/// ```no_run
/// use taskgate::{Bus, Spawn, TaskHandle, TokioSpawner};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let bus = Bus::new(64);
///     let mut events = bus.subscribe();
///     let spawner = TokioSpawner::with_bus(bus);
///
///     let handle = spawner.spawn("hello", Box::new(|_ctx| {
///         Box::pin(async {
///             println!("hello from task");
///             Ok(())
///         })
///     }));
///
///     while handle.is_active() {
///         tokio::task::yield_now().await;
///     }
///     let ev = events.recv().await.unwrap();
///     println!("first event: {:?}", ev.kind);
/// }
/// ```
#[derive(Clone, Default)]
pub struct TokioSpawner {
    bus: Option<Bus>,
}

impl TokioSpawner {
    /// Creates a spawner that reports no events.
    pub fn new() -> Self {
        Self { bus: None }
    }

    /// Creates a spawner that publishes lifecycle events to `bus`.
    pub fn with_bus(bus: Bus) -> Self {
        Self { bus: Some(bus) }
    }

    /// Shorthand for `Arc::new(TokioSpawner::new())`.
    pub fn arc() -> SpawnRef {
        std::sync::Arc::new(Self::new())
    }
}

impl Spawn for TokioSpawner {
    fn spawn(&self, name: &str, work: Work) -> HandleRef {
        let token = CancellationToken::new();

        if let Some(bus) = &self.bus {
            bus.publish(Event::now(EventKind::TaskStarting).with_task(name));
        }

        let bus = self.bus.clone();
        let name = name.to_string();
        let task_token = token.clone();

        let join: JoinHandle<()> = tokio::spawn(async move {
            let res = if task_token.is_cancelled() {
                Err(TaskError::Canceled)
            } else {
                let fut = work(task_token.clone());
                tokio::select! {
                    res = fut => res,
                    _ = task_token.cancelled() => Err(TaskError::Canceled),
                }
            };

            if let Some(bus) = &bus {
                match &res {
                    Ok(()) | Err(TaskError::Canceled) => {
                        bus.publish(Event::now(EventKind::TaskStopped).with_task(&name));
                    }
                    Err(e) => {
                        bus.publish(
                            Event::now(EventKind::TaskFailed)
                                .with_task(&name)
                                .with_error(e.to_string()),
                        );
                    }
                }
            }
        });

        Box::new(TokioHandle { token, join })
    }
}

/// Handle pairing the task's cancellation token with its join handle.
struct TokioHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl TaskHandle for TokioHandle {
    fn is_active(&self) -> bool {
        !self.token.is_cancelled() && !self.join.is_finished()
    }

    fn cancel(&self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::context::spawn::TaskFuture;

    async fn wait_until(mut cond: impl FnMut() -> bool) {
        for _ in 0..200 {
            if cond() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached within 1s");
    }

    #[tokio::test]
    async fn test_spawn_runs_work_to_completion() {
        let done = Arc::new(AtomicBool::new(false));
        let spawner = TokioSpawner::new();

        let handle = spawner.spawn("job", {
            let done = done.clone();
            Box::new(move |_ctx| -> TaskFuture {
                Box::pin(async move {
                    done.store(true, Ordering::SeqCst);
                    Ok(())
                })
            })
        });

        wait_until(|| !handle.is_active()).await;
        assert!(done.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancel_stops_at_next_suspension_point() {
        let started = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));
        let spawner = TokioSpawner::new();

        let handle = spawner.spawn("napper", {
            let started = started.clone();
            let finished = finished.clone();
            Box::new(move |_ctx| -> TaskFuture {
                Box::pin(async move {
                    started.store(true, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    finished.store(true, Ordering::SeqCst);
                    Ok(())
                })
            })
        });

        wait_until(|| started.load(Ordering::SeqCst)).await;
        assert!(handle.is_active());

        handle.cancel();
        assert!(!handle.is_active(), "cancelled handle reports inactive");

        // idempotent: a second cancel changes nothing
        handle.cancel();
        assert!(!handle.is_active());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(
            !finished.load(Ordering::SeqCst),
            "post-cancellation effects must not run"
        );
    }

    #[tokio::test]
    async fn test_lifecycle_events_success_and_failure() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let spawner = TokioSpawner::with_bus(bus);

        let ok = spawner.spawn("good", Box::new(|_ctx| Box::pin(async { Ok(()) })));
        wait_until(|| !ok.is_active()).await;

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::TaskStarting);
        assert_eq!(ev.task.as_deref(), Some("good"));
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::TaskStopped);

        let bad = spawner.spawn(
            "bad",
            Box::new(|_ctx| Box::pin(async { Err(TaskError::fail("boom")) })),
        );
        wait_until(|| !bad.is_active()).await;

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::TaskStarting);
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::TaskFailed);
        assert!(ev.error.unwrap().contains("boom"));
    }

    #[tokio::test]
    async fn test_cancellation_reports_stopped_not_failed() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let spawner = TokioSpawner::with_bus(bus);

        let handle = spawner.spawn(
            "napper",
            Box::new(|_ctx| {
                Box::pin(async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(())
                })
            }),
        );
        // let the task park in its sleep before cancelling
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.cancel();
        wait_until(|| !handle.is_active()).await;

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::TaskStarting);
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::TaskStopped);
    }
}
