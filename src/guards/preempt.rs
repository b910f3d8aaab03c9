//! # Cancel-then-restart launch guard.
//!
//! [`PreemptGuard`] gives the newest trigger absolute priority: every
//! trigger first requests cancellation of the run still in flight (no-op if
//! there is none) and then unconditionally starts a new one.
//!
//! Cancellation is cooperative. The execution context stops a cancelled run
//! at its next suspension point; effects before the cancellation request
//! either completed or did not happen, effects after the next suspension
//! point never run. A callback that never yields cannot be preempted
//! mid-computation.
//!
//! ## Use when
//! - A new request invalidates the old one
//! - Example: type-ahead search, new commit cancels the old build

use std::borrow::Cow;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

use crate::context::{HandleRef, SpawnRef, TaskFuture, TaskHandle, Work};
use crate::error::TaskError;

/// Cancels the previous run and starts a new one on every trigger.
///
/// # Example
/// ```no_run
/// use taskgate::{PreemptGuard, TaskError, TokioSpawner};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let search = PreemptGuard::new("search", TokioSpawner::arc(), {
///         |_ctx: CancellationToken| async move {
///             // query the backend...
///             Ok::<_, TaskError>(())
///         }
///     });
///
///     search.trigger(); // keystroke 1
///     search.trigger(); // keystroke 2: run 1 is cancelled, run 2 starts
/// }
/// ```
pub struct PreemptGuard<F> {
    name: Cow<'static, str>,
    spawner: SpawnRef,
    func: Arc<F>,
    current: Mutex<Option<HandleRef>>,
}

impl<F, Fut> PreemptGuard<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    /// Creates a guard with an empty slot. No work starts until [`trigger`](Self::trigger).
    pub fn new(name: impl Into<Cow<'static, str>>, spawner: SpawnRef, func: F) -> Self {
        Self {
            name: name.into(),
            spawner,
            func: Arc::new(func),
            current: Mutex::new(None),
        }
    }

    /// Requests cancellation of the current run, then starts a new one.
    ///
    /// The cancellation request is issued before the replacement spawns, so
    /// the old run observes it no later than its next suspension point.
    pub fn trigger(&self) {
        let mut current = self.lock();
        if let Some(handle) = current.take() {
            handle.cancel();
        }

        let func = Arc::clone(&self.func);
        let work: Work = Box::new(move |ctx: CancellationToken| -> TaskFuture {
            Box::pin((*func)(ctx))
        });
        *current = Some(self.spawner.spawn(&self.name, work));
    }

    /// Returns `true` while a run from this guard is in flight.
    pub fn is_busy(&self) -> bool {
        self.lock().as_ref().is_some_and(|h| h.is_active())
    }

    /// The slot must survive a panic in foreign code; recover the guard
    /// instead of poisoning every later trigger.
    fn lock(&self) -> MutexGuard<'_, Option<HandleRef>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
