//! # Drop-while-busy launch guard.
//!
//! [`ExclusiveGuard`] wraps an async callback into a trigger: a trigger
//! starts the callback only when no previous run from this guard is still
//! active. Triggers that arrive while a run is in flight are dropped, not
//! queued, so a burst of rapid triggers collapses to exactly one run per
//! busy period.
//!
//! There is deliberately no signal telling the caller whether a given
//! trigger was accepted - callers that need one instrument the callback.
//!
//! ## Use when
//! - Redundant work should be avoided
//! - Example: refresh-on-scroll, periodic health probes

use std::borrow::Cow;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

use crate::context::{HandleRef, SpawnRef, TaskFuture, TaskHandle, Work};
use crate::error::TaskError;

/// Launches a run only if the previous one has finished.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use taskgate::{ExclusiveGuard, TaskError, TokioSpawner};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let refresh = ExclusiveGuard::new("refresh", TokioSpawner::arc(), {
///         |_ctx: CancellationToken| async move {
///             tokio::time::sleep(Duration::from_millis(100)).await;
///             Ok::<_, TaskError>(())
///         }
///     });
///
///     refresh.trigger();
///     refresh.trigger(); // dropped: previous run still active
/// }
/// ```
pub struct ExclusiveGuard<F> {
    name: Cow<'static, str>,
    spawner: SpawnRef,
    func: Arc<F>,
    current: Mutex<Option<HandleRef>>,
}

impl<F, Fut> ExclusiveGuard<F>
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

    /// Starts a new run unless one is already active.
    ///
    /// Dropped triggers leave no trace; the slot is re-armed as soon as the
    /// active run finishes, fails, or is cancelled by the execution context.
    pub fn trigger(&self) {
        let mut current = self.lock();
        if current.as_ref().is_some_and(|h| h.is_active()) {
            return;
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
