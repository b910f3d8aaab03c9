//! # Retain-newest launch guard.
//!
//! [`ConflateGuard`] accepts a stream of values and feeds them to an async
//! callback under two guarantees: at most one callback invocation runs at a
//! time, and the most recently submitted value is always eventually
//! processed. Values submitted while the callback is busy overwrite each
//! other in a single-element mailbox - intermediate values may be dropped,
//! the newest never is.
//!
//! ## State machine
//! ```text
//! trigger(v):
//!   ├─► pending = Some(v)                (overwrite: the conflation point)
//!   ├─► drain task active? ── yes ──► done (drain picks v up later)
//!   └─► no ──► spawn drain task
//!
//! drain task:
//!   loop {
//!     ├─► take pending
//!     │     ├─ Some(v) ──► callback(v).await, continue
//!     │     └─ None ────► retire (clear current), exit
//!   }
//! ```
//!
//! The mailbox check and the retire decision happen under one lock, so a
//! value submitted while the drain is deciding either lands in the mailbox
//! before the empty-check (and is drained) or observes a retired slot (and
//! spawns a fresh drain). Either way the newest value is processed.
//!
//! Draining is a loop inside **one** spawned task, not a chain of
//! task-per-value respawns, so the relaunch chain cannot grow a stack.
//!
//! ## Use when
//! - Only the latest state matters but it must not be lost
//! - Example: progress rendering, persisting editor state

use std::borrow::Cow;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

use crate::context::{HandleRef, SpawnRef, TaskFuture, TaskHandle, Work};
use crate::error::TaskError;

/// Processes the newest submitted value, one invocation at a time.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use taskgate::{ConflateGuard, TaskError, TokioSpawner};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let render = ConflateGuard::new("render", TokioSpawner::arc(), {
///         |percent: u8, _ctx: CancellationToken| async move {
///             tokio::time::sleep(Duration::from_millis(50)).await;
///             println!("progress: {percent}%");
///             Ok::<_, TaskError>(())
///         }
///     });
///
///     for percent in [10, 20, 30, 40, 50] {
///         render.trigger(percent); // intermediate values may conflate
///     }
///     // the callback is guaranteed to eventually see 50
/// }
/// ```
pub struct ConflateGuard<T, F> {
    name: Cow<'static, str>,
    spawner: SpawnRef,
    inner: Arc<Inner<T, F>>,
}

struct Inner<T, F> {
    func: F,
    state: Mutex<State<T>>,
}

/// Both slots live under one lock: the drain task's retire decision must be
/// atomic with its empty-mailbox observation.
struct State<T> {
    current: Option<HandleRef>,
    pending: Option<T>,
}

impl<T, F> Inner<T, F> {
    /// The slots must survive a panic in foreign code; recover the state
    /// instead of poisoning every later trigger.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T, F, Fut> ConflateGuard<T, F>
where
    T: Send + 'static,
    F: Fn(T, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    /// Creates a guard with empty slots. No work starts until [`trigger`](Self::trigger).
    pub fn new(name: impl Into<Cow<'static, str>>, spawner: SpawnRef, func: F) -> Self {
        Self {
            name: name.into(),
            spawner,
            inner: Arc::new(Inner {
                func,
                state: Mutex::new(State {
                    current: None,
                    pending: None,
                }),
            }),
        }
    }

    /// Submits `value`, overwriting any value still waiting in the mailbox.
    ///
    /// If no drain task is active one is started; otherwise the active drain
    /// picks the value up once the current callback invocation finishes.
    /// There is no notification for values displaced by a newer submission.
    pub fn trigger(&self, value: T) {
        let mut state = self.inner.lock();
        state.pending = Some(value);

        if state.current.as_ref().is_some_and(|h| h.is_active()) {
            return;
        }

        let inner = Arc::clone(&self.inner);
        let work: Work = Box::new(move |ctx: CancellationToken| -> TaskFuture {
            Box::pin(async move {
                loop {
                    let value = {
                        let mut state = inner.lock();
                        match state.pending.take() {
                            Some(v) => v,
                            None => {
                                state.current = None;
                                return Ok(());
                            }
                        }
                    };
                    if let Err(e) = (inner.func)(value, ctx.clone()).await {
                        // retire on failure; a value already in the mailbox
                        // stays for the next trigger
                        inner.lock().current = None;
                        return Err(e);
                    }
                }
            })
        });
        state.current = Some(self.spawner.spawn(&self.name, work));
    }

    /// Returns `true` while a drain task from this guard is in flight.
    pub fn is_busy(&self) -> bool {
        self.inner.lock().current.as_ref().is_some_and(|h| h.is_active())
    }
}
