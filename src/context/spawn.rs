//! # Spawn capability.
//!
//! [`Spawn`] is the seam between the guards and whatever actually runs the
//! work. A unit of work is a closure that receives a fresh
//! [`CancellationToken`] and returns the future to drive; the closure is
//! called once, at start time, so every start owns its own state (no hidden
//! mutation between runs).
//!
//! The guards only ever call [`Spawn::spawn`] and the two [`TaskHandle`]
//! methods, which keeps them portable across thread-pool, event-loop, or
//! async-task execution models.
//!
//! [`TaskHandle`]: crate::TaskHandle

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::context::handle::HandleRef;
use crate::error::TaskError;

/// Boxed future driven by a spawned task.
pub type TaskFuture = BoxFuture<'static, Result<(), TaskError>>;

/// A unit of work: builds its future from the task's cancellation token.
pub type Work = Box<dyn FnOnce(CancellationToken) -> TaskFuture + Send>;

/// Shared handle to a spawn capability.
pub type SpawnRef = Arc<dyn Spawn>;

/// # Capability to start cancellable asynchronous work.
///
/// Implementations must hand `work` a token that [`cancel`] later trips, and
/// must stop driving the future at its next suspension point once the token
/// is cancelled - work that was cancelled must not run its remaining
/// effects.
///
/// `name` is a human-readable label for observability; implementations may
/// ignore it.
///
/// [`cancel`]: crate::TaskHandle::cancel
pub trait Spawn: Send + Sync + 'static {
    /// Starts `work` and returns a handle identifying the in-flight task.
    fn spawn(&self, name: &str, work: Work) -> HandleRef;
}
