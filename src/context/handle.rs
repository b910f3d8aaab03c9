//! # Handle to one in-flight unit of work.

/// Owned handle to a spawned task.
pub type HandleRef = Box<dyn TaskHandle>;

/// # Identifies one in-flight unit of work.
///
/// A handle is live from the moment [`Spawn::spawn`](crate::Spawn::spawn)
/// returns until the task finishes, fails, or is cancelled.
pub trait TaskHandle: Send + Sync + 'static {
    /// Returns `true` until the task finishes, fails, or is cancelled.
    fn is_active(&self) -> bool;

    /// Requests cooperative termination. Idempotent.
    ///
    /// The task stops at its next suspension point; effects that would have
    /// run after that point are skipped. Computation that never yields
    /// cannot be interrupted by this call.
    fn cancel(&self);
}
