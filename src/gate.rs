//! # Reusable single-waiter pause gate.
//!
//! [`PauseGate`] is a suspend/resume rendezvous: one flow parks in
//! [`wait`](PauseGate::wait) until another flow calls
//! [`resume`](PauseGate::resume). The gate holds at most one pending
//! resumption capability and is reusable across any number of
//! wait/resume cycles.
//!
//! ## Rules
//! - `resume()` with no parked waiter does nothing and leaves **no latched
//!   signal**: a later `wait()` still parks.
//! - `wait()` while the gate is already paused returns immediately instead
//!   of creating a second waiter.
//! - A waiter whose future is dropped (external cancellation) clears the
//!   slot on drop, so a later `resume()` does not act on a dead handle.
//!
//! Waiting concurrently from two independent flows before a `resume()` is
//! unsupported: the second flow observes "paused" and returns immediately,
//! which is only correct when both waits belong to one logical flow.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::oneshot;

/// One-slot suspend/resume gate.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use taskgate::PauseGate;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let gate = Arc::new(PauseGate::new());
///
///     let worker = tokio::spawn({
///         let gate = Arc::clone(&gate);
///         async move {
///             gate.wait().await; // parks until resumed
///             println!("released");
///         }
///     });
///
///     tokio::task::yield_now().await;
///     gate.resume();
///     worker.await.unwrap();
/// }
/// ```
#[derive(Default)]
pub struct PauseGate {
    waiter: Mutex<Option<oneshot::Sender<()>>>,
}

impl PauseGate {
    /// Creates a gate with an empty waiter slot.
    pub fn new() -> Self {
        Self {
            waiter: Mutex::new(None),
        }
    }

    /// Returns `true` while a flow is parked in [`wait`](Self::wait).
    pub fn is_paused(&self) -> bool {
        self.lock().is_some()
    }

    /// Parks the calling flow until the next [`resume`](Self::resume).
    ///
    /// Returns immediately when the gate is already paused, so a single
    /// flow issuing repeated waits cannot deadlock itself or displace its
    /// own waiter.
    pub async fn wait(&self) {
        let rx = {
            let mut waiter = self.lock();
            if waiter.is_some() {
                return;
            }
            let (tx, rx) = oneshot::channel();
            *waiter = Some(tx);
            rx
        };

        // if this future is dropped before resume(), the slot is cleared so
        // the gate does not keep a dead waiter
        let _clear = ClearWaiter { gate: self };
        let _ = rx.await;
    }

    /// Releases the parked flow, if any, and clears the slot.
    ///
    /// A resume with no waiter is a no-op; nothing is latched for future
    /// waits.
    pub fn resume(&self) {
        if let Some(tx) = self.lock().take() {
            let _ = tx.send(());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<oneshot::Sender<()>>> {
        self.waiter.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Drops the stored waiter when a `wait()` future is abandoned.
struct ClearWaiter<'a> {
    gate: &'a PauseGate,
}

impl Drop for ClearWaiter<'_> {
    fn drop(&mut self) {
        self.gate.lock().take();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    async fn until_paused(gate: &PauseGate, paused: bool) {
        for _ in 0..200 {
            if gate.is_paused() == paused {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("gate never reached is_paused == {paused}");
    }

    #[tokio::test]
    async fn test_wait_then_resume_releases() {
        let gate = Arc::new(PauseGate::new());

        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.wait().await }
        });

        until_paused(&gate, true).await;
        assert!(!waiter.is_finished());

        gate.resume();
        waiter.await.unwrap();
        assert!(!gate.is_paused());
    }

    #[tokio::test]
    async fn test_resume_without_waiter_does_not_latch() {
        let gate = Arc::new(PauseGate::new());

        gate.resume();
        assert!(!gate.is_paused());

        // a later wait() must still park instead of consuming a stale signal
        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.wait().await }
        });

        until_paused(&gate, true).await;
        assert!(!waiter.is_finished());

        gate.resume();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_wait_while_paused_returns_immediately() {
        let gate = Arc::new(PauseGate::new());

        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.wait().await }
        });
        until_paused(&gate, true).await;

        // reentrant wait from the controlling flow: no second waiter, no hang
        gate.wait().await;
        assert!(gate.is_paused(), "original waiter still parked");

        gate.resume();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_waiter_clears_slot() {
        let gate = Arc::new(PauseGate::new());

        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.wait().await }
        });
        until_paused(&gate, true).await;

        waiter.abort();
        until_paused(&gate, false).await;

        // the gate stays usable: resume on the dead cycle is a no-op, the
        // next wait/resume cycle behaves normally
        gate.resume();
        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.wait().await }
        });
        until_paused(&gate, true).await;
        gate.resume();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_gate_is_reusable_across_cycles() {
        let gate = Arc::new(PauseGate::new());

        for _ in 0..3 {
            let waiter = tokio::spawn({
                let gate = Arc::clone(&gate);
                async move { gate.wait().await }
            });
            until_paused(&gate, true).await;
            gate.resume();
            waiter.await.unwrap();
            assert!(!gate.is_paused());
        }
    }
}
