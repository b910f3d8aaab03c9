//! # Single-slot launch guards.
//!
//! Each guard owns exactly one "current task" slot and decides, per trigger,
//! whether and when new work starts:
//!
//! - [`ExclusiveGuard`] - drop-while-busy: triggers while a run is active are ignored
//! - [`PreemptGuard`] - cancel-then-restart: the newest trigger always wins
//! - [`ConflateGuard`] - retain-newest: intermediate values may be dropped,
//!   the last submitted value is always processed
//!
//! ## Caller discipline
//! Trigger methods take `&self` and are cheap and non-blocking, but the
//! guards are built for a **single logical submission flow** (one event
//! loop, one UI thread). Submitting from several independent threads
//! without external ordering gives no useful ordering guarantees between
//! those submissions.

mod conflate;
mod exclusive;
mod preempt;

pub use conflate::ConflateGuard;
pub use exclusive::ExclusiveGuard;
pub use preempt::PreemptGuard;

#[cfg(test)]
pub(crate) mod testutil {
    use std::time::Duration;

    /// Polls `cond` for up to a second; panics if it never holds.
    pub async fn wait_until(mut cond: impl FnMut() -> bool) {
        for _ in 0..200 {
            if cond() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached within 1s");
    }
}
