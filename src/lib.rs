//! # taskgate
//!
//! **Taskgate** is a small library of single-slot, latest-wins task-launch
//! primitives for Rust.
//!
//! Rapid submissions against one logical unit of work - a refresh, a
//! search, a render - should not pile up. Each guard here owns exactly one
//! "current task" slot and decides, per trigger, whether submitted work
//! runs, preempts, or conflates. Execution is delegated to a caller-supplied
//! [`Spawn`] capability; the guards never create threads or runtimes.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   submission flow (UI / event loop)
//!     │ trigger()            │ trigger()            │ trigger(v)
//!     ▼                      ▼                      ▼
//! ┌───────────────┐  ┌───────────────┐  ┌─────────────────────────┐
//! │ExclusiveGuard │  │ PreemptGuard  │  │    ConflateGuard<T>     │
//! │ drop-if-busy  │  │ cancel+restart│  │ mailbox: newest value   │
//! └──────┬────────┘  └──────┬────────┘  └──────────┬──────────────┘
//!        │ slot: one        │ slot: one            │ slot: one drain task
//!        ▼                  ▼                      ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Spawn (execution context, injected)                          │
//! │  - starts cancellable work, returns TaskHandle                │
//! │  - TokioSpawner: tokio::spawn + CancellationToken             │
//! └──────────────────────────────┬────────────────────────────────┘
//!                                ▼
//!                     Bus (lifecycle events, optional)
//!                TaskStarting / TaskStopped / TaskFailed
//! ```
//!
//! [`PauseGate`] is the fourth primitive: a reusable one-waiter
//! suspend/resume rendezvous, independent of the guards.
//!
//! ## Features
//! | Area          | Description                                              | Key types / traits                 |
//! |---------------|----------------------------------------------------------|------------------------------------|
//! | **Guards**    | Latest-wins launch strategies over a single task slot.   | [`ExclusiveGuard`], [`PreemptGuard`], [`ConflateGuard`] |
//! | **Gate**      | Suspend/resume rendezvous with one waiter slot.          | [`PauseGate`]                      |
//! | **Context**   | Pluggable spawning and cooperative cancellation.         | [`Spawn`], [`TaskHandle`], [`TokioSpawner`] |
//! | **Events**    | Lifecycle events for observability.                      | [`Bus`], [`Event`], [`EventKind`]  |
//! | **Errors**    | Typed task failure channel.                              | [`TaskError`]                      |
//!
//! ## Example
//! ```no_run
//! use std::time::Duration;
//! use taskgate::{PreemptGuard, TaskError, TokioSpawner};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // newest keystroke wins; stale searches are cancelled mid-flight
//!     let search = PreemptGuard::new("search", TokioSpawner::arc(), {
//!         |ctx: CancellationToken| async move {
//!             tokio::time::sleep(Duration::from_millis(200)).await; // backend call
//!             if ctx.is_cancelled() {
//!                 return Err(TaskError::Canceled);
//!             }
//!             println!("results rendered");
//!             Ok(())
//!         }
//!     });
//!
//!     search.trigger();
//!     search.trigger(); // first run is cancelled before its render
//!     tokio::time::sleep(Duration::from_millis(300)).await;
//! }
//! ```
//!
//! ## Caller discipline
//! Triggers are expected from a **single logical submission flow**. The
//! guards tolerate concurrent triggers (the slot sits behind a mutex), but
//! cross-thread submissions race for "newest" without external ordering.
//! Callback failures propagate through the execution context's reporting
//! convention and are never retried.

mod context;
mod error;
mod events;
mod gate;
mod guards;

// ---- Public re-exports ----

pub use context::{HandleRef, Spawn, SpawnRef, TaskFuture, TaskHandle, TokioSpawner, Work};
pub use error::TaskError;
pub use events::{Bus, Event, EventKind};
pub use gate::PauseGate;
pub use guards::{ConflateGuard, ExclusiveGuard, PreemptGuard};
