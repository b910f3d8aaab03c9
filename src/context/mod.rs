//! # Execution context: spawning and tracking cancellable work.
//!
//! The guards never create threads or runtimes; they are handed a
//! [`Spawn`] capability and receive back a [`TaskHandle`] per started task.
//!
//! - [`Spawn`] / [`SpawnRef`] - starts a cancellable unit of work
//! - [`TaskHandle`] / [`HandleRef`] - activity query + cooperative cancel
//! - [`TokioSpawner`] - bundled implementation on `tokio::spawn`

mod handle;
mod runtime;
mod spawn;

pub use handle::{HandleRef, TaskHandle};
pub use runtime::TokioSpawner;
pub use spawn::{Spawn, SpawnRef, TaskFuture, Work};
