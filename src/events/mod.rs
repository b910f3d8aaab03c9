//! # Lifecycle events published by the execution context.
//!
//! - [`Event`] / [`EventKind`] - what happened to a spawned task
//! - [`Bus`] - broadcast channel fanning events out to subscribers

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
