//! # Example: preempt_search
//!
//! Type-ahead search where every keystroke preempts the in-flight query.
//!
//! Shows how to:
//! - Build a [`PreemptGuard`] over a [`TokioSpawner`]
//! - Watch stale queries get cancelled before they render
//! - Observe lifecycle events on the [`Bus`]
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► trigger "r"      ──► query task 1 starts
//!   ├─► trigger "ru"     ──► task 1 cancelled, task 2 starts
//!   ├─► trigger "rust"   ──► task 2 cancelled, task 3 starts
//!   └─► task 3 is the only one that renders results
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example preempt_search
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use taskgate::{Bus, EventKind, PreemptGuard, TaskError, TokioSpawner};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== preempt_search example ===\n");

    let bus = Bus::new(64);
    let mut events = bus.subscribe();
    let spawner = Arc::new(TokioSpawner::with_bus(bus));

    // the "query" shared by all triggers; each trigger snapshots the latest
    let query = Arc::new(Mutex::new(String::new()));

    let search = PreemptGuard::new("search", spawner, {
        let query = Arc::clone(&query);
        move |_ctx: CancellationToken| {
            let q = query.lock().unwrap().clone();
            async move {
                println!("[search] querying backend for {q:?}...");
                tokio::time::sleep(Duration::from_millis(120)).await;
                println!("[search] rendered results for {q:?}");
                Ok::<_, TaskError>(())
            }
        }
    });

    // three keystrokes, faster than the 120ms backend call
    for keystroke in ["r", "ru", "rust"] {
        *query.lock().unwrap() = keystroke.to_string();
        search.trigger();
        tokio::time::sleep(Duration::from_millis(40)).await;
    }

    // let the last query finish
    tokio::time::sleep(Duration::from_millis(200)).await;

    println!("\n[events]");
    while let Ok(ev) = events.try_recv() {
        match ev.kind {
            EventKind::TaskStarting => println!("  starting seq={}", ev.seq),
            EventKind::TaskStopped => println!("  stopped  seq={}", ev.seq),
            EventKind::TaskFailed => println!("  failed   seq={} err={:?}", ev.seq, ev.error),
        }
    }

    println!("\n=== example completed ===");
}
