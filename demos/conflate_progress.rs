//! # Example: conflate_progress
//!
//! Progress updates arriving faster than the renderer can draw them.
//!
//! Shows how to:
//! - Build a [`ConflateGuard`] over a [`TokioSpawner`]
//! - Flood it with updates and watch intermediates conflate
//! - Confirm the final value is always rendered
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► trigger 5%, 10%, ..., 100% every 10ms
//!   │     └─► renderer draws one frame per 60ms
//!   │           ├─► frames in between collapse to the newest value
//!   │           └─► 100% is guaranteed to be drawn last
//!   └─► wait for the guard to go idle
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example conflate_progress
//! ```

use std::time::Duration;

use taskgate::{ConflateGuard, TaskError, TokioSpawner};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== conflate_progress example ===\n");

    let render = ConflateGuard::new("render", TokioSpawner::arc(), {
        |percent: u32, _ctx: CancellationToken| async move {
            // pretend drawing a frame is slow
            tokio::time::sleep(Duration::from_millis(60)).await;
            println!("[render] frame drawn at {percent}%");
            Ok::<_, TaskError>(())
        }
    });

    // updates arrive every 10ms; the renderer needs 60ms per frame
    for percent in (5..=100).step_by(5) {
        render.trigger(percent);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    while render.is_busy() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    println!("\n=== example completed: final frame is always 100% ===");
}
