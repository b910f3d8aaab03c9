//! # Event bus for broadcasting lifecycle events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking event publishing from the execution context.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks; it calls `broadcast::Sender::send`.
//! - **Bounded capacity**: a single ring buffer stores recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are lost if there are no active subscribers at send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for lifecycle events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); multiple
/// publishers may publish concurrently and each subscriber receives a clone
/// of every event sent after it subscribed.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity.
    ///
    /// Capacity is **shared** across all receivers (not per-subscriber) and
    /// is clamped to a minimum of 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active subscribers.
    ///
    /// If there are no receivers, the event is dropped and this call still
    /// returns immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    ///
    /// Each call creates an **independent** receiver; a receiver only gets
    /// events **sent after** it subscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::now(EventKind::TaskStarting).with_task("demo"));

        let ev = rx.recv().await.expect("event delivered");
        assert_eq!(ev.kind, EventKind::TaskStarting);
        assert_eq!(ev.task.as_deref(), Some("demo"));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_dropped() {
        let bus = Bus::new(16);
        bus.publish(Event::now(EventKind::TaskStopped));

        // a receiver created afterwards must not see the earlier event
        let mut rx = bus.subscribe();
        bus.publish(Event::now(EventKind::TaskFailed).with_task("late"));
        let ev = rx.recv().await.expect("event delivered");
        assert_eq!(ev.kind, EventKind::TaskFailed);
    }
}
