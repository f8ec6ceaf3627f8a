//! Sync broadcast bus
//!
//! In-process publish/subscribe for full-snapshot change notifications.
//! Every connected subscriber (admin console, customer menu views)
//! receives the complete collection on each change; slow subscribers that
//! lag past the channel capacity miss intermediate snapshots and catch up
//! on the next one, which is safe because snapshots are not diffs.

use tokio::sync::broadcast;

use shared::message::SyncEvent;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Clone, Debug)]
pub struct SyncBus {
    tx: broadcast::Sender<SyncEvent>,
}

impl SyncBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish a snapshot event to all current subscribers.
    /// No subscribers is not an error.
    pub fn publish(&self, event: SyncEvent) {
        let receivers = self.tx.receiver_count();
        if self.tx.send(event).is_ok() {
            tracing::debug!(receivers, "Sync event published");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = SyncBus::new();
        let mut rx = bus.subscribe();

        bus.publish(SyncEvent::new("orders", 1, "created", json!([])));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.resource, "orders");
        assert_eq!(event.version, 1);
    }

    #[test]
    fn publish_without_subscribers_is_a_noop() {
        let bus = SyncBus::new();
        bus.publish(SyncEvent::new("menu", 1, "updated", serde_json::Value::Null));
    }
}
