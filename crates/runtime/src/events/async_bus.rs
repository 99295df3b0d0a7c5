//! Async subscriber bus.

use std::sync::Arc;

use async_trait::async_trait;
use battle_core::{BattleEvent, EventKind};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;

/// A subscriber awaited for each event of the kinds it subscribed to.
#[async_trait]
pub trait AsyncSubscriber: Send + Sync {
    /// Returns a human-readable name for this subscriber (used in logging).
    fn name(&self) -> &str;

    async fn on_event(&self, event: &BattleEvent) -> Result<()>;
}

/// Handle returned by [`AsyncEventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AsyncSubscriptionId(u64);

struct Entry {
    id: AsyncSubscriptionId,
    kind: EventKind,
    subscriber: Arc<dyn AsyncSubscriber>,
}

#[derive(Default)]
struct Table {
    entries: Vec<Entry>,
    next_id: u64,
}

/// Subscription table whose dispatch awaits each subscriber in registration
/// order.
///
/// Clones share the same table. Delivery works on a snapshot, so subscribers
/// may subscribe or unsubscribe while an event is in flight.
#[derive(Clone, Default)]
pub struct AsyncEventBus {
    table: Arc<RwLock<Table>>,
}

impl AsyncEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(
        &self,
        kind: EventKind,
        subscriber: Arc<dyn AsyncSubscriber>,
    ) -> AsyncSubscriptionId {
        let mut table = self.table.write().await;
        let id = AsyncSubscriptionId(table.next_id);
        table.next_id += 1;
        table.entries.push(Entry {
            id,
            kind,
            subscriber,
        });
        id
    }

    /// Removes a subscription. Unknown ids are a no-op.
    pub async fn unsubscribe(&self, id: AsyncSubscriptionId) -> bool {
        let mut table = self.table.write().await;
        let before = table.entries.len();
        table.entries.retain(|e| e.id != id);
        before != table.entries.len()
    }

    /// Delivers `event` to every subscriber of its kind, one at a time.
    ///
    /// A failing subscriber is logged and skipped. Returns how many
    /// subscribers completed successfully.
    pub async fn emit_async(&self, event: &BattleEvent) -> usize {
        let kind = event.kind();
        let snapshot: Vec<Arc<dyn AsyncSubscriber>> = {
            let table = self.table.read().await;
            table
                .entries
                .iter()
                .filter(|e| e.kind == kind)
                .map(|e| Arc::clone(&e.subscriber))
                .collect()
        };

        let mut delivered = 0;
        for subscriber in snapshot {
            match subscriber.on_event(event).await {
                Ok(()) => delivered += 1,
                Err(error) => {
                    debug!(
                        target: "battle_runtime::events",
                        subscriber = subscriber.name(),
                        event = %kind,
                        %error,
                        "async subscriber failed"
                    );
                }
            }
        }
        delivered
    }

    pub async fn subscriber_count(&self, kind: EventKind) -> usize {
        self.table
            .read()
            .await
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }
}
