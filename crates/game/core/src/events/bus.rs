//! Subscription table for battle events.

use std::fmt;
use std::sync::Arc;

use super::event::{BattleEvent, EventKind};
use crate::battle::Battle;
use crate::error::HookError;

/// A callback invoked for events of the kinds it was subscribed to.
///
/// Handlers receive the battle mutably and may emit further events. A handler
/// error is logged by the battle and otherwise ignored.
pub trait EventHandler: Send + Sync {
    /// Returns a human-readable name for this handler (used in logging).
    fn name(&self) -> &str;

    fn handle(&self, event: &BattleEvent, battle: &mut Battle) -> Result<(), HookError>;
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: Arc<dyn EventHandler>,
}

/// Ordered subscription table.
///
/// Dispatch order for one event kind is subscription order. The bus itself
/// never invokes handlers; [`Battle::emit`] snapshots
/// [`EventBus::handlers_for`] and calls each in turn, so handlers are free to
/// subscribe, unsubscribe or emit while an event is being delivered.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, handler: Arc<dyn EventHandler>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, handler });
        id
    }

    /// Removes a subscription. Unknown or already removed ids are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        before != self.subscriptions.len()
    }

    /// Removes the exact `(kind, handler)` pair, matched by handler identity.
    pub fn unsubscribe_handler(&mut self, kind: EventKind, handler: &Arc<dyn EventHandler>) -> bool {
        let target = Arc::as_ptr(handler) as *const ();
        let position = self
            .subscriptions
            .iter()
            .position(|s| s.kind == kind && Arc::as_ptr(&s.handler) as *const () == target);
        match position {
            Some(index) => {
                self.subscriptions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Handlers subscribed to `kind`, in subscription order.
    pub fn handlers_for(&self, kind: EventKind) -> Vec<Arc<dyn EventHandler>> {
        self.subscriptions
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| Arc::clone(&s.handler))
            .collect()
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.subscriptions
                    .iter()
                    .map(|s| (s.id, s.kind, s.handler.name().to_string())),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl EventHandler for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn handle(&self, _event: &BattleEvent, _battle: &mut Battle) -> Result<(), HookError> {
            Ok(())
        }
    }

    #[test]
    fn handlers_come_back_in_subscription_order() {
        let mut bus = EventBus::new();
        bus.subscribe(EventKind::TurnStart, Arc::new(Named("first")));
        bus.subscribe(EventKind::TurnEnd, Arc::new(Named("other")));
        bus.subscribe(EventKind::TurnStart, Arc::new(Named("second")));

        let names: Vec<_> = bus
            .handlers_for(EventKind::TurnStart)
            .iter()
            .map(|h| h.name().to_string())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn unsubscribing_twice_is_a_no_op() {
        let mut bus = EventBus::new();
        let id = bus.subscribe(EventKind::BattleEnd, Arc::new(Named("x")));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert!(bus.is_empty());
    }

    #[test]
    fn unsubscribe_handler_matches_identity_and_kind() {
        let mut bus = EventBus::new();
        let handler: Arc<dyn EventHandler> = Arc::new(Named("x"));
        bus.subscribe(EventKind::TurnStart, Arc::clone(&handler));
        bus.subscribe(EventKind::TurnEnd, Arc::clone(&handler));

        assert!(!bus.unsubscribe_handler(EventKind::HitLanded, &handler));
        assert!(bus.unsubscribe_handler(EventKind::TurnStart, &handler));
        assert_eq!(bus.subscriber_count(EventKind::TurnStart), 0);
        assert_eq!(bus.subscriber_count(EventKind::TurnEnd), 1);
    }
}
