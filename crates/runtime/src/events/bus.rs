//! Topic-based broadcast bus.

use battle_core::BattleEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Battle start, end and defeats
    Battle,
    /// Turn boundaries and level ups
    Turn,
    /// Actions, hits, damage and healing
    Combat,
    /// Ultimate lifecycle
    Ultimate,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Battle, Topic::Turn, Topic::Combat, Topic::Ultimate];

    pub fn of(event: &BattleEvent) -> Self {
        match event {
            BattleEvent::BattleStart | BattleEvent::BattleEnd | BattleEvent::Defeated { .. } => {
                Topic::Battle
            }
            BattleEvent::TurnStart { .. }
            | BattleEvent::TurnEnd { .. }
            | BattleEvent::LevelUp { .. } => Topic::Turn,
            BattleEvent::ActionTaken { .. }
            | BattleEvent::HitLanded { .. }
            | BattleEvent::DamageTaken { .. }
            | BattleEvent::Damage { .. }
            | BattleEvent::CriticalHit { .. }
            | BattleEvent::Dodged { .. }
            | BattleEvent::HealReceived { .. } => Topic::Combat,
            BattleEvent::UltimateUsed { .. }
            | BattleEvent::UltimateCompleted { .. }
            | BattleEvent::UltimateFailed { .. }
            | BattleEvent::LightUltimate { .. } => Topic::Ultimate,
        }
    }
}

/// Topic-based broadcast bus.
///
/// Publishing is best-effort: with no receivers the event is dropped, and a
/// receiver that falls more than `capacity` events behind sees `Lagged`.
#[derive(Clone)]
pub struct ObserverBus {
    battle: broadcast::Sender<BattleEvent>,
    turn: broadcast::Sender<BattleEvent>,
    combat: broadcast::Sender<BattleEvent>,
    ultimate: broadcast::Sender<BattleEvent>,
}

impl ObserverBus {
    /// Creates a new bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new bus with the given capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            battle: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
            ultimate: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<BattleEvent> {
        match topic {
            Topic::Battle => &self.battle,
            Topic::Turn => &self.turn,
            Topic::Combat => &self.combat,
            Topic::Ultimate => &self.ultimate,
        }
    }

    /// Publish an event to its topic. Returns how many receivers got it.
    pub fn publish(&self, event: BattleEvent) -> usize {
        let topic = Topic::of(&event);
        match self.sender(topic).send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                // No subscribers for this topic - this is normal, not an error
                tracing::trace!(target: "battle_runtime::events", ?topic, "no subscribers");
                0
            }
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<BattleEvent>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn receiver_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for ObserverBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObserverBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for topic in Topic::ALL {
            map.entry(&topic, &self.receiver_count(topic));
        }
        map.finish()
    }
}
