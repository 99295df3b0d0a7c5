//! Paced reference turn driver.

use std::time::Duration;

use battle_core::{Battle, CombatantId, Side};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, RuntimeError};
use crate::events::{AsyncEventBus, ObserverBus};

/// Runner tuning.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Hard stop for battles where neither side can finish the other.
    pub max_rounds: u32,
    /// Delay after every turn. `None` runs flat out.
    pub pacing: Option<Duration>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            pacing: None,
        }
    }
}

impl RunnerConfig {
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = Some(pacing);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CombatantSummary {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub hp: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
}

/// Outcome of [`BattleRunner::run`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattleReport {
    /// `None` when the round limit was reached first.
    pub winner: Option<Side>,
    pub rounds: u32,
    pub turns: u32,
    pub events: usize,
    pub combatants: Vec<CombatantSummary>,
}

impl BattleReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(RuntimeError::Report)
    }
}

/// Drives a [`Battle`] round by round and relays its event log.
///
/// Each round walks the living combatants by descending speed. An actor
/// uses its ultimate when charged and otherwise attacks the first living
/// enemy. Every event the battle logs is published to the
/// [`ObserverBus`] and then awaited through the [`AsyncEventBus`].
pub struct BattleRunner {
    battle: Battle,
    config: RunnerConfig,
    observers: ObserverBus,
    subscribers: AsyncEventBus,
    cursor: usize,
}

impl BattleRunner {
    pub fn new(battle: Battle, config: RunnerConfig) -> Self {
        let cursor = battle.events().len();
        Self {
            battle,
            config,
            observers: ObserverBus::new(),
            subscribers: AsyncEventBus::new(),
            cursor,
        }
    }

    pub fn with_observers(mut self, observers: ObserverBus) -> Self {
        self.observers = observers;
        self
    }

    pub fn with_subscribers(mut self, subscribers: AsyncEventBus) -> Self {
        self.subscribers = subscribers;
        self
    }

    pub fn observers(&self) -> &ObserverBus {
        &self.observers
    }

    pub fn subscribers(&self) -> &AsyncEventBus {
        &self.subscribers
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn into_battle(self) -> Battle {
        self.battle
    }

    /// Runs the battle to completion or to `max_rounds`, then ends it.
    pub async fn run(&mut self) -> Result<BattleReport> {
        if !self.battle.is_active() {
            self.battle.start()?;
        }
        self.relay().await;

        let mut rounds = 0;
        let mut turns = 0;
        while self.battle.winner().is_none() && rounds < self.config.max_rounds {
            rounds += 1;
            debug!(target: "battle_runtime::runner", round = rounds, "round started");

            for actor in self.battle.turn_order() {
                if self.battle.winner().is_some() {
                    break;
                }
                if !self.battle.is_alive(actor) {
                    continue;
                }
                self.play_turn(actor)?;
                turns += 1;
                self.relay().await;

                if let Some(pacing) = self.config.pacing {
                    tokio::time::sleep(pacing).await;
                }
            }
        }

        let winner = self.battle.winner();
        self.battle.end()?;
        self.relay().await;

        info!(
            target: "battle_runtime::runner",
            winner = ?winner,
            rounds,
            turns,
            "battle finished"
        );
        Ok(self.report(winner, rounds, turns))
    }

    fn play_turn(&mut self, actor: CombatantId) -> Result<()> {
        self.battle.begin_turn(actor)?;

        // A DoT tick may have ended the actor or the fight.
        if self.battle.is_alive(actor) && !self.battle.enemies_of(actor).is_empty() {
            let charge_max = self.battle.config().ultimate_charge_max;
            let charged = self
                .battle
                .combatant(actor)
                .is_some_and(|c| c.ultimate_ready(charge_max));
            if charged {
                let outcome = self.battle.use_ultimate(actor)?;
                debug!(target: "battle_runtime::runner", %actor, ?outcome, "ultimate");
            } else {
                self.battle.take_action(actor, None)?;
            }
        }

        self.battle.end_turn(actor)?;
        Ok(())
    }

    /// Forwards every event logged since the last relay.
    async fn relay(&mut self) {
        let pending = self.battle.events()[self.cursor..].to_vec();
        self.cursor = self.battle.events().len();
        for event in pending {
            self.subscribers.emit_async(&event).await;
            self.observers.publish(event);
        }
    }

    fn report(&self, winner: Option<Side>, rounds: u32, turns: u32) -> BattleReport {
        BattleReport {
            winner,
            rounds,
            turns,
            events: self.battle.events().len(),
            combatants: self
                .battle
                .combatants()
                .iter()
                .map(|c| CombatantSummary {
                    id: c.id(),
                    name: c.name().to_string(),
                    side: c.side(),
                    hp: c.hp(),
                    damage_dealt: c.damage_dealt(),
                    damage_taken: c.damage_taken(),
                })
                .collect(),
        }
    }
}
