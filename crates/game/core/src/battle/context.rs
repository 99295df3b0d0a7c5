//! Per-battle bookkeeping owned by [`Battle`](super::Battle).
//!
//! Everything element and passive hooks need to remember between calls lives
//! here, keyed by combatant. [`BattleContext::reset`] runs at `battle_end`, so
//! nothing leaks into the next battle.

use std::collections::HashMap;

use crate::combatant::CombatantId;

/// Players and foes a Wind attacker registered for its current turn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindTurn {
    pub players: Vec<CombatantId>,
    pub foes: Vec<CombatantId>,
}

/// Turn-scoped target registry used by Wind's spread.
#[derive(Clone, Debug, Default)]
pub struct WindRegistry {
    turns: HashMap<CombatantId, WindTurn>,
}

impl WindRegistry {
    pub fn register(&mut self, actor: CombatantId, players: Vec<CombatantId>, foes: Vec<CombatantId>) {
        self.turns.insert(actor, WindTurn { players, foes });
    }

    pub fn get(&self, actor: CombatantId) -> Option<&WindTurn> {
        self.turns.get(&actor)
    }

    pub fn release(&mut self, actor: CombatantId) -> Option<WindTurn> {
        self.turns.remove(&actor)
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct BattleContext {
    fire_drain: HashMap<CombatantId, u32>,
    wind: WindRegistry,
    dark_bonus: HashMap<CombatantId, f64>,
    lightning_shocks: HashMap<CombatantId, u32>,
    passive_stacks: HashMap<(&'static str, CombatantId), u32>,
}

impl BattleContext {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Fire =====

    pub fn fire_drain_stacks(&self, id: CombatantId) -> u32 {
        self.fire_drain.get(&id).copied().unwrap_or(0)
    }

    /// Adds one drain stack and returns the new count.
    pub fn add_fire_drain_stack(&mut self, id: CombatantId) -> u32 {
        let stacks = self.fire_drain.entry(id).or_insert(0);
        *stacks += 1;
        *stacks
    }

    // ===== Wind =====

    pub fn wind(&self) -> &WindRegistry {
        &self.wind
    }

    pub fn wind_mut(&mut self) -> &mut WindRegistry {
        &mut self.wind
    }

    // ===== Dark =====

    pub fn dark_bonus(&self, id: CombatantId) -> Option<f64> {
        self.dark_bonus.get(&id).copied()
    }

    pub fn set_dark_bonus(&mut self, id: CombatantId, bonus: f64) {
        self.dark_bonus.insert(id, bonus);
    }

    pub fn clear_dark_bonus(&mut self, id: CombatantId) -> Option<f64> {
        self.dark_bonus.remove(&id)
    }

    // ===== Lightning =====

    /// Next shock stack number for `target`. Numbers only grow within a battle
    /// so stack effect names never collide.
    pub fn next_lightning_shock(&mut self, target: CombatantId) -> u32 {
        let counter = self.lightning_shocks.entry(target).or_insert(0);
        *counter += 1;
        *counter
    }

    // ===== Passives =====

    pub fn passive_stack(&self, passive: &'static str, owner: CombatantId) -> u32 {
        self.passive_stacks.get(&(passive, owner)).copied().unwrap_or(0)
    }

    /// Adds one stack, capped at `max`, and returns the new count.
    pub fn add_passive_stack(&mut self, passive: &'static str, owner: CombatantId, max: u32) -> u32 {
        let stacks = self.passive_stacks.entry((passive, owner)).or_insert(0);
        *stacks = (*stacks + 1).min(max);
        *stacks
    }

    pub fn clear_passive_stack(&mut self, passive: &'static str, owner: CombatantId) -> u32 {
        self.passive_stacks.remove(&(passive, owner)).unwrap_or(0)
    }

    /// Drops every per-battle record.
    pub fn reset(&mut self) {
        self.fire_drain.clear();
        self.wind.clear();
        self.dark_bonus.clear();
        self.lightning_shocks.clear();
        self.passive_stacks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fire_drain.is_empty()
            && self.wind.is_empty()
            && self.dark_bonus.is_empty()
            && self.lightning_shocks.is_empty()
            && self.passive_stacks.is_empty()
    }
}
