//! Passive trigger protocol.
//!
//! A passive declares the [`EventKind`]s it listens to and reacts when one of
//! them fires for its owner. Tiered variants share one algorithm and differ
//! only in the coefficient table their [`PassiveTier`] selects, so swapping a
//! tier never touches dispatch.
//!
//! Passives hold no per-combatant state themselves; stacks live in
//! [`BattleContext`](crate::battle::BattleContext) and are dropped at
//! `battle_end`.

mod ember_tempo;
mod flux_cycle;
mod guardians_aegis;
mod registry;
mod tier;

pub use ember_tempo::EmberTempo;
pub use flux_cycle::FluxCycle;
pub use guardians_aegis::GuardiansAegis;
pub use registry::{PassiveFactory, PassiveRegistry};
pub use tier::PassiveTier;

use std::fmt;

use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::error::HookError;
use crate::events::{BattleEvent, EventKind};

pub trait Passive: Send + Sync + fmt::Debug {
    /// Registry id, e.g. `"guardians_aegis"`.
    fn id(&self) -> &'static str;

    fn tier(&self) -> PassiveTier;

    fn triggers(&self) -> &'static [EventKind];

    /// Routes an event to the matching `on_*` hook when it concerns `owner`.
    ///
    /// Turn, action and ultimate events match on the actor, `hit_landed` on the
    /// attacker, `damage_taken` on the target. Battle lifecycle events always
    /// dispatch.
    fn on_event(
        &self,
        owner: CombatantId,
        event: &BattleEvent,
        battle: &mut Battle,
    ) -> Result<(), HookError> {
        match event {
            BattleEvent::BattleStart => self.on_battle_start(owner, battle),
            BattleEvent::BattleEnd => self.on_battle_end(owner, battle),
            BattleEvent::TurnStart { actor } if *actor == owner => self.on_turn_start(owner, battle),
            BattleEvent::TurnEnd { actor } if *actor == owner => self.on_turn_end(owner, battle),
            BattleEvent::ActionTaken { actor } if *actor == owner => {
                self.on_action_taken(owner, battle)
            }
            BattleEvent::UltimateUsed { actor } if *actor == owner => {
                self.on_ultimate_used(owner, battle)
            }
            BattleEvent::HitLanded {
                attacker,
                target,
                amount,
                ..
            } if *attacker == owner => self.on_hit_landed(owner, *target, *amount, battle),
            BattleEvent::DamageTaken {
                target,
                attacker,
                amount,
            } if *target == owner => self.on_damage_taken(owner, *attacker, *amount, battle),
            _ => Ok(()),
        }
    }

    fn on_battle_start(&self, _owner: CombatantId, _battle: &mut Battle) -> Result<(), HookError> {
        Ok(())
    }

    fn on_battle_end(&self, _owner: CombatantId, _battle: &mut Battle) -> Result<(), HookError> {
        Ok(())
    }

    fn on_turn_start(&self, _owner: CombatantId, _battle: &mut Battle) -> Result<(), HookError> {
        Ok(())
    }

    fn on_turn_end(&self, _owner: CombatantId, _battle: &mut Battle) -> Result<(), HookError> {
        Ok(())
    }

    fn on_action_taken(&self, _owner: CombatantId, _battle: &mut Battle) -> Result<(), HookError> {
        Ok(())
    }

    fn on_ultimate_used(&self, _owner: CombatantId, _battle: &mut Battle) -> Result<(), HookError> {
        Ok(())
    }

    fn on_hit_landed(
        &self,
        _owner: CombatantId,
        _target: CombatantId,
        _amount: u32,
        _battle: &mut Battle,
    ) -> Result<(), HookError> {
        Ok(())
    }

    fn on_damage_taken(
        &self,
        _owner: CombatantId,
        _attacker: Option<CombatantId>,
        _amount: u32,
        _battle: &mut Battle,
    ) -> Result<(), HookError> {
        Ok(())
    }
}
