//! Fire: damage grows with the attacker's missing HP; the ultimate trades
//! sustained self-burn for a permanent damage multiplier.

use tracing::debug;

use super::{DamageType, DamageTypeHooks, DotProfile, ULTIMATE_ACTION, UltimateOutcome, strike_each};
use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::error::HookError;
use crate::events::{BattleEvent, EventKind};

pub struct Fire;

impl DamageTypeHooks for Fire {
    fn kind(&self) -> DamageType {
        DamageType::Fire
    }

    /// `damage × (1 + missing HP ratio)`, then `× √5` while the attacker holds
    /// at least one drain stack.
    fn on_damage(
        &self,
        damage: f64,
        attacker: CombatantId,
        _target: CombatantId,
        battle: &mut Battle,
    ) -> Result<f64, HookError> {
        let missing = battle
            .combatant(attacker)
            .ok_or(HookError::MissingCombatant(attacker))?
            .missing_hp_ratio();

        let mut scaled = damage * (1.0 + missing);
        if battle.context().fire_drain_stacks(attacker) > 0 {
            scaled *= battle.config().fire_drain_multiplier;
        }
        Ok(scaled)
    }

    fn dot_profile(&self) -> Option<DotProfile> {
        Some(DotProfile {
            name: "Blazing Torment",
            ratio: 0.5,
            turns: 3,
        })
    }

    /// Hits every living enemy once for the caster's attack and tries to
    /// ignite each, then adds one drain stack.
    fn ultimate(
        &self,
        actor: CombatantId,
        _allies: &[CombatantId],
        enemies: &[CombatantId],
        battle: &mut Battle,
    ) -> UltimateOutcome {
        let Some(atk) = battle.combatant(actor).map(|c| c.atk()) else {
            return UltimateOutcome::Failed;
        };

        let outcome = strike_each(battle, enemies, |battle, _, enemy| {
            let dealt = battle.strike(actor, enemy, atk, ULTIMATE_ACTION);
            battle.maybe_inflict_dot(enemy, actor, f64::from(dealt), None);
        });

        if outcome.is_success() {
            let stacks = battle.context_mut().add_fire_drain_stack(actor);
            debug!(target: "battle_core::damage", actor = %actor, stacks, "fire drain stack gained");
        }
        outcome
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[EventKind::TurnStart]
    }

    /// Burns the owner for 5% max HP per drain stack at each of its turn starts.
    fn on_event(
        &self,
        owner: CombatantId,
        event: &BattleEvent,
        battle: &mut Battle,
    ) -> Result<(), HookError> {
        let BattleEvent::TurnStart { actor } = event else {
            return Ok(());
        };
        if *actor != owner {
            return Ok(());
        }

        let stacks = battle.context().fire_drain_stacks(owner);
        if stacks == 0 {
            return Ok(());
        }
        let max_hp = battle
            .combatant(owner)
            .ok_or(HookError::MissingCombatant(owner))?
            .max_hp();
        let burn = f64::from(max_hp) * battle.config().fire_drain_burn * f64::from(stacks);
        battle.apply_cost_damage(owner, burn);
        Ok(())
    }
}
