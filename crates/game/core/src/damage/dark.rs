//! Dark: every normal action drains the whole party (the actor included) and
//! converts the total into a one-action damage bonus. The ultimate feeds on
//! the number of DoTs afflicting the caster's allies.

use tracing::debug;

use super::{
    DamageType, DamageTypeHooks, DotProfile, Targeting, ULTIMATE_ACTION, UltimateOutcome,
    repeat_strikes,
};
use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::error::HookError;
use crate::events::{BattleEvent, EventKind};
use crate::rng::RollContext;

pub struct Dark;

impl DamageTypeHooks for Dark {
    fn kind(&self) -> DamageType {
        DamageType::Dark
    }

    fn on_damage(
        &self,
        damage: f64,
        attacker: CombatantId,
        _target: CombatantId,
        battle: &mut Battle,
    ) -> Result<f64, HookError> {
        let Some(bonus) = battle.context().dark_bonus(attacker) else {
            return Ok(damage);
        };
        if !bonus.is_finite() || bonus <= 0.0 {
            return Err(HookError::MalformedBonus {
                owner: attacker,
                value: bonus,
            });
        }
        Ok(damage * bonus)
    }

    /// Drains `max(⌊hp × ratio⌋, 1)` from each living ally above 1 HP.
    /// The drain is non-lethal and bypasses mitigation.
    fn on_action(
        &self,
        actor: CombatantId,
        allies: &[CombatantId],
        _enemies: &[CombatantId],
        battle: &mut Battle,
    ) -> Result<bool, HookError> {
        let ratio = battle.config().dark_drain_ratio;
        let mut drained = 0u32;

        for ally in battle.living(allies) {
            let hp = battle.combatant(ally).map_or(0, |c| c.hp());
            if hp <= 1 {
                continue;
            }
            let cost = ((f64::from(hp) * ratio) as u32).max(1);
            drained += battle.apply_cost_damage(ally, f64::from(cost));
        }

        let (low, high) = (battle.config().dark_variance_min, battle.config().dark_variance_max);
        let variance = battle.roll_range(actor, RollContext::DarkVariance, low, high);
        let bonus = 1.0 + f64::from(drained) * battle.config().dark_bonus_scale * variance;
        battle.context_mut().set_dark_bonus(actor, bonus);

        debug!(target: "battle_core::damage", actor = %actor, drained, bonus, "dark drain");
        Ok(true)
    }

    fn dot_profile(&self) -> Option<DotProfile> {
        Some(DotProfile {
            name: "Abyssal Corruption",
            ratio: 0.4,
            turns: 3,
        })
    }

    /// Focuses the first living foe with `hits` strikes of
    /// `atk × multiplier^(DoTs on living allies)` each.
    fn ultimate(
        &self,
        actor: CombatantId,
        allies: &[CombatantId],
        enemies: &[CombatantId],
        battle: &mut Battle,
    ) -> UltimateOutcome {
        let Some(atk) = battle.combatant(actor).map(|c| c.atk()) else {
            return UltimateOutcome::Failed;
        };
        let stacks: usize = battle
            .living(allies)
            .into_iter()
            .filter_map(|id| battle.combatant(id).map(|c| c.dot_count()))
            .sum();
        let damage = atk * battle.config().dark_stack_multiplier.powi(stacks as i32);
        let hits = battle.config().dark_ultimate_hits;

        repeat_strikes(battle, enemies, hits, Targeting::Focus, |battle, _, foe| {
            let dealt = battle.strike(actor, foe, damage, ULTIMATE_ACTION);
            battle.emit(BattleEvent::Damage {
                attacker: actor,
                target: foe,
                amount: dealt,
            });
        })
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[
            EventKind::ActionTaken,
            EventKind::UltimateUsed,
            EventKind::UltimateCompleted,
            EventKind::UltimateFailed,
        ]
    }

    /// The bonus lasts one action. `action_taken` and `ultimate_used` fire
    /// before the next drain, so clearing there never discards a fresh bonus.
    fn on_event(
        &self,
        owner: CombatantId,
        event: &BattleEvent,
        battle: &mut Battle,
    ) -> Result<(), HookError> {
        if event.subject() == Some(owner) {
            battle.context_mut().clear_dark_bonus(owner);
        }
        Ok(())
    }
}
