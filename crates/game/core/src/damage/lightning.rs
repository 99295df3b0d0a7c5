use super::{DamageType, DamageTypeHooks, DotProfile, ULTIMATE_ACTION, UltimateOutcome, strike_each};
use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::stats::{StatEffect, StatKind};

/// Source tag of the resistance-shred stacks left by the ultimate.
pub const LIGHTNING_SHOCK_SOURCE: &str = "lightning_ultimate";

pub struct Lightning;

impl DamageTypeHooks for Lightning {
    fn kind(&self) -> DamageType {
        DamageType::Lightning
    }

    fn dot_profile(&self) -> Option<DotProfile> {
        Some(DotProfile {
            name: "Charged Decay",
            ratio: 0.25,
            turns: 3,
        })
    }

    /// Chains through every living foe. Each strike gains `stack_bonus` per
    /// shock stack already on its target, then leaves one more stack
    /// (a timed effect-resistance shred).
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
        let bonus = battle.config().lightning_stack_bonus;
        let shred = battle.config().lightning_resist_shred;
        let turns = battle.config().lightning_shock_turns;

        strike_each(battle, enemies, |battle, _, foe| {
            let stacks = shock_stacks(battle, foe);
            let damage = atk * (1.0 + bonus * stacks as f64);
            battle.strike(actor, foe, damage, ULTIMATE_ACTION);

            let n = battle.context_mut().next_lightning_shock(foe);
            if let Some(target) = battle.combatant_mut(foe) {
                target.add_effect(
                    StatEffect::new(format!("lightning_shock_{}_stack_{n}", foe.0), LIGHTNING_SHOCK_SOURCE)
                        .with_modifier(StatKind::EffectResistance, -shred)
                        .with_duration(turns),
                );
            }
        })
    }
}

/// Active shock stacks on `target`.
fn shock_stacks(battle: &Battle, target: CombatantId) -> usize {
    battle.combatant(target).map_or(0, |c| {
        c.active_effects()
            .iter()
            .filter(|e| e.source == LIGHTNING_SHOCK_SOURCE)
            .count()
    })
}
