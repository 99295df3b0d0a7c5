//! Light: sustains the party. Normal actions seed party-wide regeneration and
//! may trade the attack for an emergency heal; the ultimate cleanses and
//! restores the whole party while exposing every foe.

use super::{DamageType, DamageTypeHooks, DotProfile, UltimateOutcome};
use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::effects::HealingOverTime;
use crate::error::HookError;
use crate::events::BattleEvent;
use crate::stats::{StatEffect, StatKind};

/// Name of the defense debuff applied by the ultimate.
pub const LIGHT_DEBUFF_EFFECT: &str = "light_ultimate_defense_down";

pub struct Light;

impl DamageTypeHooks for Light {
    fn kind(&self) -> DamageType {
        DamageType::Light
    }

    fn on_action(
        &self,
        actor: CombatantId,
        allies: &[CombatantId],
        _enemies: &[CombatantId],
        battle: &mut Battle,
    ) -> Result<bool, HookError> {
        let atk = battle
            .combatant(actor)
            .ok_or(HookError::MissingCombatant(actor))?
            .atk();
        let ratio = battle.config().light_hot_ratio;
        let turns = battle.config().light_hot_turns;
        let threshold = battle.config().light_critical_threshold;

        for &ally in allies {
            let hot = HealingOverTime::new(
                format!("light_hot_{}", ally.0),
                "Radiant Regeneration",
                atk * ratio,
                turns,
            )
            .with_source(actor);
            battle.add_hot(ally, hot);
        }

        let critical = battle
            .living(allies)
            .into_iter()
            .filter_map(|id| battle.combatant(id).map(|c| (id, c.hp_ratio())))
            .filter(|(_, ratio)| *ratio < threshold)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match critical {
            Some((ally, _)) => {
                battle.apply_healing(ally, atk, Some(actor), Some("heal"), Some("light_action"));
                Ok(false)
            }
            None => Ok(true),
        }
    }

    fn dot_profile(&self) -> Option<DotProfile> {
        Some(DotProfile {
            name: "Celestial Atrophy",
            ratio: 0.25,
            turns: 3,
        })
    }

    fn ultimate(
        &self,
        actor: CombatantId,
        allies: &[CombatantId],
        enemies: &[CombatantId],
        battle: &mut Battle,
    ) -> UltimateOutcome {
        if battle.combatant(actor).is_none() {
            return UltimateOutcome::Failed;
        }

        for ally in battle.living(allies) {
            let missing = match battle.combatant_mut(ally) {
                Some(c) => {
                    if let Some(manager) = c.effect_manager.as_mut() {
                        manager.clear_dots();
                    }
                    c.max_hp().saturating_sub(c.hp())
                }
                None => continue,
            };
            if missing > 0 {
                battle.restore_full(ally, Some(actor), Some("ultimate"), Some("light_ultimate"));
            }
        }

        let debuff = battle.config().light_defense_debuff;
        let turns = battle.config().light_debuff_turns;
        for foe in battle.living(enemies) {
            if let Some(c) = battle.combatant_mut(foe) {
                // Shred is taken from defense without the previous debuff.
                c.remove_effect_by_name(LIGHT_DEBUFF_EFFECT);
                let shred = c.defense() * debuff;
                c.add_effect(
                    StatEffect::new(LIGHT_DEBUFF_EFFECT, "light_ultimate")
                        .with_modifier(StatKind::Defense, -shred)
                        .with_duration(turns),
                );
            }
        }

        battle.emit(BattleEvent::LightUltimate { actor });
        UltimateOutcome::Completed
    }
}
