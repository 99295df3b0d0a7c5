//! Wind: normal attacks spill onto every other foe registered for the turn;
//! the ultimate is a round-robin flurry whose strike count can be overridden.

use super::{
    DamageType, DamageTypeHooks, DotProfile, Targeting, ULTIMATE_ACTION, UltimateOutcome,
    repeat_strikes,
};
use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::error::HookError;
use crate::events::{BattleEvent, EventKind};
use crate::stats::{StatEffect, StatKind};

/// Name of the temporary hit-rate effect held during the ultimate.
pub const WIND_ULTIMATE_EFFECT: &str = "wind_ultimate_hit_rate";

pub struct Wind;

impl DamageTypeHooks for Wind {
    fn kind(&self) -> DamageType {
        DamageType::Wind
    }

    /// Registers this turn's players and foes for the spread helper.
    fn on_action(
        &self,
        actor: CombatantId,
        allies: &[CombatantId],
        enemies: &[CombatantId],
        battle: &mut Battle,
    ) -> Result<bool, HookError> {
        battle
            .context_mut()
            .wind_mut()
            .register(actor, allies.to_vec(), enemies.to_vec());
        Ok(true)
    }

    fn extra_strikes(
        &self,
        actor: CombatantId,
        primary: CombatantId,
        battle: &Battle,
    ) -> Vec<(CombatantId, f64)> {
        let Some(turn) = battle.context().wind().get(actor) else {
            return Vec::new();
        };
        let ratio = battle.config().wind_spread_ratio;
        turn.foes
            .iter()
            .copied()
            .filter(|&foe| foe != primary && battle.is_alive(foe))
            .map(|foe| (foe, ratio))
            .collect()
    }

    fn dot_profile(&self) -> Option<DotProfile> {
        Some(DotProfile {
            name: "Gale Erosion",
            ratio: 0.25,
            turns: 3,
        })
    }

    /// Splits the caster's attack over `ultimate_hits` strikes (falling back to
    /// the configured default), distributed round-robin across living foes.
    /// Effect hit rate is raised while the strikes resolve.
    fn ultimate(
        &self,
        actor: CombatantId,
        _allies: &[CombatantId],
        enemies: &[CombatantId],
        battle: &mut Battle,
    ) -> UltimateOutcome {
        let Some((atk, hits)) = battle.combatant(actor).map(|c| (c.atk(), c.ultimate_hits())) else {
            return UltimateOutcome::Failed;
        };
        let hits = hits.unwrap_or(battle.config().wind_ultimate_hits).max(1);
        let per_hit = atk / f64::from(hits);
        let boost = battle.config().wind_hit_rate_boost;

        if let Some(caster) = battle.combatant_mut(actor) {
            caster.add_effect(
                StatEffect::new(WIND_ULTIMATE_EFFECT, "wind_ultimate")
                    .with_modifier(StatKind::EffectHitRate, boost),
            );
        }

        let outcome = repeat_strikes(battle, enemies, hits, Targeting::RoundRobin, |battle, _, foe| {
            let dealt = battle.strike(actor, foe, per_hit, ULTIMATE_ACTION);
            battle.maybe_inflict_dot(foe, actor, f64::from(dealt), None);
        });

        if let Some(caster) = battle.combatant_mut(actor) {
            caster.remove_effect_by_name(WIND_ULTIMATE_EFFECT);
        }
        outcome
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        &[EventKind::TurnEnd]
    }

    /// The spread registry is turn-scoped.
    fn on_event(
        &self,
        owner: CombatantId,
        event: &BattleEvent,
        battle: &mut Battle,
    ) -> Result<(), HookError> {
        if let BattleEvent::TurnEnd { actor } = event
            && *actor == owner
        {
            battle.context_mut().wind_mut().release(owner);
        }
        Ok(())
    }
}
