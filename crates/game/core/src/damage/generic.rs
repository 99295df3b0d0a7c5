use super::{DamageType, DamageTypeHooks, Targeting, ULTIMATE_ACTION, UltimateOutcome, repeat_strikes};
use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::events::BattleEvent;

/// No elemental behavior and no DoT. The ultimate is a long flurry against a
/// single target, each strike counting as an action for passives.
pub struct Generic;

impl DamageTypeHooks for Generic {
    fn kind(&self) -> DamageType {
        DamageType::Generic
    }

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
        let hits = battle.config().generic_ultimate_hits.max(1);
        let per_hit = atk / f64::from(hits);

        repeat_strikes(battle, enemies, hits, Targeting::Focus, |battle, _, foe| {
            battle.strike(actor, foe, per_hit, ULTIMATE_ACTION);
            battle.emit(BattleEvent::ActionTaken { actor });
        })
    }
}
