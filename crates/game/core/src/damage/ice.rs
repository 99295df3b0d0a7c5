use super::{DamageType, DamageTypeHooks, DotProfile, ULTIMATE_ACTION, UltimateOutcome, strike_each};
use crate::battle::Battle;
use crate::combatant::CombatantId;

pub struct Ice;

impl DamageTypeHooks for Ice {
    fn kind(&self) -> DamageType {
        DamageType::Ice
    }

    fn dot_profile(&self) -> Option<DotProfile> {
        Some(DotProfile {
            name: "Frozen Wound",
            ratio: 0.25,
            turns: 3,
        })
    }

    /// Strikes every foe in order; hit `n` deals `atk × ramp^n`.
    ///
    /// The ramp lives only for this cast.
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
        let ramp = battle.config().ice_ramp;

        strike_each(battle, enemies, |battle, hit, enemy| {
            let damage = atk * ramp.powi(hit as i32);
            battle.strike(actor, enemy, damage, ULTIMATE_ACTION);
        })
    }
}
