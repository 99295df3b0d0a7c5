use super::{Passive, PassiveTier};
use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::error::HookError;
use crate::events::EventKind;
use crate::stats::{StatEffect, StatKind};

/// Each hit landed during the owner's turn stacks an attack bonus
/// (a fraction of base attack per stack). Stacks drop at turn end.
#[derive(Debug)]
pub struct EmberTempo {
    tier: PassiveTier,
    per_stack: f64,
    max_stacks: u32,
}

impl EmberTempo {
    pub const ID: &'static str = "ember_tempo";

    pub fn new(tier: PassiveTier) -> Self {
        let (per_stack, max_stacks) = match tier {
            PassiveTier::Normal => (0.05, 5),
            PassiveTier::Boss => (0.08, 5),
            PassiveTier::Glitched => (0.10, 10),
            PassiveTier::Prime => (0.15, 10),
        };
        Self {
            tier,
            per_stack,
            max_stacks,
        }
    }
}

impl Passive for EmberTempo {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn tier(&self) -> PassiveTier {
        self.tier
    }

    fn triggers(&self) -> &'static [EventKind] {
        &[EventKind::HitLanded, EventKind::TurnEnd]
    }

    fn on_hit_landed(
        &self,
        owner: CombatantId,
        _target: CombatantId,
        _amount: u32,
        battle: &mut Battle,
    ) -> Result<(), HookError> {
        let stacks = battle
            .context_mut()
            .add_passive_stack(Self::ID, owner, self.max_stacks);

        let combatant = battle
            .combatant_mut(owner)
            .ok_or(HookError::MissingCombatant(owner))?;
        let bonus = combatant.base().atk * self.per_stack * f64::from(stacks);
        combatant.add_effect(StatEffect::new(Self::ID, Self::ID).with_modifier(StatKind::Atk, bonus));
        Ok(())
    }

    fn on_turn_end(&self, owner: CombatantId, battle: &mut Battle) -> Result<(), HookError> {
        battle.context_mut().clear_passive_stack(Self::ID, owner);
        if let Some(combatant) = battle.combatant_mut(owner) {
            combatant.remove_effect_by_name(Self::ID);
        }
        Ok(())
    }
}
