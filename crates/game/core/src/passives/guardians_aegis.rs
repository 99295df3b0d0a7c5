use super::{Passive, PassiveTier};
use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::error::HookError;
use crate::events::EventKind;
use crate::stats::{StatEffect, StatKind};

const EFFECT_NAME: &str = "guardians_aegis_mitigation";

#[derive(Clone, Copy, Debug, PartialEq)]
struct Coefficients {
    /// Mitigation gained per stack.
    per_stack: f64,
    max_stacks: u32,
    /// Fraction of max HP healed at turn start; zero disables the heal.
    turn_heal: f64,
}

impl Coefficients {
    fn for_tier(tier: PassiveTier) -> Self {
        let (per_stack, max_stacks, turn_heal) = match tier {
            PassiveTier::Normal => (0.02, 10, 0.0),
            PassiveTier::Boss => (0.04, 20, 0.05),
            PassiveTier::Glitched => (0.04, 10, 0.0),
            PassiveTier::Prime => (0.06, 25, 0.08),
        };
        Self {
            per_stack,
            max_stacks,
            turn_heal,
        }
    }
}

/// Every hit taken adds a mitigation stack. Boss and prime tiers also heal a
/// slice of max HP at the start of each of the owner's turns.
#[derive(Debug)]
pub struct GuardiansAegis {
    tier: PassiveTier,
    coefficients: Coefficients,
}

impl GuardiansAegis {
    pub const ID: &'static str = "guardians_aegis";

    pub fn new(tier: PassiveTier) -> Self {
        Self {
            tier,
            coefficients: Coefficients::for_tier(tier),
        }
    }
}

impl Passive for GuardiansAegis {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn tier(&self) -> PassiveTier {
        self.tier
    }

    fn triggers(&self) -> &'static [EventKind] {
        &[EventKind::DamageTaken, EventKind::TurnStart]
    }

    fn on_damage_taken(
        &self,
        owner: CombatantId,
        _attacker: Option<CombatantId>,
        _amount: u32,
        battle: &mut Battle,
    ) -> Result<(), HookError> {
        let c = self.coefficients;
        let stacks = battle
            .context_mut()
            .add_passive_stack(Self::ID, owner, c.max_stacks);

        let combatant = battle
            .combatant_mut(owner)
            .ok_or(HookError::MissingCombatant(owner))?;
        combatant.add_effect(
            StatEffect::new(EFFECT_NAME, Self::ID)
                .with_modifier(StatKind::Mitigation, c.per_stack * f64::from(stacks)),
        );
        Ok(())
    }

    fn on_turn_start(&self, owner: CombatantId, battle: &mut Battle) -> Result<(), HookError> {
        let heal = self.coefficients.turn_heal;
        if heal <= 0.0 {
            return Ok(());
        }
        let max_hp = battle
            .combatant(owner)
            .ok_or(HookError::MissingCombatant(owner))?
            .max_hp();
        battle.apply_healing(
            owner,
            f64::from(max_hp) * heal,
            Some(owner),
            Some("passive"),
            Some(Self::ID),
        );
        Ok(())
    }
}
