use tracing::debug;

use super::{Passive, PassiveTier};
use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::damage::DamageType;
use crate::error::HookError;
use crate::events::EventKind;
use crate::rng::RollContext;
use crate::stats::{StatEffect, StatKind};

/// Stacks are capped only to keep effect names bounded.
const MAX_STACKS: u32 = 1_000;

/// At each turn start the owner may rotate to a different element. A switch
/// clears every stack; a failed roll adds an attack stack instead.
#[derive(Debug)]
pub struct FluxCycle {
    tier: PassiveTier,
    switch_chance: f64,
    /// Base attack fraction granted per missed rotation.
    atk_per_stack: f64,
}

impl FluxCycle {
    pub const ID: &'static str = "flux_cycle";

    pub fn new(tier: PassiveTier) -> Self {
        let (switch_chance, atk_per_stack) = match tier {
            PassiveTier::Normal => (0.8, 0.2),
            PassiveTier::Boss => (0.8, 0.3),
            PassiveTier::Glitched => (0.8, 0.4),
            PassiveTier::Prime => (0.9, 0.5),
        };
        Self {
            tier,
            switch_chance,
            atk_per_stack,
        }
    }
}

impl Passive for FluxCycle {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn tier(&self) -> PassiveTier {
        self.tier
    }

    fn triggers(&self) -> &'static [EventKind] {
        &[EventKind::TurnStart]
    }

    fn on_turn_start(&self, owner: CombatantId, battle: &mut Battle) -> Result<(), HookError> {
        let (current, base_atk) = battle
            .combatant(owner)
            .map(|c| (c.damage_type(), c.base().atk))
            .ok_or(HookError::MissingCombatant(owner))?;

        if battle.roll(owner, RollContext::Passive) < self.switch_chance {
            let choices: Vec<DamageType> = DamageType::ELEMENTS
                .into_iter()
                .filter(|&kind| kind != current)
                .collect();
            let next = choices[battle.roll_index(owner, RollContext::Passive, choices.len())];

            battle
                .set_damage_type(owner, next)
                .map_err(|_| HookError::MissingCombatant(owner))?;
            battle.context_mut().clear_passive_stack(Self::ID, owner);
            if let Some(c) = battle.combatant_mut(owner) {
                c.remove_effect_by_source(Self::ID);
            }
            debug!(target: "battle_core::passives", %owner, from = current.id(), to = next.id(), "flux cycle rotated");
            return Ok(());
        }

        let n = battle
            .context_mut()
            .add_passive_stack(Self::ID, owner, MAX_STACKS);
        if let Some(c) = battle.combatant_mut(owner) {
            c.add_effect(
                StatEffect::new(format!("{}_stack_{n}", Self::ID), Self::ID)
                    .with_modifier(StatKind::Atk, base_atk * self.atk_per_stack),
            );
        }
        Ok(())
    }
}
