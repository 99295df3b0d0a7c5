//! Damage and healing paths.
//!
//! Every HP change in a battle goes through one of the functions here, so
//! shields, defeat and the resulting events are handled in one place.

use tracing::{debug, trace};

use super::Battle;
use crate::combatant::CombatantId;
use crate::effects::{DamageOverTime, HealingOverTime};
use crate::events::BattleEvent;
use crate::rng::RollContext;

/// Floor applied to the mitigation and vitality divisors.
const MIN_DIVISOR: f64 = 0.01;

/// What one turn-start tick of DoTs and HoTs did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectTick {
    pub damage: u32,
    pub healing: u32,
    /// Names of instances that ran out this tick.
    pub expired: Vec<String>,
}

impl Battle {
    /// Applies `amount` raw damage to `target` and returns the HP and shield
    /// damage actually dealt (never more than the target had left).
    ///
    /// Pipeline: attacker element `on_damage` → `× K / (K + defense)` →
    /// `÷ mitigation` → `÷ vitality` → truncate (at least 1 for any positive
    /// amount) → shields → HP. Dead targets take nothing. DoT ticks take the
    /// same path with their source as attacker.
    pub fn apply_damage(
        &mut self,
        target: CombatantId,
        amount: f64,
        attacker: Option<CombatantId>,
        action: Option<&str>,
    ) -> u32 {
        if !self.is_alive(target) {
            return 0;
        }

        let mut amount = amount;
        if let Some(source) = attacker
            && let Some(element) = self.combatant(source).map(|c| c.damage_type())
        {
            match element.hooks().on_damage(amount, source, target, self) {
                Ok(scaled) if scaled.is_finite() => amount = scaled,
                Ok(_) => debug!(
                    target: "battle_core::damage",
                    element = element.id(),
                    "non-finite damage transform ignored"
                ),
                Err(err) => debug!(
                    target: "battle_core::damage",
                    element = element.id(),
                    error = %err,
                    "damage hook failed"
                ),
            }
        }

        let Some(victim) = self.combatant(target) else {
            return 0;
        };
        let scale = self.config.defense_scale;
        let mut value = amount * scale / (scale + victim.defense().max(0.0));
        value /= victim.mitigation().max(MIN_DIVISOR);
        value /= victim.vitality().max(MIN_DIVISOR);

        let mut dealt = if value.is_finite() && value > 0.0 { value as u32 } else { 0 };
        if dealt == 0 && amount > 0.0 {
            dealt = 1;
        }

        let Some(victim) = self.combatant_mut(target) else {
            return 0;
        };
        let absorbed = dealt.min(victim.shields);
        victim.shields -= absorbed;
        let to_hp = (dealt - absorbed).min(victim.hp);
        victim.hp -= to_hp;
        let dealt = absorbed + to_hp;
        victim.damage_taken += u64::from(dealt);
        let fell = victim.hp == 0 && !victim.defeated;
        if fell {
            victim.defeated = true;
        }

        if let Some(source) = attacker
            && let Some(c) = self.combatant_mut(source)
        {
            c.damage_dealt += u64::from(dealt);
        }

        trace!(target: "battle_core::damage", %target, dealt, absorbed, "damage applied");

        self.emit(BattleEvent::DamageTaken {
            target,
            attacker,
            amount: dealt,
        });
        if let Some(attacker) = attacker {
            self.emit(BattleEvent::HitLanded {
                attacker,
                target,
                amount: dealt,
                action: action.map(str::to_string),
            });
        }
        if fell {
            debug!(target: "battle_core::damage", %target, "combatant defeated");
            self.emit(BattleEvent::Defeated {
                target,
                killer: attacker,
            });
        }
        dealt
    }

    /// Self-inflicted cost that can never defeat: drains at most `hp - 1`,
    /// bypasses mitigation and shields, and emits no event.
    pub fn apply_cost_damage(&mut self, target: CombatantId, amount: f64) -> u32 {
        let Some(c) = self.combatant_mut(target) else {
            return 0;
        };
        if !c.is_alive() || !(amount > 0.0) {
            return 0;
        }
        let cost = (amount as u32).min(c.hp.saturating_sub(1));
        if cost == 0 {
            return 0;
        }
        c.hp -= cost;
        c.damage_taken += u64::from(cost);
        trace!(target: "battle_core::damage", %target, cost, "cost drained");
        cost
    }

    /// Heals `target` for `amount × vitality`, up to max HP, and returns the
    /// HP restored.
    ///
    /// With overheal enabled the excess becomes shields instead of being lost.
    pub fn apply_healing(
        &mut self,
        target: CombatantId,
        amount: f64,
        healer: Option<CombatantId>,
        source_type: Option<&str>,
        source_name: Option<&str>,
    ) -> u32 {
        let Some(c) = self.combatant_mut(target) else {
            return 0;
        };
        if !c.is_alive() || !(amount > 0.0) || !amount.is_finite() {
            return 0;
        }

        let amount = (amount * c.vitality().max(0.0)) as u32;
        let restored = amount.min(c.max_hp().saturating_sub(c.hp));
        c.hp += restored;
        if c.overheal_enabled() {
            c.add_shields(amount - restored);
        }

        self.emit(BattleEvent::HealReceived {
            target,
            healer,
            amount: restored,
            source_type: source_type.map(str::to_string),
            source_name: source_name.map(str::to_string),
        });
        restored
    }

    /// Restores `target` to exactly max HP, ignoring vitality. Returns the HP
    /// restored.
    pub fn restore_full(
        &mut self,
        target: CombatantId,
        healer: Option<CombatantId>,
        source_type: Option<&str>,
        source_name: Option<&str>,
    ) -> u32 {
        let Some(c) = self.combatant_mut(target) else {
            return 0;
        };
        if !c.is_alive() {
            return 0;
        }
        let restored = c.max_hp().saturating_sub(c.hp);
        if restored == 0 {
            return 0;
        }
        c.hp += restored;

        self.emit(BattleEvent::HealReceived {
            target,
            healer,
            amount: restored,
            source_type: source_type.map(str::to_string),
            source_name: source_name.map(str::to_string),
        });
        restored
    }

    /// Resolves one strike: dodge roll, crit roll, then [`Battle::apply_damage`].
    ///
    /// Rolls are only made when the relevant odds are positive, so zero-odds
    /// battles consume no randomness here.
    pub fn strike(&mut self, attacker: CombatantId, target: CombatantId, amount: f64, action: &str) -> u32 {
        if !self.is_alive(target) {
            return 0;
        }
        let Some((crit_rate, crit_damage)) = self
            .combatant(attacker)
            .map(|c| (c.crit_rate(), c.crit_damage()))
        else {
            return 0;
        };

        let dodge = self.combatant(target).map_or(0.0, |c| c.dodge_odds());
        if dodge > 0.0 && self.roll(target, RollContext::Dodge) < dodge {
            self.emit(BattleEvent::Dodged { attacker, target });
            return 0;
        }

        let critical = crit_rate > 0.0 && self.roll(attacker, RollContext::Critical) < crit_rate;
        let amount = if critical { amount * crit_damage } else { amount };

        let dealt = self.apply_damage(target, amount, Some(attacker), Some(action));
        if critical {
            self.emit(BattleEvent::CriticalHit {
                attacker,
                target,
                amount: dealt,
            });
        }
        dealt
    }

    /// Tries to afflict `target` with `source`'s elemental DoT for a hit of
    /// `damage`.
    ///
    /// Chance is the source's effect hit rate minus the target's effect
    /// resistance; at 1 or more it always lands, at 0 or less it never does.
    pub fn maybe_inflict_dot(
        &mut self,
        target: CombatantId,
        source: CombatantId,
        damage: f64,
        turns: Option<i32>,
    ) -> bool {
        if !self.is_alive(target) {
            return false;
        }
        let Some((element, hit_rate)) = self
            .combatant(source)
            .map(|c| (c.damage_type(), c.effect_hit_rate()))
        else {
            return false;
        };
        let resistance = self.combatant(target).map_or(0.0, |c| c.effect_resistance());

        let chance = hit_rate - resistance;
        if chance <= 0.0 {
            return false;
        }
        if chance < 1.0 && self.roll(source, RollContext::EffectHit) >= chance {
            return false;
        }

        let Some(mut dot) = element.hooks().create_dot(damage, source) else {
            return false;
        };
        if let Some(turns) = turns {
            dot.turns = turns;
        }
        self.add_dot(target, dot)
    }

    /// Attaches a DoT, refreshing any instance with the same id.
    ///
    /// Returns `false` when nothing was attached (defeated target, empty
    /// magnitude or duration).
    pub fn add_dot(&mut self, target: CombatantId, dot: DamageOverTime) -> bool {
        let Some(c) = self.combatant_mut(target) else {
            return false;
        };
        if !c.is_alive() || !(dot.damage > 0.0) || dot.turns <= 0 {
            return false;
        }
        trace!(target: "battle_core::effects", %target, dot = %dot.id, "dot attached");
        c.effect_manager_mut().add_dot(dot);
        true
    }

    pub fn add_hot(&mut self, target: CombatantId, hot: HealingOverTime) -> bool {
        let Some(c) = self.combatant_mut(target) else {
            return false;
        };
        if !c.is_alive() || !(hot.healing > 0.0) || hot.turns <= 0 {
            return false;
        }
        trace!(target: "battle_core::effects", %target, hot = %hot.id, "hot attached");
        c.effect_manager_mut().add_hot(hot);
        true
    }

    /// Applies every DoT, then every HoT, on `id`, then advances and evicts
    /// them. A DoT that defeats its target stops the tick.
    pub fn tick_effects(&mut self, id: CombatantId) -> EffectTick {
        let Some(plan) = self
            .combatant(id)
            .and_then(|c| c.effect_manager())
            .map(|m| m.plan_tick())
        else {
            return EffectTick::default();
        };
        if plan.is_empty() {
            return EffectTick::default();
        }

        let mut tick = EffectTick::default();
        for dot in &plan.dots {
            if !self.is_alive(id) {
                break;
            }
            tick.damage += self.apply_damage(id, dot.damage, dot.source, Some(dot.name.as_str()));
        }
        for hot in &plan.hots {
            if !self.is_alive(id) {
                break;
            }
            tick.healing += self.apply_healing(id, hot.healing, hot.source, Some("hot"), Some(hot.name.as_str()));
        }

        if let Some(c) = self.combatant_mut(id)
            && let Some(manager) = c.effect_manager.as_mut()
        {
            tick.expired = manager.finish_tick(&plan);
        }
        tick
    }
}
