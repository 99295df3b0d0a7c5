//! Combatant snapshot: base stats, live resources and owned effect state.
//!
//! A [`Combatant`] exclusively owns its active-effect list and its
//! [`EffectManager`]. Damage types and passives reach it only through the
//! accessor methods here or the damage/healing paths on
//! [`Battle`](crate::battle::Battle).

mod spec;

pub use spec::CombatantSpec;

use std::fmt;
use std::sync::Arc;

use crate::damage::DamageType;
use crate::effects::EffectManager;
use crate::passives::Passive;
use crate::stats::{ActiveEffects, BaseStats, StatEffect, StatKind};

/// Arena handle of a combatant inside one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which team a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Party,
    Foes,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Party => Side::Foes,
            Side::Foes => Side::Party,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Combatant {
    pub(crate) id: CombatantId,
    pub(crate) name: String,
    pub(crate) side: Side,
    pub(crate) base: BaseStats,
    pub(crate) hp: u32,
    pub(crate) shields: u32,
    pub(crate) overheal: bool,
    pub(crate) damage_type: DamageType,
    pub(crate) effect_manager: Option<EffectManager>,
    pub(crate) effects: ActiveEffects,
    pub(crate) passives: Vec<Arc<dyn Passive>>,
    pub(crate) ultimate_charge: u32,
    pub(crate) ultimate_hits: Option<u32>,
    pub(crate) level: u32,
    pub(crate) exp: u64,
    pub(crate) damage_dealt: u64,
    pub(crate) damage_taken: u64,
    pub(crate) defeated: bool,
}

impl Combatant {
    pub fn from_spec(id: CombatantId, spec: CombatantSpec) -> Self {
        let hp = spec.base.max_hp.max(1.0) as u32;
        Self {
            id,
            name: spec.name,
            side: spec.side,
            base: spec.base,
            hp,
            shields: 0,
            overheal: spec.overheal,
            damage_type: spec.damage_type,
            effect_manager: None,
            effects: ActiveEffects::new(),
            passives: spec.passives,
            ultimate_charge: 0,
            ultimate_hits: spec.ultimate_hits,
            level: spec.level.max(1),
            exp: 0,
            damage_dealt: 0,
            damage_taken: 0,
            defeated: false,
        }
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    // ========================================================================
    // Derived stats
    // ========================================================================

    /// Base value plus every active modifier for `kind`. Always folded fresh.
    pub fn stat(&self, kind: StatKind) -> f64 {
        self.base.get(kind) + self.effects.total(kind)
    }

    pub fn max_hp(&self) -> u32 {
        self.stat(StatKind::MaxHp).max(1.0) as u32
    }

    pub fn atk(&self) -> f64 {
        self.stat(StatKind::Atk)
    }

    pub fn defense(&self) -> f64 {
        self.stat(StatKind::Defense)
    }

    pub fn mitigation(&self) -> f64 {
        self.stat(StatKind::Mitigation)
    }

    pub fn vitality(&self) -> f64 {
        self.stat(StatKind::Vitality)
    }

    pub fn crit_rate(&self) -> f64 {
        self.stat(StatKind::CritRate)
    }

    pub fn crit_damage(&self) -> f64 {
        self.stat(StatKind::CritDamage)
    }

    pub fn effect_hit_rate(&self) -> f64 {
        self.stat(StatKind::EffectHitRate)
    }

    pub fn effect_resistance(&self) -> f64 {
        self.stat(StatKind::EffectResistance)
    }

    pub fn dodge_odds(&self) -> f64 {
        self.stat(StatKind::DodgeOdds)
    }

    pub fn spd(&self) -> f64 {
        self.stat(StatKind::Spd)
    }

    // ========================================================================
    // Resources
    // ========================================================================

    pub fn hp(&self) -> u32 {
        self.hp
    }

    /// Sets current HP, clamped to `[0, max_hp]`.
    ///
    /// Meant for setup and tests; combat changes go through the battle.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp());
    }

    pub fn shields(&self) -> u32 {
        self.shields
    }

    pub fn add_shields(&mut self, amount: u32) {
        self.shields = self.shields.saturating_add(amount);
    }

    /// Excess healing becomes shields from now on.
    pub fn enable_overheal(&mut self) {
        self.overheal = true;
    }

    pub fn overheal_enabled(&self) -> bool {
        self.overheal
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn hp_ratio(&self) -> f64 {
        f64::from(self.hp) / f64::from(self.max_hp())
    }

    pub fn missing_hp_ratio(&self) -> f64 {
        (1.0 - self.hp_ratio()).clamp(0.0, 1.0)
    }

    fn clamp_hp(&mut self) {
        let max = self.max_hp();
        if self.hp > max {
            self.hp = max;
        }
    }

    // ========================================================================
    // Stat effects
    // ========================================================================

    /// Inserts or replaces-by-name. Returns the replaced effect.
    pub fn add_effect(&mut self, effect: StatEffect) -> Option<StatEffect> {
        let replaced = self.effects.add(effect);
        self.clamp_hp();
        replaced
    }

    pub fn remove_effect_by_name(&mut self, name: &str) -> Option<StatEffect> {
        let removed = self.effects.remove_by_name(name);
        self.clamp_hp();
        removed
    }

    pub fn remove_effect_by_source(&mut self, source: &str) -> usize {
        let removed = self.effects.remove_by_source(source);
        self.clamp_hp();
        removed
    }

    pub fn active_effects(&self) -> &ActiveEffects {
        &self.effects
    }

    /// Turn-end sweep of timed stat effects.
    pub fn sweep_effects(&mut self) -> Vec<String> {
        let expired = self.effects.sweep();
        self.clamp_hp();
        expired
    }

    // ========================================================================
    // Elements and over-time effects
    // ========================================================================

    pub fn damage_type(&self) -> DamageType {
        self.damage_type
    }

    pub fn effect_manager(&self) -> Option<&EffectManager> {
        self.effect_manager.as_ref()
    }

    /// Returns the effect manager, creating it on first use.
    pub fn effect_manager_mut(&mut self) -> &mut EffectManager {
        let owner = self.id;
        self.effect_manager
            .get_or_insert_with(|| EffectManager::new(owner))
    }

    pub fn dot_count(&self) -> usize {
        self.effect_manager.as_ref().map_or(0, EffectManager::dot_count)
    }

    pub fn passives(&self) -> &[Arc<dyn Passive>] {
        &self.passives
    }

    // ========================================================================
    // Ultimate and progression
    // ========================================================================

    pub fn ultimate_charge(&self) -> u32 {
        self.ultimate_charge
    }

    pub fn ultimate_ready(&self, charge_max: u32) -> bool {
        self.ultimate_charge >= charge_max
    }

    pub fn add_ultimate_charge(&mut self, amount: u32, charge_max: u32) {
        self.ultimate_charge = self.ultimate_charge.saturating_add(amount).min(charge_max);
    }

    pub(crate) fn reset_ultimate_charge(&mut self) {
        self.ultimate_charge = 0;
    }

    /// Overrides the strike count of multi-hit ultimates that honour it.
    pub fn set_ultimate_hits(&mut self, hits: Option<u32>) {
        self.ultimate_hits = hits;
    }

    pub fn ultimate_hits(&self) -> Option<u32> {
        self.ultimate_hits
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> u64 {
        self.exp
    }

    pub fn damage_dealt(&self) -> u64 {
        self.damage_dealt
    }

    pub fn damage_taken(&self) -> u64 {
        self.damage_taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn knight() -> Combatant {
        Combatant::from_spec(CombatantId(0), CombatantSpec::new("Knight", Side::Party))
    }

    #[test]
    fn derived_stat_is_base_plus_modifiers() {
        let mut c = knight();
        c.add_effect(StatEffect::new("a", "t").with_modifier(StatKind::Atk, 25.0));
        c.add_effect(
            StatEffect::new("b", "t")
                .with_modifier(StatKind::Atk, -5.0)
                .with_modifier(StatKind::Defense, 10.0),
        );

        for kind in StatKind::iter() {
            let expected = c.base().get(kind)
                + c.active_effects().iter().map(|e| e.modifier(kind)).sum::<f64>();
            assert_eq!(c.stat(kind), expected);
        }
        assert_eq!(c.atk(), 120.0);
    }

    #[test]
    fn losing_max_hp_clamps_current_hp() {
        let mut c = knight();
        c.add_effect(StatEffect::new("frail", "t").with_modifier(StatKind::MaxHp, -400.0));
        assert_eq!(c.hp(), 600);
        c.remove_effect_by_name("frail");
        assert_eq!(c.max_hp(), 1000);
        assert_eq!(c.hp(), 600);
    }

    #[test]
    fn effect_manager_is_created_lazily() {
        let mut c = knight();
        assert!(c.effect_manager().is_none());
        assert_eq!(c.dot_count(), 0);
        assert_eq!(c.effect_manager_mut().owner(), CombatantId(0));
        assert!(c.effect_manager().is_some());
    }

    #[test]
    fn ultimate_charge_caps_at_max() {
        let mut c = knight();
        c.add_ultimate_charge(20, 15);
        assert!(c.ultimate_ready(15));
        assert_eq!(c.ultimate_charge(), 15);
    }

    #[test]
    fn missing_hp_ratio_tracks_hp() {
        let mut c = knight();
        c.set_hp(500);
        assert_eq!(c.missing_hp_ratio(), 0.5);
    }
}
