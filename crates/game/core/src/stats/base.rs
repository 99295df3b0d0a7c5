//! Base stat block.

use super::kind::StatKind;

/// Unmodified stats as loaded from content.
///
/// These are the persistent values; everything a combatant reports during
/// battle is this block plus its active effects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub max_hp: f64,
    pub atk: f64,
    pub defense: f64,
    pub crit_rate: f64,
    pub crit_damage: f64,
    pub mitigation: f64,
    pub effect_hit_rate: f64,
    pub effect_resistance: f64,
    pub spd: f64,
    pub regain: f64,
    pub dodge_odds: f64,
    pub vitality: f64,
    pub aggro: f64,
}

impl BaseStats {
    pub fn new() -> Self {
        Self {
            max_hp: 1000.0,
            atk: 100.0,
            defense: 50.0,
            crit_rate: 0.05,
            crit_damage: 2.0,
            mitigation: 1.0,
            effect_hit_rate: 1.0,
            effect_resistance: 0.0,
            spd: 10.0,
            regain: 1.0,
            dodge_odds: 0.0,
            vitality: 1.0,
            aggro: 1.0,
        }
    }

    pub fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::MaxHp => self.max_hp,
            StatKind::Atk => self.atk,
            StatKind::Defense => self.defense,
            StatKind::CritRate => self.crit_rate,
            StatKind::CritDamage => self.crit_damage,
            StatKind::Mitigation => self.mitigation,
            StatKind::EffectHitRate => self.effect_hit_rate,
            StatKind::EffectResistance => self.effect_resistance,
            StatKind::Spd => self.spd,
            StatKind::Regain => self.regain,
            StatKind::DodgeOdds => self.dodge_odds,
            StatKind::Vitality => self.vitality,
            StatKind::Aggro => self.aggro,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: f64) {
        let slot = match kind {
            StatKind::MaxHp => &mut self.max_hp,
            StatKind::Atk => &mut self.atk,
            StatKind::Defense => &mut self.defense,
            StatKind::CritRate => &mut self.crit_rate,
            StatKind::CritDamage => &mut self.crit_damage,
            StatKind::Mitigation => &mut self.mitigation,
            StatKind::EffectHitRate => &mut self.effect_hit_rate,
            StatKind::EffectResistance => &mut self.effect_resistance,
            StatKind::Spd => &mut self.spd,
            StatKind::Regain => &mut self.regain,
            StatKind::DodgeOdds => &mut self.dodge_odds,
            StatKind::Vitality => &mut self.vitality,
            StatKind::Aggro => &mut self.aggro,
        };
        *slot = value;
    }

    /// Builder form of [`BaseStats::set`].
    pub fn with(mut self, kind: StatKind, value: f64) -> Self {
        self.set(kind, value);
        self
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::new()
    }
}
