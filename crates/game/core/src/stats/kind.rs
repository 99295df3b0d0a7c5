//! Stat keys.

use crate::error::ConfigError;

/// Every numeric stat a combatant carries.
///
/// String forms are snake_case (`max_hp`, `effect_hit_rate`) and are the keys
/// used by content files and by [`StatEffect`](super::StatEffect) modifiers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumString,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    MaxHp,
    Atk,
    Defense,
    CritRate,
    CritDamage,
    /// Percentage-style damage divisor (1.0 = no reduction).
    Mitigation,
    EffectHitRate,
    EffectResistance,
    Spd,
    Regain,
    DodgeOdds,
    Vitality,
    /// Targeting weight consumed by external target selection.
    Aggro,
}

impl StatKind {
    /// Parses a content stat key, failing fast on unknown keys.
    pub fn parse(key: &str) -> Result<Self, ConfigError> {
        key.parse()
            .map_err(|_| ConfigError::UnknownStat(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn keys_are_snake_case() {
        assert_eq!(StatKind::MaxHp.as_ref(), "max_hp");
        assert_eq!(StatKind::parse("effect_hit_rate"), Ok(StatKind::EffectHitRate));
    }

    #[test]
    fn every_kind_round_trips_through_its_key() {
        for kind in StatKind::iter() {
            assert_eq!(StatKind::parse(kind.as_ref()), Ok(kind));
        }
    }

    #[test]
    fn unknown_key_is_config_error() {
        assert_eq!(
            StatKind::parse("luck"),
            Err(ConfigError::UnknownStat("luck".into()))
        );
    }
}
