use crate::error::ConfigError;

/// Power level of a passive. Selects a coefficient table, never an algorithm.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PassiveTier {
    #[default]
    Normal,
    Boss,
    Glitched,
    Prime,
}

impl PassiveTier {
    pub fn parse(id: &str) -> Result<Self, ConfigError> {
        id.parse().map_err(|_| ConfigError::UnknownTier(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_parse_from_snake_case() {
        assert_eq!(PassiveTier::parse("glitched"), Ok(PassiveTier::Glitched));
        assert_eq!(PassiveTier::Prime.as_ref(), "prime");
        assert_eq!(
            PassiveTier::parse("legendary"),
            Err(ConfigError::UnknownTier("legendary".into()))
        );
    }
}
