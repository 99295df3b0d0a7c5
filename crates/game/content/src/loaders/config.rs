//! Engine tuning loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`BattleConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tuning from a TOML file. Keys left out keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("ice_ramp = 1.5\ngeneric_ultimate_hits = 8\n")
            .expect("valid toml");
        assert_eq!(config.ice_ramp, 1.5);
        assert_eq!(config.generic_ultimate_hits, 8);
        assert_eq!(config.wind_ultimate_hits, BattleConfig::default().wind_ultimate_hits);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ConfigLoader::parse("ice_ramp = \"fast\"").is_err());
    }
}
