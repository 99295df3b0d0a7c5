//! Content factory for building combatants from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, CombatantSpec, DamageType, PassiveRegistry, StatKind};
use tracing::debug;

use crate::loaders::{CombatantLoader, ConfigLoader, LoadResult};
use crate::template::CombatantTemplate;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── combatants.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine tuning from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the raw combatant catalog from `combatants.ron`.
    pub fn load_combatants(&self) -> LoadResult<Vec<CombatantTemplate>> {
        let path = self.data_dir.join("combatants.ron");
        CombatantLoader::load(&path)
    }

    /// Load `combatants.ron` and build every entry.
    ///
    /// Returns `(template id, spec)` pairs in catalog order.
    pub fn load_roster(
        &self,
        registry: &PassiveRegistry,
    ) -> LoadResult<Vec<(String, CombatantSpec)>> {
        self.load_combatants()?
            .into_iter()
            .map(|template| {
                let spec = Self::build(&template, registry)?;
                Ok((template.id, spec))
            })
            .collect()
    }

    /// Resolves a template into a spawnable [`CombatantSpec`].
    ///
    /// Unknown damage types, stat keys and passive ids are errors.
    pub fn build(
        template: &CombatantTemplate,
        registry: &PassiveRegistry,
    ) -> LoadResult<CombatantSpec> {
        let damage_type = DamageType::parse(&template.damage_type)
            .map_err(|e| anyhow::anyhow!("Combatant '{}': {}", template.id, e))?;

        let mut spec = CombatantSpec::new(&template.name, template.side)
            .with_damage_type(damage_type)
            .with_level(template.level.max(1));

        for (key, &value) in &template.stats {
            let kind = StatKind::parse(key)
                .map_err(|e| anyhow::anyhow!("Combatant '{}': {}", template.id, e))?;
            if !value.is_finite() {
                anyhow::bail!("Combatant '{}': stat '{}' is not finite", template.id, key);
            }
            spec = spec.with_stat(kind, value);
        }

        for key in &template.passives {
            let passive = registry
                .resolve(key)
                .map_err(|e| anyhow::anyhow!("Combatant '{}': {}", template.id, e))?;
            spec = spec.with_passive(passive);
        }

        if let Some(hits) = template.ultimate_hits {
            spec = spec.with_ultimate_hits(hits);
        }
        if template.overheal {
            spec = spec.with_overheal();
        }

        debug!(
            target: "battle_content::factory",
            id = %template.id,
            damage_type = damage_type.id(),
            passives = template.passives.len(),
            "built combatant"
        );
        Ok(spec)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
