//! Combatant catalog loader.

use std::collections::HashSet;
use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::template::CombatantTemplate;

/// Loader for combatant catalogs from RON files.
pub struct CombatantLoader;

impl CombatantLoader {
    /// Load a combatant catalog from a RON file.
    ///
    /// RON format: `Vec<CombatantTemplate>`. Ids must be unique.
    pub fn load(path: &Path) -> LoadResult<Vec<CombatantTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CombatantTemplate>> {
        let templates: Vec<CombatantTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combatant catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id.as_str()) {
                anyhow::bail!("Duplicate combatant id '{}'", template.id);
            }
        }

        Ok(templates)
    }
}
