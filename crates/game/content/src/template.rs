//! Serializable combatant definitions.

use std::collections::BTreeMap;

use battle_core::Side;
use serde::{Deserialize, Serialize};

/// One catalog entry, kept in its raw string form until
/// [`ContentFactory::build`](crate::loaders::ContentFactory::build) resolves it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatantTemplate {
    pub id: String,
    pub name: String,
    pub side: Side,
    /// Damage type id such as `"fire"`; omitted means `"generic"`.
    #[serde(default = "default_damage_type")]
    pub damage_type: String,
    /// Stat key to base value. Keys left out keep their defaults.
    #[serde(default)]
    pub stats: BTreeMap<String, f64>,
    /// Passive keys in `id[:tier]` form.
    #[serde(default)]
    pub passives: Vec<String>,
    #[serde(default)]
    pub ultimate_hits: Option<u32>,
    #[serde(default)]
    pub overheal: bool,
    #[serde(default = "default_level")]
    pub level: u32,
}

fn default_damage_type() -> String {
    "generic".to_string()
}

fn default_level() -> u32 {
    1
}

impl CombatantTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, side: Side) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            side,
            damage_type: default_damage_type(),
            stats: BTreeMap::new(),
            passives: Vec::new(),
            ultimate_hits: None,
            overheal: false,
            level: default_level(),
        }
    }
}
