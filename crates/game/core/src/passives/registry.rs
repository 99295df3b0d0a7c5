use std::collections::HashMap;
use std::sync::Arc;

use super::{EmberTempo, FluxCycle, GuardiansAegis, Passive, PassiveTier};
use crate::error::ConfigError;

/// Builds a passive at the requested tier.
pub type PassiveFactory = fn(PassiveTier) -> Arc<dyn Passive>;

/// String id → passive constructor.
///
/// Content refers to passives as `"id"` or `"id:tier"`; the tier defaults to
/// [`PassiveTier::Normal`].
#[derive(Clone)]
pub struct PassiveRegistry {
    factories: HashMap<&'static str, PassiveFactory>,
}

impl PassiveRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry with every shipped passive.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(GuardiansAegis::ID, guardians_aegis);
        registry.register(FluxCycle::ID, flux_cycle);
        registry.register(EmberTempo::ID, ember_tempo);
        registry
    }

    /// Registers `factory` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: &'static str, factory: PassiveFactory) {
        self.factories.insert(id, factory);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.factories.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Resolves `"id"` or `"id:tier"`.
    pub fn resolve(&self, key: &str) -> Result<Arc<dyn Passive>, ConfigError> {
        let (id, tier) = match key.split_once(':') {
            Some((id, tier)) => (id, PassiveTier::parse(tier)?),
            None => (key, PassiveTier::Normal),
        };
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| ConfigError::UnknownPassive(id.to_string()))?;
        Ok(factory(tier))
    }
}

fn guardians_aegis(tier: PassiveTier) -> Arc<dyn Passive> {
    Arc::new(GuardiansAegis::new(tier))
}

fn flux_cycle(tier: PassiveTier) -> Arc<dyn Passive> {
    Arc::new(FluxCycle::new(tier))
}

fn ember_tempo(tier: PassiveTier) -> Arc<dyn Passive> {
    Arc::new(EmberTempo::new(tier))
}

impl Default for PassiveRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl std::fmt::Debug for PassiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassiveRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_id_with_optional_tier() {
        let registry = PassiveRegistry::with_builtin();

        let aegis = registry.resolve("guardians_aegis").expect("builtin");
        assert_eq!(aegis.id(), "guardians_aegis");
        assert_eq!(aegis.tier(), PassiveTier::Normal);

        let boss = registry.resolve("guardians_aegis:boss").expect("builtin");
        assert_eq!(boss.tier(), PassiveTier::Boss);
    }

    #[test]
    fn unknown_ids_fail_fast() {
        let registry = PassiveRegistry::with_builtin();
        assert_eq!(
            registry.resolve("vampirism").err(),
            Some(ConfigError::UnknownPassive("vampirism".into()))
        );
        assert_eq!(
            registry.resolve("flux_cycle:mythic").err(),
            Some(ConfigError::UnknownTier("mythic".into()))
        );
    }

    #[test]
    fn builtin_ids_are_listed() {
        assert_eq!(
            PassiveRegistry::default().ids(),
            vec!["ember_tempo", "flux_cycle", "guardians_aegis"]
        );
    }
}
