use std::sync::Arc;

use super::Side;
use crate::damage::DamageType;
use crate::passives::Passive;
use crate::stats::{BaseStats, StatKind};

/// Everything needed to place a combatant into a battle.
///
/// Content loaders produce specs; [`Battle::spawn`](crate::battle::Battle::spawn)
/// turns them into live combatants.
#[derive(Clone, Debug)]
pub struct CombatantSpec {
    pub name: String,
    pub side: Side,
    pub base: BaseStats,
    pub damage_type: DamageType,
    pub passives: Vec<Arc<dyn Passive>>,
    pub ultimate_hits: Option<u32>,
    pub overheal: bool,
    pub level: u32,
}

impl CombatantSpec {
    pub fn new(name: impl Into<String>, side: Side) -> Self {
        Self {
            name: name.into(),
            side,
            base: BaseStats::new(),
            damage_type: DamageType::Generic,
            passives: Vec::new(),
            ultimate_hits: None,
            overheal: false,
            level: 1,
        }
    }

    pub fn with_base(mut self, base: BaseStats) -> Self {
        self.base = base;
        self
    }

    pub fn with_stat(mut self, kind: StatKind, value: f64) -> Self {
        self.base.set(kind, value);
        self
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    pub fn with_passive(mut self, passive: Arc<dyn Passive>) -> Self {
        self.passives.push(passive);
        self
    }

    pub fn with_ultimate_hits(mut self, hits: u32) -> Self {
        self.ultimate_hits = Some(hits);
        self
    }

    pub fn with_overheal(mut self) -> Self {
        self.overheal = true;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }
}
