use crate::combatant::CombatantId;
use crate::damage::DamageType;

/// Recurring damage applied once per turn boundary.
///
/// `id` decides stacking: a new instance with an existing id refreshes it,
/// a unique id stacks alongside.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageOverTime {
    pub id: String,
    pub name: String,
    pub damage: f64,
    pub turns: i32,
    pub source: Option<CombatantId>,
    pub element: DamageType,
}

impl DamageOverTime {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        damage: f64,
        turns: i32,
        element: DamageType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            damage,
            turns,
            source: None,
            element,
        }
    }

    pub fn with_source(mut self, source: CombatantId) -> Self {
        self.source = Some(source);
        self
    }
}

/// Recurring healing applied once per turn boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct HealingOverTime {
    pub id: String,
    pub name: String,
    pub healing: f64,
    pub turns: i32,
    pub source: Option<CombatantId>,
}

impl HealingOverTime {
    pub fn new(id: impl Into<String>, name: impl Into<String>, healing: f64, turns: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            healing,
            turns,
            source: None,
        }
    }

    pub fn with_source(mut self, source: CombatantId) -> Self {
        self.source = Some(source);
        self
    }
}
