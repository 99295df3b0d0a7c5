//! Named stat modifiers and the per-combatant active list.

use std::collections::BTreeMap;

use super::kind::StatKind;

/// A named bundle of additive stat deltas.
///
/// `duration` counts remaining turn-end sweeps; [`StatEffect::PERMANENT`]
/// effects stay until removed by name or source.
///
/// Stacking bonuses that must not overwrite each other use distinct names,
/// conventionally `"{id}_stack_{n}"`. Reusing a name means "latest value wins".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatEffect {
    pub name: String,
    pub stat_modifiers: BTreeMap<StatKind, f64>,
    pub duration: i32,
    pub source: String,
}

impl StatEffect {
    pub const PERMANENT: i32 = -1;

    /// Creates a permanent effect with no modifiers.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stat_modifiers: BTreeMap::new(),
            duration: Self::PERMANENT,
            source: source.into(),
        }
    }

    /// Adds `delta` to the modifier for `stat` (builder pattern).
    pub fn with_modifier(mut self, stat: StatKind, delta: f64) -> Self {
        *self.stat_modifiers.entry(stat).or_insert(0.0) += delta;
        self
    }

    /// Sets the remaining turns (builder pattern).
    pub fn with_duration(mut self, turns: i32) -> Self {
        self.duration = turns;
        self
    }

    pub fn modifier(&self, stat: StatKind) -> f64 {
        self.stat_modifiers.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn is_permanent(&self) -> bool {
        self.duration == Self::PERMANENT
    }
}

/// Ordered list of active effects with unique names.
///
/// Order is insertion order; a replaced effect keeps its original slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveEffects {
    effects: Vec<StatEffect>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `effect`, replacing any active effect with the same name.
    ///
    /// Returns the replaced effect, if there was one.
    pub fn add(&mut self, effect: StatEffect) -> Option<StatEffect> {
        match self.effects.iter_mut().find(|e| e.name == effect.name) {
            Some(existing) => Some(std::mem::replace(existing, effect)),
            None => {
                self.effects.push(effect);
                None
            }
        }
    }

    /// Removes at most one effect by name.
    pub fn remove_by_name(&mut self, name: &str) -> Option<StatEffect> {
        let index = self.effects.iter().position(|e| e.name == name)?;
        Some(self.effects.remove(index))
    }

    /// Removes every effect whose source matches. Returns how many were removed.
    pub fn remove_by_source(&mut self, source: &str) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| e.source != source);
        before - self.effects.len()
    }

    /// Sum of every active modifier for `stat`, folded in list order.
    pub fn total(&self, stat: StatKind) -> f64 {
        self.effects.iter().map(|e| e.modifier(stat)).sum()
    }

    /// Turn-end sweep.
    ///
    /// Timed effects lose one turn; any effect left at zero is removed.
    /// Permanent effects are untouched. Returns the names that expired.
    pub fn sweep(&mut self) -> Vec<String> {
        for effect in self.effects.iter_mut() {
            if effect.duration > 0 {
                effect.duration -= 1;
            }
        }

        let mut expired = Vec::new();
        self.effects.retain(|e| {
            if e.duration == 0 {
                expired.push(e.name.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn get(&self, name: &str) -> Option<&StatEffect> {
        self.effects.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
