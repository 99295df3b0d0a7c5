use tracing::trace;

use super::over_time::{DamageOverTime, HealingOverTime};
use crate::combatant::CombatantId;

/// Per-combatant store of active DoTs and HoTs.
///
/// The manager only stores and advances instances. Applying a tick is the
/// battle's job, because ticks must go through the same damage and healing
/// paths as direct attacks.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectManager {
    owner: CombatantId,
    dots: Vec<DamageOverTime>,
    hots: Vec<HealingOverTime>,
}

/// Snapshot of the instances due this turn, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickPlan {
    pub dots: Vec<DamageOverTime>,
    pub hots: Vec<HealingOverTime>,
}

impl TickPlan {
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty() && self.hots.is_empty()
    }
}

impl EffectManager {
    pub fn new(owner: CombatantId) -> Self {
        Self {
            owner,
            dots: Vec::new(),
            hots: Vec::new(),
        }
    }

    pub fn owner(&self) -> CombatantId {
        self.owner
    }

    /// Adds a DoT, refreshing in place when its id is already active.
    ///
    /// Returns `true` if an existing instance was refreshed.
    pub fn add_dot(&mut self, dot: DamageOverTime) -> bool {
        trace!(target: "battle_core::effects", owner = %self.owner, id = %dot.id, turns = dot.turns, "add dot");
        match self.dots.iter_mut().find(|d| d.id == dot.id) {
            Some(existing) => {
                *existing = dot;
                true
            }
            None => {
                self.dots.push(dot);
                false
            }
        }
    }

    /// Adds a HoT, refreshing in place when its id is already active.
    pub fn add_hot(&mut self, hot: HealingOverTime) -> bool {
        trace!(target: "battle_core::effects", owner = %self.owner, id = %hot.id, turns = hot.turns, "add hot");
        match self.hots.iter_mut().find(|h| h.id == hot.id) {
            Some(existing) => {
                *existing = hot;
                true
            }
            None => {
                self.hots.push(hot);
                false
            }
        }
    }

    pub fn dots(&self) -> &[DamageOverTime] {
        &self.dots
    }

    pub fn hots(&self) -> &[HealingOverTime] {
        &self.hots
    }

    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    pub fn hot_count(&self) -> usize {
        self.hots.len()
    }

    pub fn remove_dot(&mut self, id: &str) -> Option<DamageOverTime> {
        let index = self.dots.iter().position(|d| d.id == id)?;
        Some(self.dots.remove(index))
    }

    pub fn remove_hot(&mut self, id: &str) -> Option<HealingOverTime> {
        let index = self.hots.iter().position(|h| h.id == id)?;
        Some(self.hots.remove(index))
    }

    /// Strips every DoT. Returns how many were removed.
    pub fn clear_dots(&mut self) -> usize {
        let count = self.dots.len();
        self.dots.clear();
        count
    }

    pub fn clear_hots(&mut self) -> usize {
        let count = self.hots.len();
        self.hots.clear();
        count
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty() && self.hots.is_empty()
    }

    /// Clones the instances that tick this turn. DoTs precede HoTs.
    pub fn plan_tick(&self) -> TickPlan {
        TickPlan {
            dots: self.dots.clone(),
            hots: self.hots.clone(),
        }
    }

    /// Advances every instance that ticked under `plan` and evicts the expired.
    ///
    /// Instances added while the plan was being applied did not tick and are
    /// left untouched. Returns the names of evicted instances.
    pub fn finish_tick(&mut self, plan: &TickPlan) -> Vec<String> {
        let mut expired = Vec::new();

        for ticked in &plan.dots {
            if let Some(dot) = self.dots.iter_mut().find(|d| d.id == ticked.id) {
                dot.turns -= 1;
            }
        }
        self.dots.retain(|d| {
            let keep = d.turns > 0;
            if !keep {
                expired.push(d.name.clone());
            }
            keep
        });

        for ticked in &plan.hots {
            if let Some(hot) = self.hots.iter_mut().find(|h| h.id == ticked.id) {
                hot.turns -= 1;
            }
        }
        self.hots.retain(|h| {
            let keep = h.turns > 0;
            if !keep {
                expired.push(h.name.clone());
            }
            keep
        });

        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageType;

    fn burn(id: &str, turns: i32) -> DamageOverTime {
        DamageOverTime::new(id, "Burn", 10.0, turns, DamageType::Fire)
    }

    #[test]
    fn same_id_refreshes() {
        let mut manager = EffectManager::new(CombatantId(0));
        assert!(!manager.add_dot(burn("fire_dot_1", 3)));
        assert!(manager.add_dot(burn("fire_dot_1", 5)));
        assert_eq!(manager.dot_count(), 1);
        assert_eq!(manager.dots()[0].turns, 5);
    }

    #[test]
    fn unique_ids_stack() {
        let mut manager = EffectManager::new(CombatantId(0));
        manager.add_dot(burn("a", 3));
        manager.add_dot(burn("b", 3));
        assert_eq!(manager.dot_count(), 2);
    }

    #[test]
    fn finish_tick_expires_after_final_turn() {
        let mut manager = EffectManager::new(CombatantId(0));
        manager.add_dot(burn("a", 1));
        manager.add_dot(burn("b", 2));
        manager.add_hot(HealingOverTime::new("h", "Regen", 5.0, 1));

        let plan = manager.plan_tick();
        assert_eq!(plan.dots.len(), 2);

        let expired = manager.finish_tick(&plan);
        assert_eq!(expired, vec!["Burn".to_string(), "Regen".to_string()]);
        assert_eq!(manager.dots().len(), 1);
        assert_eq!(manager.dots()[0].turns, 1);
        assert!(manager.hots().is_empty());
    }

    #[test]
    fn instances_added_mid_tick_do_not_advance() {
        let mut manager = EffectManager::new(CombatantId(0));
        manager.add_dot(burn("a", 2));
        let plan = manager.plan_tick();

        manager.add_dot(burn("late", 1));
        manager.finish_tick(&plan);

        let late = manager.dots().iter().find(|d| d.id == "late");
        assert_eq!(late.map(|d| d.turns), Some(1));
    }
}
