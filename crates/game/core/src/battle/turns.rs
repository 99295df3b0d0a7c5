//! Battle lifecycle and per-turn actions.

use std::sync::Arc;

use tracing::{debug, info};

use super::handlers::{ElementHandler, PassiveHandler};
use super::{Battle, BattlePhase};
use crate::combatant::CombatantId;
use crate::damage::{DamageType, UltimateOutcome};
use crate::error::CombatError;
use crate::events::{BattleEvent, EventHandler};

/// Action name of the basic attack.
pub const ATTACK_ACTION: &str = "attack";
/// Action name of Wind's secondary strikes.
pub const SPREAD_ACTION: &str = "wind_spread";

/// Experience needed per level: reaching level `n + 1` costs `n × 100`.
const EXP_PER_LEVEL: u64 = 100;

/// What a normal action did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReport {
    pub actor: CombatantId,
    /// `false` when the element replaced the basic attack.
    pub proceeded: bool,
    /// Total damage dealt by the attack and any follow-up strikes.
    pub damage: u32,
}

impl Battle {
    /// Subscribes every element and passive hook and emits `battle_start`.
    pub fn start(&mut self) -> Result<(), CombatError> {
        if self.phase == BattlePhase::Active {
            return Err(CombatError::AlreadyActive);
        }
        self.phase = BattlePhase::Active;

        let ids: Vec<CombatantId> = self.combatants.iter().map(|c| c.id()).collect();
        for &id in &ids {
            self.subscribe_element(id);
        }
        for &id in &ids {
            let passives = self
                .combatant(id)
                .map(|c| c.passives().to_vec())
                .unwrap_or_default();
            for passive in passives {
                let handler: Arc<dyn EventHandler> = Arc::new(PassiveHandler::new(id, Arc::clone(&passive)));
                for &kind in passive.triggers() {
                    let sub = self.bus.subscribe(kind, Arc::clone(&handler));
                    self.owned_subscriptions.push(sub);
                }
            }
        }

        info!(
            target: "battle_core::battle",
            combatants = ids.len(),
            subscriptions = self.bus.len(),
            "battle started"
        );
        self.emit(BattleEvent::BattleStart);
        Ok(())
    }

    /// Emits `battle_end`, releases every subscription `start` made and
    /// clears all per-battle state.
    pub fn end(&mut self) -> Result<(), CombatError> {
        if self.phase != BattlePhase::Active {
            return Err(CombatError::BattleNotActive);
        }
        self.emit(BattleEvent::BattleEnd);

        for sub in std::mem::take(&mut self.owned_subscriptions) {
            self.bus.unsubscribe(sub);
        }
        for (_, subs) in std::mem::take(&mut self.element_subscriptions) {
            for sub in subs {
                self.bus.unsubscribe(sub);
            }
        }
        self.context.reset();
        for c in &mut self.combatants {
            c.effects.clear();
            c.effect_manager = None;
            c.shields = 0;
        }
        self.phase = BattlePhase::Ended;

        info!(target: "battle_core::battle", winner = ?self.winner(), "battle ended");
        Ok(())
    }

    fn subscribe_element(&mut self, id: CombatantId) {
        let Some(kind) = self.combatant(id).map(|c| c.damage_type()) else {
            return;
        };
        let kinds = kind.hooks().subscriptions();
        if kinds.is_empty() {
            return;
        }
        let handler: Arc<dyn EventHandler> = Arc::new(ElementHandler::new(id, kind));
        let subs = kinds
            .iter()
            .map(|&event| self.bus.subscribe(event, Arc::clone(&handler)))
            .collect();
        self.element_subscriptions.insert(id, subs);
    }

    fn unsubscribe_element(&mut self, id: CombatantId) {
        for sub in self.element_subscriptions.remove(&id).unwrap_or_default() {
            self.bus.unsubscribe(sub);
        }
    }

    /// Switches a combatant's element, moving its bus subscriptions along
    /// when the battle is running.
    pub fn set_damage_type(&mut self, id: CombatantId, kind: DamageType) -> Result<(), CombatError> {
        let c = self.combatant_mut(id).ok_or(CombatError::CombatantNotFound(id))?;
        if c.damage_type == kind {
            return Ok(());
        }
        c.damage_type = kind;
        debug!(target: "battle_core::battle", combatant = %id, element = kind.id(), "element changed");

        if self.is_active() {
            self.unsubscribe_element(id);
            self.subscribe_element(id);
        }
        Ok(())
    }

    fn ensure_ready(&self, actor: CombatantId) -> Result<(), CombatError> {
        if !self.is_active() {
            return Err(CombatError::BattleNotActive);
        }
        match self.combatant(actor) {
            None => Err(CombatError::CombatantNotFound(actor)),
            Some(c) if !c.is_alive() => Err(CombatError::Defeated(actor)),
            Some(_) => Ok(()),
        }
    }

    /// Emits `turn_start` and ticks the actor's DoTs and HoTs.
    pub fn begin_turn(&mut self, actor: CombatantId) -> Result<(), CombatError> {
        self.ensure_ready(actor)?;
        self.emit(BattleEvent::TurnStart { actor });
        let tick = self.tick_effects(actor);
        if tick != Default::default() {
            debug!(
                target: "battle_core::effects",
                combatant = %actor,
                damage = tick.damage,
                healing = tick.healing,
                expired = ?tick.expired,
                "over-time effects ticked"
            );
        }
        Ok(())
    }

    /// Sweeps timed stat effects and emits `turn_end`.
    ///
    /// Runs for defeated actors too, so a turn that started always ends.
    pub fn end_turn(&mut self, actor: CombatantId) -> Result<(), CombatError> {
        if !self.is_active() {
            return Err(CombatError::BattleNotActive);
        }
        let c = self.combatant_mut(actor).ok_or(CombatError::CombatantNotFound(actor))?;
        let expired = c.sweep_effects();
        if !expired.is_empty() {
            debug!(target: "battle_core::effects", combatant = %actor, ?expired, "stat effects expired");
        }
        self.emit(BattleEvent::TurnEnd { actor });
        Ok(())
    }

    /// Basic action: element `on_action`, then (unless replaced) an attack on
    /// `target` (or the first living enemy), a DoT attempt and any follow-up
    /// strikes. Grants one ultimate charge.
    pub fn take_action(
        &mut self,
        actor: CombatantId,
        target: Option<CombatantId>,
    ) -> Result<ActionReport, CombatError> {
        self.ensure_ready(actor)?;
        let allies = self.allies_of(actor);
        let enemies = self.enemies_of(actor);
        if enemies.is_empty() {
            return Err(CombatError::NoValidAction(actor));
        }
        let target = target
            .filter(|t| enemies.contains(t))
            .unwrap_or(enemies[0]);

        self.emit(BattleEvent::ActionTaken { actor });

        let element = self
            .combatant(actor)
            .map(|c| c.damage_type())
            .ok_or(CombatError::CombatantNotFound(actor))?;
        let proceeded = element
            .hooks()
            .on_action(actor, &allies, &enemies, self)
            .unwrap_or_else(|err| {
                debug!(target: "battle_core::damage", element = element.id(), error = %err, "action hook failed");
                true
            });

        let mut damage = 0;
        if proceeded && self.is_alive(actor) {
            let atk = self.combatant(actor).map_or(0.0, |c| c.atk());
            let dealt = self.strike(actor, target, atk, ATTACK_ACTION);
            damage += dealt;
            self.maybe_inflict_dot(target, actor, f64::from(dealt), None);

            let extra = element.hooks().extra_strikes(actor, target, self);
            for (foe, ratio) in extra {
                let atk = self.combatant(actor).map_or(0.0, |c| c.atk());
                damage += self.strike(actor, foe, atk * ratio, SPREAD_ACTION);
            }
        }

        let charge_max = self.config.ultimate_charge_max;
        if let Some(c) = self.combatant_mut(actor) {
            c.add_ultimate_charge(1, charge_max);
        }

        Ok(ActionReport {
            actor,
            proceeded,
            damage,
        })
    }

    /// Fires the actor's element ultimate.
    ///
    /// An uncharged or defeated actor fails without side effects beyond
    /// `ultimate_failed`. A successful or interrupted ultimate consumes the
    /// charge and emits `ultimate_completed`.
    pub fn use_ultimate(&mut self, actor: CombatantId) -> Result<UltimateOutcome, CombatError> {
        if !self.is_active() {
            return Err(CombatError::BattleNotActive);
        }
        let c = self.combatant(actor).ok_or(CombatError::CombatantNotFound(actor))?;
        if !c.is_alive() || !c.ultimate_ready(self.config.ultimate_charge_max) {
            self.emit(BattleEvent::UltimateFailed { actor });
            return Ok(UltimateOutcome::Failed);
        }
        let element = c.damage_type();

        self.emit(BattleEvent::UltimateUsed { actor });
        let allies = self.allies_of(actor);
        let enemies = self.enemies_of(actor);
        let outcome = element.hooks().ultimate(actor, &allies, &enemies, self);

        debug!(target: "battle_core::damage", combatant = %actor, element = element.id(), ?outcome, "ultimate resolved");
        if outcome.is_success() {
            if let Some(c) = self.combatant_mut(actor) {
                c.reset_ultimate_charge();
            }
            self.emit(BattleEvent::UltimateCompleted { actor });
        } else {
            self.emit(BattleEvent::UltimateFailed { actor });
        }
        Ok(outcome)
    }

    /// Adds experience, levelling up as many times as it covers. Returns the
    /// number of levels gained.
    pub fn gain_exp(&mut self, id: CombatantId, amount: u64) -> Result<u32, CombatError> {
        let c = self.combatant_mut(id).ok_or(CombatError::CombatantNotFound(id))?;
        c.exp += amount;

        let mut levels = Vec::new();
        c.level = c.level.max(1);
        while c.exp >= u64::from(c.level) * EXP_PER_LEVEL {
            c.exp -= u64::from(c.level) * EXP_PER_LEVEL;
            c.level += 1;
            levels.push(c.level);
        }

        let gained = levels.len() as u32;
        for level in levels {
            self.emit(BattleEvent::LevelUp { actor: id, level });
        }
        Ok(gained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantSpec, Side};
    use crate::config::BattleConfig;
    use crate::events::EventKind;
    use crate::stats::{StatEffect, StatKind};

    fn duel() -> (Battle, CombatantId, CombatantId) {
        let mut battle = Battle::new(BattleConfig::default().with_ultimate_charge_max(2), 11);
        let hero = battle.spawn(
            CombatantSpec::new("Hero", Side::Party)
                .with_stat(StatKind::CritRate, 0.0)
                .with_stat(StatKind::Defense, 0.0),
        );
        let foe = battle.spawn(
            CombatantSpec::new("Foe", Side::Foes)
                .with_stat(StatKind::CritRate, 0.0)
                .with_stat(StatKind::Defense, 0.0),
        );
        (battle, hero, foe)
    }

    fn kinds(battle: &Battle) -> Vec<EventKind> {
        battle.events().iter().map(BattleEvent::kind).collect()
    }

    #[test]
    fn actions_require_an_active_battle() {
        let (mut battle, hero, _) = duel();
        assert_eq!(battle.take_action(hero, None), Err(CombatError::BattleNotActive));
        battle.start().expect("start");
        assert_eq!(battle.start(), Err(CombatError::AlreadyActive));
    }

    #[test]
    fn basic_attack_charges_the_ultimate() {
        let (mut battle, hero, foe) = duel();
        battle.start().expect("start");

        let report = battle.take_action(hero, Some(foe)).expect("action");
        assert!(report.proceeded);
        assert_eq!(report.damage, 100);
        assert_eq!(battle.combatant(hero).map(|c| c.ultimate_charge()), Some(1));
        assert_eq!(
            kinds(&battle),
            vec![
                EventKind::BattleStart,
                EventKind::ActionTaken,
                EventKind::DamageTaken,
                EventKind::HitLanded,
            ]
        );
    }

    #[test]
    fn uncharged_ultimate_fails() {
        let (mut battle, hero, _) = duel();
        battle.start().expect("start");

        assert_eq!(battle.use_ultimate(hero), Ok(UltimateOutcome::Failed));
        assert_eq!(kinds(&battle).last(), Some(&EventKind::UltimateFailed));
    }

    #[test]
    fn charged_ultimate_resets_charge() {
        let (mut battle, hero, _) = duel();
        battle.start().expect("start");
        battle.take_action(hero, None).expect("action");
        battle.take_action(hero, None).expect("action");

        let outcome = battle.use_ultimate(hero).expect("ultimate");
        assert!(outcome.is_success());
        assert_eq!(battle.combatant(hero).map(|c| c.ultimate_charge()), Some(0));
        assert_eq!(kinds(&battle).last(), Some(&EventKind::UltimateCompleted));
    }

    #[test]
    fn end_turn_sweeps_timed_effects() {
        let (mut battle, hero, _) = duel();
        battle.start().expect("start");
        if let Some(c) = battle.combatant_mut(hero) {
            c.add_effect(StatEffect::new("rally", "test").with_modifier(StatKind::Atk, 10.0).with_duration(1));
        }

        battle.end_turn(hero).expect("end turn");
        assert!(battle.combatant(hero).is_some_and(|c| c.active_effects().is_empty()));
    }

    #[test]
    fn exp_levels_up_repeatedly() {
        let (mut battle, hero, _) = duel();
        assert_eq!(battle.gain_exp(hero, 350), Ok(2));
        let c = battle.combatant(hero).expect("spawned");
        assert_eq!(c.level(), 3);
        assert_eq!(c.exp(), 50);
    }

    #[test]
    fn end_releases_subscriptions_and_state() {
        let (mut battle, hero, foe) = duel();
        battle.set_damage_type(hero, DamageType::Fire).expect("hero exists");
        battle.start().expect("start");
        assert!(!battle.bus().is_empty());

        battle.context_mut().add_fire_drain_stack(hero);
        battle.take_action(hero, Some(foe)).expect("action");
        battle.end().expect("end");

        assert!(battle.bus().is_empty());
        assert!(battle.context().is_empty());
        assert_eq!(battle.combatant(foe).map(|c| c.dot_count()), Some(0));
        assert_eq!(battle.end(), Err(CombatError::BattleNotActive));
    }
}
