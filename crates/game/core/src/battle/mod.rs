//! Battle arena: combatants, the per-battle event bus and per-battle context.
//!
//! A [`Battle`] exclusively owns its combatants. Element and passive hooks
//! receive `&mut Battle` and reach everything else through it, so all damage,
//! healing and event traffic flows through the methods in this module:
//!
//! ```text
//! start ─► begin_turn ─► take_action | use_ultimate ─► end_turn ─► ... ─► end
//!            │ tick DoT/HoT         │ strike → apply_damage → emit
//! ```

mod context;
mod handlers;
mod resolve;
mod turns;

pub use context::{BattleContext, WindRegistry, WindTurn};
pub use resolve::EffectTick;
pub use turns::{ATTACK_ACTION, ActionReport, SPREAD_ACTION};

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::combatant::{Combatant, CombatantId, CombatantSpec, Side};
use crate::config::BattleConfig;
use crate::events::{BattleEvent, EventBus, SubscriptionId};
use crate::rng::{self, RollContext};

/// Lifecycle of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    Pending,
    Active,
    Ended,
}

pub struct Battle {
    combatants: Vec<Combatant>,
    context: BattleContext,
    bus: EventBus,
    config: BattleConfig,
    seed: u64,
    nonce: u64,
    phase: BattlePhase,
    /// Passive subscriptions made by `start`, released by `end`.
    owned_subscriptions: Vec<SubscriptionId>,
    /// Element subscriptions per combatant; replaced when the element changes.
    element_subscriptions: HashMap<CombatantId, Vec<SubscriptionId>>,
    event_log: Vec<BattleEvent>,
    emit_depth: u32,
}

impl Battle {
    pub fn new(config: BattleConfig, seed: u64) -> Self {
        Self {
            combatants: Vec::new(),
            context: BattleContext::new(),
            bus: EventBus::new(),
            config,
            seed,
            nonce: 0,
            phase: BattlePhase::Pending,
            owned_subscriptions: Vec::new(),
            element_subscriptions: HashMap::new(),
            event_log: Vec::new(),
            emit_depth: 0,
        }
    }

    /// Adds a combatant and returns its arena handle.
    pub fn spawn(&mut self, spec: CombatantSpec) -> CombatantId {
        let id = CombatantId(self.combatants.len() as u32);
        self.combatants.push(Combatant::from_spec(id, spec));
        id
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.0 as usize)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.0 as usize)
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn context(&self) -> &BattleContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut BattleContext {
        &mut self.context
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Direct access for external subscribers. Subscriptions made here are
    /// not released by [`Battle::end`].
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == BattlePhase::Active
    }

    /// Every event emitted so far, in emission order.
    pub fn events(&self) -> &[BattleEvent] {
        &self.event_log
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.combatant(id).is_some_and(Combatant::is_alive)
    }

    pub fn any_alive(&self, ids: &[CombatantId]) -> bool {
        ids.iter().any(|&id| self.is_alive(id))
    }

    /// The living subset of `ids`, order preserved.
    pub fn living(&self, ids: &[CombatantId]) -> Vec<CombatantId> {
        ids.iter().copied().filter(|&id| self.is_alive(id)).collect()
    }

    fn living_on(&self, side: Side) -> Vec<CombatantId> {
        self.combatants
            .iter()
            .filter(|c| c.side() == side && c.is_alive())
            .map(Combatant::id)
            .collect()
    }

    /// Living combatants on `id`'s side, `id` included.
    pub fn allies_of(&self, id: CombatantId) -> Vec<CombatantId> {
        self.combatant(id)
            .map(|c| self.living_on(c.side()))
            .unwrap_or_default()
    }

    pub fn enemies_of(&self, id: CombatantId) -> Vec<CombatantId> {
        self.combatant(id)
            .map(|c| self.living_on(c.side().opposite()))
            .unwrap_or_default()
    }

    /// The side still standing once the other has been wiped out.
    pub fn winner(&self) -> Option<Side> {
        let party = !self.living_on(Side::Party).is_empty();
        let foes = !self.living_on(Side::Foes).is_empty();
        match (party, foes) {
            (true, false) => Some(Side::Party),
            (false, true) => Some(Side::Foes),
            _ => None,
        }
    }

    /// Living combatants by descending speed; ties go to the lower id.
    pub fn turn_order(&self) -> Vec<CombatantId> {
        let mut order: Vec<_> = self
            .combatants
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| (c.id(), c.spd()))
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        order.into_iter().map(|(id, _)| id).collect()
    }

    // ========================================================================
    // Randomness
    // ========================================================================

    fn next_seed(&mut self, actor: CombatantId, context: RollContext) -> u64 {
        let seed = rng::compute_seed(self.seed, self.nonce, actor.0, context as u32);
        self.nonce = self.nonce.wrapping_add(1);
        seed
    }

    /// Uniform roll in `[0, 1)`.
    pub fn roll(&mut self, actor: CombatantId, context: RollContext) -> f64 {
        let seed = self.next_seed(actor, context);
        rng::unit_roll(seed)
    }

    pub fn roll_range(&mut self, actor: CombatantId, context: RollContext, min: f64, max: f64) -> f64 {
        let seed = self.next_seed(actor, context);
        rng::range_roll(seed, min, max)
    }

    pub fn roll_index(&mut self, actor: CombatantId, context: RollContext, len: usize) -> usize {
        let seed = self.next_seed(actor, context);
        rng::index_roll(seed, len)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Records `event` and delivers it to every current subscriber.
    ///
    /// Handlers are snapshotted before delivery, so subscriptions made or
    /// dropped by a handler take effect from the next event. Handler errors
    /// are logged and skipped. Emissions nested deeper than
    /// `max_event_depth` are dropped.
    pub fn emit(&mut self, event: BattleEvent) {
        if self.emit_depth >= self.config.max_event_depth {
            warn!(
                target: "battle_core::bus",
                event = event.kind().as_ref(),
                depth = self.emit_depth,
                "event dropped: emission depth exceeded"
            );
            return;
        }

        self.event_log.push(event.clone());
        let handlers = self.bus.handlers_for(event.kind());
        if handlers.is_empty() {
            return;
        }

        self.emit_depth += 1;
        for handler in handlers {
            if let Err(err) = handler.handle(&event, self) {
                debug!(
                    target: "battle_core::bus",
                    handler = handler.name(),
                    event = event.kind().as_ref(),
                    error = %err,
                    "event handler failed"
                );
            }
        }
        self.emit_depth -= 1;
    }
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("phase", &self.phase)
            .field("combatants", &self.combatants.len())
            .field("seed", &self.seed)
            .field("nonce", &self.nonce)
            .field("bus", &self.bus)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::error::HookError;
    use crate::events::{EventHandler, EventKind};
    use crate::stats::StatKind;

    fn arena() -> (Battle, CombatantId, CombatantId) {
        let mut battle = Battle::new(BattleConfig::default(), 7);
        let hero = battle.spawn(CombatantSpec::new("Hero", Side::Party).with_stat(StatKind::Spd, 20.0));
        let slime = battle.spawn(CombatantSpec::new("Slime", Side::Foes));
        (battle, hero, slime)
    }

    #[test]
    fn sides_and_turn_order() {
        let (mut battle, hero, slime) = arena();
        let ghost = battle.spawn(CombatantSpec::new("Ghost", Side::Foes));

        assert_eq!(battle.allies_of(hero), vec![hero]);
        assert_eq!(battle.enemies_of(hero), vec![slime, ghost]);
        assert_eq!(battle.turn_order(), vec![hero, slime, ghost]);
        assert_eq!(battle.winner(), None);

        for id in [slime, ghost] {
            if let Some(c) = battle.combatant_mut(id) {
                c.set_hp(0);
            }
        }
        assert_eq!(battle.winner(), Some(Side::Party));
    }

    #[test]
    fn rolls_replay_with_same_seed() {
        let (mut a, hero, _) = arena();
        let (mut b, _, _) = arena();
        let first: Vec<f64> = (0..4).map(|_| a.roll(hero, RollContext::Critical)).collect();
        let second: Vec<f64> = (0..4).map(|_| b.roll(hero, RollContext::Critical)).collect();
        assert_eq!(first, second);
        assert_ne!(first[0], first[1]);
    }

    struct Echo {
        calls: AtomicU32,
    }

    impl EventHandler for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn handle(&self, event: &BattleEvent, battle: &mut Battle) -> Result<(), HookError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            battle.emit(event.clone());
            Ok(())
        }
    }

    #[test]
    fn runaway_emission_is_bounded() {
        let (mut battle, hero, _) = arena();
        let echo = Arc::new(Echo {
            calls: AtomicU32::new(0),
        });
        battle.bus_mut().subscribe(EventKind::TurnStart, echo.clone());

        battle.emit(BattleEvent::TurnStart { actor: hero });

        let depth = battle.config().max_event_depth;
        assert_eq!(echo.calls.load(Ordering::SeqCst), depth);
        assert_eq!(battle.events().len(), depth as usize);
    }
}
