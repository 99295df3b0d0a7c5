//! Deterministic combat rules shared by every battle front-end.
//!
//! `battle-core` defines the canonical combat model (stats and stat effects,
//! damage/healing over time, elemental damage types, passives) and exposes
//! synchronous APIs that the runtime and content tooling build on. All HP
//! changes and all event traffic flow through [`battle::Battle`]; supporting
//! crates depend on the types re-exported here.
pub mod battle;
pub mod combatant;
pub mod config;
pub mod damage;
pub mod effects;
pub mod error;
pub mod events;
pub mod passives;
pub mod rng;
pub mod stats;

pub use battle::{
    ATTACK_ACTION, ActionReport, Battle, BattleContext, BattlePhase, EffectTick, SPREAD_ACTION,
    WindRegistry, WindTurn,
};
pub use combatant::{Combatant, CombatantId, CombatantSpec, Side};
pub use config::BattleConfig;
pub use damage::{DamageType, DamageTypeHooks, DotProfile, ULTIMATE_ACTION, UltimateOutcome};
pub use effects::{DamageOverTime, EffectManager, HealingOverTime, TickPlan};
pub use error::{CombatError, ConfigError, ErrorSeverity, GameError, HookError};
pub use events::{BattleEvent, EventBus, EventHandler, EventKind, SubscriptionId};
pub use passives::{
    EmberTempo, FluxCycle, GuardiansAegis, Passive, PassiveFactory, PassiveRegistry, PassiveTier,
};
pub use rng::RollContext;
pub use stats::{ActiveEffects, BaseStats, StatEffect, StatKind};
