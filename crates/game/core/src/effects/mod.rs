//! Damage-over-time and healing-over-time instances.
//!
//! A combatant's [`EffectManager`] is created lazily on the first DoT or HoT it
//! receives. Ticks run through the battle's normal damage and healing paths;
//! see [`Battle::tick_effects`](crate::battle::Battle::tick_effects).

mod manager;
mod over_time;

pub use manager::{EffectManager, TickPlan};
pub use over_time::{DamageOverTime, HealingOverTime};
