//! Stat system: base stats plus a folded stack of named modifiers.
//!
//! # Architecture
//!
//! ```text
//! [ BaseStats ]  +  [ ActiveEffects (ordered StatEffect list) ]
//!        ↓                         ↓
//!        └──── derived(stat) = base(stat) + Σ effect.modifier(stat)
//! ```
//!
//! ## Principles
//!
//! 1. **No cache**: derived values are folded on every read, so nothing can go stale
//! 2. **Unique names**: adding an effect whose name is already active replaces it
//! 3. **Turn-end sweep**: timed effects lose one turn per sweep and leave at zero

pub mod base;
pub mod effect;
pub mod kind;

pub use base::BaseStats;
pub use effect::{ActiveEffects, StatEffect};
pub use kind::StatKind;
