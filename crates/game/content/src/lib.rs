//! Data-driven battle content and loaders.
//!
//! This crate turns data files into inputs for `battle-core`:
//! - Combatant catalogs (data-driven via RON)
//! - Engine tuning (data-driven via TOML)
//!
//! Every identifier (damage type, stat key, passive id and tier) is resolved at
//! load time, so a bad catalog fails before any battle starts.

#[cfg(feature = "serde")]
pub mod template;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "serde")]
pub use template::CombatantTemplate;

#[cfg(feature = "loaders")]
pub use loaders::{CombatantLoader, ConfigLoader, ContentFactory, LoadResult};
