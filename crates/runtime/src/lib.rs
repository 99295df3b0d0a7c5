//! Async orchestration around the synchronous battle engine.
//!
//! `battle-core` resolves every rule in place; this crate drives it and fans
//! its event log out to the rest of the application.
//!
//! Modules are organized by responsibility:
//! - [`events`] hosts the topic broadcast bus and the async subscriber bus
//! - [`runner`] is the paced reference turn driver
//! - [`logging`] installs the tracing subscriber
pub mod error;
pub mod events;
pub mod logging;
pub mod runner;

pub use error::{Result, RuntimeError};
pub use events::{AsyncEventBus, AsyncSubscriber, AsyncSubscriptionId, ObserverBus, Topic};
pub use logging::init_logging;
pub use runner::{BattleReport, BattleRunner, CombatantSummary, RunnerConfig};
