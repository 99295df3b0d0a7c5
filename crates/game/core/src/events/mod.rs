//! Per-battle publish/subscribe.
//!
//! The battle owns its [`EventBus`]. Damage types and passives subscribe when
//! the battle starts and are unsubscribed when it ends, so no listener outlives
//! the battle it was registered for.

mod bus;
mod event;

pub use bus::{EventBus, EventHandler, SubscriptionId};
pub use event::{BattleEvent, EventKind};
