//! Event fan-out for battle observers.
//!
//! [`ObserverBus`] broadcasts to any number of tokio receivers grouped by
//! topic and never waits for them. [`AsyncEventBus`] awaits each subscriber
//! in turn, for consumers that must finish before the battle moves on.

mod async_bus;
mod bus;

pub use async_bus::{AsyncEventBus, AsyncSubscriber, AsyncSubscriptionId};
pub use bus::{ObserverBus, Topic};
