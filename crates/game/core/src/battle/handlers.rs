//! Bus adapters that bind element and passive hooks to their owner.

use std::sync::Arc;

use super::Battle;
use crate::combatant::CombatantId;
use crate::damage::DamageType;
use crate::error::HookError;
use crate::events::{BattleEvent, EventHandler, EventKind};
use crate::passives::Passive;

/// Routes events to the owner's element.
pub(super) struct ElementHandler {
    owner: CombatantId,
    kind: DamageType,
    name: String,
}

impl ElementHandler {
    pub(super) fn new(owner: CombatantId, kind: DamageType) -> Self {
        Self {
            owner,
            kind,
            name: format!("{}@{}", kind.id(), owner),
        }
    }
}

impl EventHandler for ElementHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, event: &BattleEvent, battle: &mut Battle) -> Result<(), HookError> {
        self.kind.hooks().on_event(self.owner, event, battle)
    }
}

/// Routes events to one passive of one combatant.
pub(super) struct PassiveHandler {
    owner: CombatantId,
    passive: Arc<dyn Passive>,
    name: String,
}

impl PassiveHandler {
    pub(super) fn new(owner: CombatantId, passive: Arc<dyn Passive>) -> Self {
        let name = format!("{}@{}", passive.id(), owner);
        Self { owner, passive, name }
    }
}

impl EventHandler for PassiveHandler {
    fn name(&self) -> &str {
        &self.name
    }

    /// Defeated owners only hear battle lifecycle events.
    fn handle(&self, event: &BattleEvent, battle: &mut Battle) -> Result<(), HookError> {
        let lifecycle = matches!(event.kind(), EventKind::BattleStart | EventKind::BattleEnd);
        if !lifecycle && !battle.is_alive(self.owner) {
            return Ok(());
        }
        self.passive.on_event(self.owner, event, battle)
    }
}
