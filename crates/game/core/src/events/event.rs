use crate::combatant::CombatantId;

/// Event names used for subscription.
///
/// String forms match the names external collaborators listen for
/// (`turn_start`, `hit_landed`, `light_ultimate`, ...).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventKind {
    BattleStart,
    BattleEnd,
    TurnStart,
    TurnEnd,
    ActionTaken,
    HitLanded,
    DamageTaken,
    /// Per-hit damage report emitted by multi-hit ultimates.
    Damage,
    CriticalHit,
    Dodged,
    HealReceived,
    Defeated,
    UltimateUsed,
    UltimateCompleted,
    UltimateFailed,
    LevelUp,
    LightUltimate,
}

/// Something that happened in a battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    BattleStart,
    BattleEnd,
    TurnStart {
        actor: CombatantId,
    },
    TurnEnd {
        actor: CombatantId,
    },
    ActionTaken {
        actor: CombatantId,
    },
    HitLanded {
        attacker: CombatantId,
        target: CombatantId,
        amount: u32,
        action: Option<String>,
    },
    DamageTaken {
        target: CombatantId,
        attacker: Option<CombatantId>,
        amount: u32,
    },
    Damage {
        attacker: CombatantId,
        target: CombatantId,
        amount: u32,
    },
    CriticalHit {
        attacker: CombatantId,
        target: CombatantId,
        amount: u32,
    },
    Dodged {
        attacker: CombatantId,
        target: CombatantId,
    },
    HealReceived {
        target: CombatantId,
        healer: Option<CombatantId>,
        amount: u32,
        source_type: Option<String>,
        source_name: Option<String>,
    },
    Defeated {
        target: CombatantId,
        killer: Option<CombatantId>,
    },
    UltimateUsed {
        actor: CombatantId,
    },
    UltimateCompleted {
        actor: CombatantId,
    },
    UltimateFailed {
        actor: CombatantId,
    },
    LevelUp {
        actor: CombatantId,
        level: u32,
    },
    LightUltimate {
        actor: CombatantId,
    },
}

impl BattleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::BattleStart => EventKind::BattleStart,
            Self::BattleEnd => EventKind::BattleEnd,
            Self::TurnStart { .. } => EventKind::TurnStart,
            Self::TurnEnd { .. } => EventKind::TurnEnd,
            Self::ActionTaken { .. } => EventKind::ActionTaken,
            Self::HitLanded { .. } => EventKind::HitLanded,
            Self::DamageTaken { .. } => EventKind::DamageTaken,
            Self::Damage { .. } => EventKind::Damage,
            Self::CriticalHit { .. } => EventKind::CriticalHit,
            Self::Dodged { .. } => EventKind::Dodged,
            Self::HealReceived { .. } => EventKind::HealReceived,
            Self::Defeated { .. } => EventKind::Defeated,
            Self::UltimateUsed { .. } => EventKind::UltimateUsed,
            Self::UltimateCompleted { .. } => EventKind::UltimateCompleted,
            Self::UltimateFailed { .. } => EventKind::UltimateFailed,
            Self::LevelUp { .. } => EventKind::LevelUp,
            Self::LightUltimate { .. } => EventKind::LightUltimate,
        }
    }

    /// The combatant the event is primarily about.
    ///
    /// Actor for turn/action/ultimate events, attacker for hits, target for
    /// damage taken, healing and defeat. `None` for battle lifecycle events.
    pub fn subject(&self) -> Option<CombatantId> {
        match self {
            Self::BattleStart | Self::BattleEnd => None,
            Self::TurnStart { actor }
            | Self::TurnEnd { actor }
            | Self::ActionTaken { actor }
            | Self::UltimateUsed { actor }
            | Self::UltimateCompleted { actor }
            | Self::UltimateFailed { actor }
            | Self::LevelUp { actor, .. }
            | Self::LightUltimate { actor } => Some(*actor),
            Self::HitLanded { attacker, .. }
            | Self::Damage { attacker, .. }
            | Self::CriticalHit { attacker, .. }
            | Self::Dodged { attacker, .. } => Some(*attacker),
            Self::DamageTaken { target, .. }
            | Self::HealReceived { target, .. }
            | Self::Defeated { target, .. } => Some(*target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_snake_case() {
        assert_eq!(EventKind::TurnStart.as_ref(), "turn_start");
        assert_eq!(EventKind::LightUltimate.to_string(), "light_ultimate");
        assert_eq!("hit_landed".parse::<EventKind>(), Ok(EventKind::HitLanded));
    }

    #[test]
    fn subject_follows_event_role() {
        let hit = BattleEvent::HitLanded {
            attacker: CombatantId(1),
            target: CombatantId(2),
            amount: 5,
            action: None,
        };
        assert_eq!(hit.subject(), Some(CombatantId(1)));

        let taken = BattleEvent::DamageTaken {
            target: CombatantId(2),
            attacker: Some(CombatantId(1)),
            amount: 5,
        };
        assert_eq!(taken.subject(), Some(CombatantId(2)));
        assert_eq!(BattleEvent::BattleEnd.subject(), None);
    }
}
