//! Common error infrastructure for battle-core.
//!
//! Errors fall into the four classes the engine distinguishes:
//!
//! - **Configuration** ([`ConfigError`]): unknown ids or stat keys. Raised while
//!   building combatants, never during a battle.
//! - **Hook** ([`HookError`]): an elemental or passive hook could not apply its
//!   bonus. Callers log and ignore these; the surrounding action continues.
//! - **Invariant**: defeated targets, non-positive magnitudes. These are absorbed
//!   as no-ops and have no error type at all.
//! - **Fatal** ([`CombatError`]): the turn loop asked for something the battle
//!   cannot resolve. Surfaced to the caller.

use crate::combatant::CombatantId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Advisory failure, safe to ignore.
    ///
    /// Examples: a passive found no stack state, Dark found a malformed bonus.
    Advisory,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown damage type id, unknown stat key
    Validation,

    /// Fatal error - the turn loop cannot continue with this request.
    ///
    /// Examples: actor not found, no valid target for an action
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Advisory => "advisory",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the error may be dropped without affecting battle state.
    pub const fn is_ignorable(&self) -> bool {
        matches!(self, Self::Advisory)
    }
}

/// Common trait for all battle-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Content could not be turned into a combatant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown damage type '{0}'")]
    UnknownDamageType(String),

    #[error("unknown stat key '{0}'")]
    UnknownStat(String),

    #[error("unknown passive '{0}'")]
    UnknownPassive(String),

    #[error("unknown passive tier '{0}'")]
    UnknownTier(String),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDamageType(_) => "CONFIG_UNKNOWN_DAMAGE_TYPE",
            Self::UnknownStat(_) => "CONFIG_UNKNOWN_STAT",
            Self::UnknownPassive(_) => "CONFIG_UNKNOWN_PASSIVE",
            Self::UnknownTier(_) => "CONFIG_UNKNOWN_TIER",
        }
    }
}

/// A request from the turn loop that the battle cannot serve.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("combatant {0} not found")]
    CombatantNotFound(CombatantId),

    #[error("combatant {0} is defeated")]
    Defeated(CombatantId),

    #[error("battle is not active")]
    BattleNotActive,

    #[error("battle is already active")]
    AlreadyActive,

    #[error("no valid action for combatant {0}")]
    NoValidAction(CombatantId),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CombatantNotFound(_) => "COMBAT_NOT_FOUND",
            Self::Defeated(_) => "COMBAT_DEFEATED",
            Self::BattleNotActive => "COMBAT_NOT_ACTIVE",
            Self::AlreadyActive => "COMBAT_ALREADY_ACTIVE",
            Self::NoValidAction(_) => "COMBAT_NO_VALID_ACTION",
        }
    }
}

/// An advisory hook failed to apply its effect.
///
/// Hook callers treat every variant as "no bonus this call".
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HookError {
    #[error("combatant {0} not found")]
    MissingCombatant(CombatantId),

    #[error("malformed stored bonus {value} on combatant {owner}")]
    MalformedBonus { owner: CombatantId, value: f64 },

    #[error("hook produced a non-finite damage value")]
    NonFinite,

    #[error("no valid targets")]
    NoTargets,
}

impl GameError for HookError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Advisory
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCombatant(_) => "HOOK_MISSING_COMBATANT",
            Self::MalformedBonus { .. } => "HOOK_MALFORMED_BONUS",
            Self::NonFinite => "HOOK_NON_FINITE",
            Self::NoTargets => "HOOK_NO_TARGETS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_errors_are_ignorable() {
        let err = HookError::NoTargets;
        assert!(err.severity().is_ignorable());
        assert_eq!(err.error_code(), "HOOK_NO_TARGETS");
    }

    #[test]
    fn config_errors_name_the_offending_key() {
        let err = ConfigError::UnknownStat("luck".into());
        assert_eq!(err.to_string(), "unknown stat key 'luck'");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }
}
