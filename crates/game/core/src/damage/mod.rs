//! Elemental damage-type protocol.
//!
//! [`DamageType`] is the closed set of elements. Each element implements
//! [`DamageTypeHooks`], a strategy consulted at four points:
//!
//! ```text
//! on_damage   outgoing damage transform, before mitigation
//! on_action   once per normal action; `false` replaces the basic attack
//! create_dot  DoT factory; `None` means no DoT for this hit
//! ultimate    signature ability
//! ```
//!
//! Hooks are advisory. Any [`HookError`] they return is logged by the caller
//! and treated as "no elemental bonus", never as a reason to skip the attack.
//! Elements that keep per-battle bookkeeping store it in
//! [`BattleContext`](crate::battle::BattleContext), which the battle clears at
//! `battle_end`.

mod dark;
mod fire;
mod generic;
mod ice;
mod light;
mod lightning;
mod wind;

pub use dark::Dark;
pub use fire::Fire;
pub use generic::Generic;
pub use ice::Ice;
pub use light::{LIGHT_DEBUFF_EFFECT, Light};
pub use lightning::{LIGHTNING_SHOCK_SOURCE, Lightning};
pub use wind::{WIND_ULTIMATE_EFFECT, Wind};

use crate::battle::Battle;
use crate::combatant::CombatantId;
use crate::effects::DamageOverTime;
use crate::error::{ConfigError, HookError};
use crate::events::{BattleEvent, EventKind};

/// Action name attached to hits delivered by ultimates.
pub const ULTIMATE_ACTION: &str = "ultimate";

/// Element of a combatant's attacks.
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
pub enum DamageType {
    Fire,
    Ice,
    Wind,
    Lightning,
    Light,
    Dark,
    Generic,
}

impl DamageType {
    /// The six rotating elements (everything except Generic).
    pub const ELEMENTS: [DamageType; 6] = [
        DamageType::Fire,
        DamageType::Ice,
        DamageType::Wind,
        DamageType::Lightning,
        DamageType::Light,
        DamageType::Dark,
    ];

    /// Parses a content id, failing fast on unknown ids.
    pub fn parse(id: &str) -> Result<Self, ConfigError> {
        id.parse()
            .map_err(|_| ConfigError::UnknownDamageType(id.to_string()))
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Ice => "ice",
            Self::Wind => "wind",
            Self::Lightning => "lightning",
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Generic => "generic",
        }
    }

    /// The element this one is vulnerable to.
    pub fn weakness(&self) -> Option<DamageType> {
        match self {
            Self::Fire => Some(Self::Ice),
            Self::Ice => Some(Self::Fire),
            Self::Wind => Some(Self::Lightning),
            Self::Lightning => Some(Self::Wind),
            Self::Light => Some(Self::Dark),
            Self::Dark => Some(Self::Light),
            Self::Generic => None,
        }
    }

    /// Display colour as RGB.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Fire => (255, 0, 0),
            Self::Ice => (0, 255, 255),
            Self::Wind => (0, 255, 0),
            Self::Lightning => (255, 255, 0),
            Self::Light => (255, 255, 255),
            Self::Dark => (145, 0, 145),
            Self::Generic => (255, 255, 255),
        }
    }

    /// The strategy implementing this element's rules.
    pub fn hooks(&self) -> &'static dyn DamageTypeHooks {
        match self {
            Self::Fire => &Fire,
            Self::Ice => &Ice,
            Self::Wind => &Wind,
            Self::Lightning => &Lightning,
            Self::Light => &Light,
            Self::Dark => &Dark,
            Self::Generic => &Generic,
        }
    }
}

/// Name, magnitude ratio and length of an element's DoT.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotProfile {
    pub name: &'static str,
    pub ratio: f64,
    pub turns: i32,
}

/// Result of an ultimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UltimateOutcome {
    /// Every planned strike resolved.
    Completed,
    /// Every enemy fell before the sequence finished. Landed hits stand.
    Interrupted { hits_landed: u32 },
    /// Nothing happened (no targets, not charged, caster down).
    Failed,
}

impl UltimateOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Strategy interface every element implements.
pub trait DamageTypeHooks: Send + Sync {
    fn kind(&self) -> DamageType;

    /// Transforms an outgoing damage value before mitigation.
    fn on_damage(
        &self,
        damage: f64,
        _attacker: CombatantId,
        _target: CombatantId,
        _battle: &mut Battle,
    ) -> Result<f64, HookError> {
        Ok(damage)
    }

    /// Runs before the basic attack. Returning `false` replaces the attack.
    fn on_action(
        &self,
        _actor: CombatantId,
        _allies: &[CombatantId],
        _enemies: &[CombatantId],
        _battle: &mut Battle,
    ) -> Result<bool, HookError> {
        Ok(true)
    }

    /// Secondary `(target, attack ratio)` strikes following a basic attack.
    fn extra_strikes(
        &self,
        _actor: CombatantId,
        _primary: CombatantId,
        _battle: &Battle,
    ) -> Vec<(CombatantId, f64)> {
        Vec::new()
    }

    fn dot_profile(&self) -> Option<DotProfile> {
        None
    }

    /// Builds this element's DoT for a hit of `damage`.
    ///
    /// Ids are `"{element}_dot_{source}"`, so repeat applications from the same
    /// source refresh rather than stack.
    fn create_dot(&self, damage: f64, source: CombatantId) -> Option<DamageOverTime> {
        let profile = self.dot_profile()?;
        let magnitude = damage * profile.ratio;
        if !(magnitude > 0.0) || !magnitude.is_finite() {
            return None;
        }
        let element = self.kind();
        Some(
            DamageOverTime::new(
                format!("{}_dot_{}", element.id(), source.0),
                profile.name,
                magnitude,
                profile.turns,
                element,
            )
            .with_source(source),
        )
    }

    fn ultimate(
        &self,
        actor: CombatantId,
        allies: &[CombatantId],
        enemies: &[CombatantId],
        battle: &mut Battle,
    ) -> UltimateOutcome;

    /// Events this element listens to while its owner is in a battle.
    fn subscriptions(&self) -> &'static [EventKind] {
        &[]
    }

    fn on_event(
        &self,
        _owner: CombatantId,
        _event: &BattleEvent,
        _battle: &mut Battle,
    ) -> Result<(), HookError> {
        Ok(())
    }
}

/// Strikes each target once in order, skipping the defeated.
///
/// `strike` receives the index of the hit (0 for the first target actually
/// struck). Reports [`UltimateOutcome::Interrupted`] when every target is down
/// before the list is exhausted.
pub(crate) fn strike_each<F>(battle: &mut Battle, targets: &[CombatantId], mut strike: F) -> UltimateOutcome
where
    F: FnMut(&mut Battle, u32, CombatantId),
{
    let mut hits = 0;
    for &target in targets {
        if !battle.is_alive(target) {
            if !battle.any_alive(targets) {
                return interrupted(hits);
            }
            continue;
        }
        strike(battle, hits, target);
        hits += 1;
    }
    if hits == 0 {
        UltimateOutcome::Failed
    } else {
        UltimateOutcome::Completed
    }
}

/// How repeated strikes choose among living targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Targeting {
    /// Locks onto the first living target; the sequence ends when it falls.
    Focus,
    /// Hit `n` goes to living target `n % living`.
    RoundRobin,
}

/// Delivers `count` strikes, re-reading the living targets before each one.
pub(crate) fn repeat_strikes<F>(
    battle: &mut Battle,
    targets: &[CombatantId],
    count: u32,
    targeting: Targeting,
    mut strike: F,
) -> UltimateOutcome
where
    F: FnMut(&mut Battle, u32, CombatantId),
{
    let focus = battle.living(targets).first().copied();
    for n in 0..count {
        let target = match targeting {
            Targeting::Focus => match focus {
                Some(target) if battle.is_alive(target) => target,
                _ => return interrupted(n),
            },
            Targeting::RoundRobin => {
                let living = battle.living(targets);
                if living.is_empty() {
                    return interrupted(n);
                }
                living[n as usize % living.len()]
            }
        };
        strike(battle, n, target);
    }
    if count == 0 {
        UltimateOutcome::Failed
    } else {
        UltimateOutcome::Completed
    }
}

fn interrupted(hits_landed: u32) -> UltimateOutcome {
    if hits_landed == 0 {
        UltimateOutcome::Failed
    } else {
        UltimateOutcome::Interrupted { hits_landed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ids_parse_back() {
        for kind in DamageType::iter() {
            assert_eq!(DamageType::parse(kind.id()), Ok(kind));
            assert_eq!(kind.hooks().kind(), kind);
        }
    }

    #[test]
    fn unknown_id_fails_fast() {
        assert_eq!(
            DamageType::parse("water"),
            Err(ConfigError::UnknownDamageType("water".into()))
        );
    }

    #[test]
    fn weaknesses_pair_up() {
        for kind in DamageType::ELEMENTS {
            let weakness = kind.weakness().and_then(|w| w.weakness());
            assert_eq!(weakness, Some(kind));
        }
        assert_eq!(DamageType::Generic.weakness(), None);
    }

    #[test]
    fn create_dot_skips_non_positive_magnitude() {
        assert!(DamageType::Fire.hooks().create_dot(0.0, CombatantId(1)).is_none());
        assert!(DamageType::Fire.hooks().create_dot(-5.0, CombatantId(1)).is_none());
        assert!(DamageType::Generic.hooks().create_dot(100.0, CombatantId(1)).is_none());

        let dot = DamageType::Fire.hooks().create_dot(100.0, CombatantId(1));
        let dot = dot.expect("fire builds a dot");
        assert_eq!(dot.id, "fire_dot_1");
        assert_eq!(dot.damage, 50.0);
        assert_eq!(dot.source, Some(CombatantId(1)));
    }
}
