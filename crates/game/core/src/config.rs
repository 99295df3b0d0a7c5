/// Battle configuration constants and tunable parameters.
///
/// Every elemental and pacing coefficient the engine reads lives here so that
/// balancing stays a data concern. Values load from TOML through
/// `battle-content`; missing keys fall back to [`BattleConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Defense scaling constant `K` in `damage × K / (K + defense)`.
    pub defense_scale: f64,
    /// Charge required before an ultimate may be used.
    pub ultimate_charge_max: u32,
    /// Maximum re-entrant event emission depth before events are dropped.
    pub max_event_depth: u32,

    // ===== Fire =====
    /// Fraction of max HP burned per drain stack at the caster's turn start.
    pub fire_drain_burn: f64,
    /// Extra multiplier applied to Fire damage once the caster holds a drain stack.
    pub fire_drain_multiplier: f64,

    // ===== Ice =====
    /// Per-target ramp of the Ice ultimate (1.3 = each target takes 30% more).
    pub ice_ramp: f64,

    // ===== Wind =====
    /// Default strike count of the Wind ultimate when the caster has no override.
    pub wind_ultimate_hits: u32,
    /// Effect hit rate granted for the duration of the Wind ultimate.
    pub wind_hit_rate_boost: f64,
    /// Fraction of attack dealt to each secondary target of a Wind normal attack.
    pub wind_spread_ratio: f64,

    // ===== Lightning =====
    /// Damage bonus per existing shock stack on a Lightning ultimate target.
    pub lightning_stack_bonus: f64,
    /// Effect resistance removed per shock stack.
    pub lightning_resist_shred: f64,
    /// Turns a shock stack lasts.
    pub lightning_shock_turns: i32,

    // ===== Light =====
    /// Fraction of the actor's attack distributed as HoT per tick.
    pub light_hot_ratio: f64,
    /// Turns the Light party HoT lasts.
    pub light_hot_turns: i32,
    /// HP ratio below which an ally is considered critically low.
    pub light_critical_threshold: f64,
    /// Defense fraction removed from every foe by the Light ultimate.
    pub light_defense_debuff: f64,
    /// Turns the Light ultimate debuff lasts.
    pub light_debuff_turns: i32,

    // ===== Dark =====
    /// Fraction of current HP drained from each ally before a Dark action.
    pub dark_drain_ratio: f64,
    /// Attack bonus per point of HP drained.
    pub dark_bonus_scale: f64,
    /// Lower bound of the uniform variance applied to the drain bonus.
    pub dark_variance_min: f64,
    /// Upper bound of the uniform variance applied to the drain bonus.
    pub dark_variance_max: f64,
    /// Attack multiplier per DoT stack carried by allies (Dark ultimate).
    pub dark_stack_multiplier: f64,
    /// Strikes delivered by the Dark ultimate.
    pub dark_ultimate_hits: u32,

    // ===== Generic =====
    /// Strikes delivered by the Generic ultimate.
    pub generic_ultimate_hits: u32,
}

impl BattleConfig {
    pub const DEFAULT_DEFENSE_SCALE: f64 = 100.0;
    pub const DEFAULT_ULTIMATE_CHARGE_MAX: u32 = 15;
    pub const DEFAULT_MAX_EVENT_DEPTH: u32 = 16;

    pub fn new() -> Self {
        Self {
            defense_scale: Self::DEFAULT_DEFENSE_SCALE,
            ultimate_charge_max: Self::DEFAULT_ULTIMATE_CHARGE_MAX,
            max_event_depth: Self::DEFAULT_MAX_EVENT_DEPTH,
            fire_drain_burn: 0.05,
            fire_drain_multiplier: 5.0_f64.sqrt(),
            ice_ramp: 1.3,
            wind_ultimate_hits: 8,
            wind_hit_rate_boost: 1.5,
            wind_spread_ratio: 0.25,
            lightning_stack_bonus: 0.1,
            lightning_resist_shred: 0.05,
            lightning_shock_turns: 3,
            light_hot_ratio: 0.05,
            light_hot_turns: 2,
            light_critical_threshold: 0.25,
            light_defense_debuff: 0.25,
            light_debuff_turns: 10,
            dark_drain_ratio: 0.10,
            dark_bonus_scale: 0.0001,
            dark_variance_min: 0.99,
            dark_variance_max: 1.01,
            dark_stack_multiplier: 1.75,
            dark_ultimate_hits: 6,
            generic_ultimate_hits: 64,
        }
    }

    /// Returns a copy with a different ultimate charge requirement.
    pub fn with_ultimate_charge_max(mut self, charge: u32) -> Self {
        self.ultimate_charge_max = charge;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
