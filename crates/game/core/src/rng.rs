//! Seeded per-call randomness.
//!
//! Battles never hold a live RNG. Each roll derives a fresh seed from the
//! battle seed, a roll counter, the rolling combatant and a context tag, then
//! draws once from a new [`StdRng`]. Replaying a battle with the same seed and
//! the same sequence of calls reproduces every roll.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Context tags that keep rolls made by the same actor in the same step apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Dodge = 0,
    Critical = 1,
    EffectHit = 2,
    DarkVariance = 3,
    Passive = 4,
}

/// Compute deterministic seed from battle state components.
///
/// Mixes the inputs with SplitMix64/FxHash style multipliers followed by a
/// final avalanche step so neighbouring nonces produce unrelated seeds.
pub fn compute_seed(battle_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = battle_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Draw a uniform value in `[0, 1)` from a one-shot generator.
pub fn unit_roll(seed: u64) -> f64 {
    StdRng::seed_from_u64(seed).r#gen::<f64>()
}

/// Draw a uniform value in `[min, max]` from a one-shot generator.
pub fn range_roll(seed: u64, min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    StdRng::seed_from_u64(seed).gen_range(min..=max)
}

/// Draw a uniform index in `[0, len)` from a one-shot generator.
pub fn index_roll(seed: u64, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    StdRng::seed_from_u64(seed).gen_range(0..len)
}
