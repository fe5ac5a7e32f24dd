//! Fish steering decisions.
//!
//! The engine asks the AI for a new target only while the fish has settled
//! near its current one, so struggling comes in bursts rather than as
//! smooth tracking.

use rand::Rng;

use crate::core::constants::{
    FISH_RETARGET_BASE_CHANCE, FISH_RETARGET_MIN_CHANCE, FISH_RETARGET_STEP_PER_DIFFICULTY,
    FISH_TARGET_MAX, FISH_TARGET_MIN,
};

/// Chooses where a settled fish bolts to next.
pub trait FishAi {
    /// Returns a new target in 7-92, or `None` to keep the current one.
    /// `chance` is the per-tick probability the fish should bolt.
    fn retarget(&mut self, chance: f64) -> Option<f64>;
}

/// Per-tick chance that a settled fish picks a new target.
///
/// Better rods (higher difficulty index) make fish bolt less often, down to
/// a 1% floor so the fish never goes fully static.
pub fn retarget_chance(difficulty_index: u32) -> f64 {
    (FISH_RETARGET_BASE_CHANCE - difficulty_index as f64 * FISH_RETARGET_STEP_PER_DIFFICULTY)
        .max(FISH_RETARGET_MIN_CHANCE)
}

/// Random struggling driven by an owned RNG. Seed the RNG for replays.
#[derive(Debug, Clone)]
pub struct WanderingFish<R: Rng> {
    rng: R,
}

impl<R: Rng> WanderingFish<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> FishAi for WanderingFish<R> {
    fn retarget(&mut self, chance: f64) -> Option<f64> {
        if self.rng.gen::<f64>() < chance {
            Some(self.rng.gen_range(FISH_TARGET_MIN..FISH_TARGET_MAX))
        } else {
            None
        }
    }
}

/// A fish that never changes course after its first target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinnedTarget {
    target: Option<f64>,
}

impl PinnedTarget {
    /// Keeps whatever target the encounter started with.
    pub fn new() -> Self {
        Self::default()
    }

    /// Swims to `target` on the first decision and stays there.
    pub fn at(target: f64) -> Self {
        Self {
            target: Some(target.clamp(FISH_TARGET_MIN, FISH_TARGET_MAX)),
        }
    }
}

impl FishAi for PinnedTarget {
    fn retarget(&mut self, _chance: f64) -> Option<f64> {
        self.target.take()
    }
}
