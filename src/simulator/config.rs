//! Simulation configuration.

use crate::core::constants::STARTER_ROD_ID;
use crate::reeling::InputProfile;

/// How the bot player drives the press flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BotPolicy {
    /// Press while the bar, projected `lead` frames ahead on its current
    /// velocity, sits below the fish.
    Tracking { lead: f64 },
    /// Never presses.
    Idle,
    /// Holds the button for the whole encounter.
    HoldAlways,
}

impl Default for BotPolicy {
    fn default() -> Self {
        Self::Tracking { lead: 6.0 }
    }
}

impl BotPolicy {
    /// Whether the bot wants the button down given the current positions.
    pub fn wants_press(&self, bar_position: f64, bar_velocity: f64, fish_position: f64) -> bool {
        match *self {
            Self::Tracking { lead } => bar_position + bar_velocity * lead < fish_position,
            Self::Idle => false,
            Self::HoldAlways => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tracking { .. } => "tracking",
            Self::Idle => "idle",
            Self::HoldAlways => "hold",
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of encounters to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Rod used for every encounter
    pub rod_id: u32,

    pub input_profile: InputProfile,

    pub policy: BotPolicy,

    /// Fixed fish weight; None rolls a fish per run
    pub fish_weight: Option<f64>,

    /// Fish that never leaves its starting spot, as a difficulty floor
    pub calm_fish: bool,

    /// Normalized dt fed to every tick (1.0 = one frame at 60fps)
    pub dt: f64,

    /// Maximum ticks per encounter before timeout
    pub max_ticks_per_run: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            rod_id: STARTER_ROD_ID,
            input_profile: InputProfile::Precision,
            policy: BotPolicy::default(),
            fish_weight: None,
            calm_fish: false,
            dt: 1.0,
            max_ticks_per_run: 20_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config comparing rods against the same fish pool
    pub fn rod_balance_test(rod_id: u32) -> Self {
        Self {
            num_runs: 200,
            rod_id,
            ..Default::default()
        }
    }

    /// Heaviest fish in the catalog on the given input profile
    pub fn heavy_fish_test(input_profile: InputProfile) -> Self {
        Self {
            num_runs: 200,
            input_profile,
            fish_weight: Some(100.0),
            ..Default::default()
        }
    }
}
