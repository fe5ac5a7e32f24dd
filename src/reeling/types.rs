//! Reeling mini-game data structures.
//!
//! The player holds to lift a bar up a vertical track while a hooked fish
//! darts between targets. Keeping the fish inside the bar fills catch
//! progress; letting it escape drains it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    PRECISION_BOUNCE, PRECISION_DAMPING, PRECISION_GRAVITY, PRECISION_LIFT, PRECISION_MAX_DT,
    START_BAR_POSITION, START_FISH_POSITION, START_PROGRESS, TOUCH_BOUNCE, TOUCH_DAMPING,
    TOUCH_GRAVITY, TOUCH_LIFT, TOUCH_MAX_DT,
};

/// Rod parameters for one encounter. Lengths are in pixels of the
/// 400px reference track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquipmentProfile {
    pub bar_length: f64,
    pub tolerance: f64,
    /// Lower values make the fish change course more often.
    pub difficulty_index: u32,
}

/// Hooked fish parameters for one encounter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishProfile {
    /// Heavier fish accelerate harder toward their target.
    pub weight: f64,
}

/// Input device class chosen by the host when an encounter starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputProfile {
    /// Mouse or keyboard: snappier gravity and a harder bounce.
    #[default]
    Precision,
    /// Touch screens, usually sampled at a lower rate.
    Touch,
}

impl InputProfile {
    pub const ALL: [InputProfile; 2] = [InputProfile::Precision, InputProfile::Touch];

    pub fn physics(&self) -> PhysicsConstants {
        match self {
            Self::Precision => PhysicsConstants {
                gravity: PRECISION_GRAVITY,
                lift: PRECISION_LIFT,
                damping: PRECISION_DAMPING,
                bounce: PRECISION_BOUNCE,
                max_dt: PRECISION_MAX_DT,
            },
            Self::Touch => PhysicsConstants {
                gravity: TOUCH_GRAVITY,
                lift: TOUCH_LIFT,
                damping: TOUCH_DAMPING,
                bounce: TOUCH_BOUNCE,
                max_dt: TOUCH_MAX_DT,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Precision => "precision",
            Self::Touch => "touch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// Bar physics tuning for one input profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConstants {
    /// Velocity lost per nominal frame while released.
    pub gravity: f64,
    /// Velocity gained per nominal frame while pressed.
    pub lift: f64,
    /// Velocity multiplier applied every tick.
    pub damping: f64,
    /// Fraction of speed kept when the bar hits either end of the track.
    pub bounce: f64,
    /// Ceiling on the normalized delta time of a single tick.
    pub max_dt: f64,
}

/// Encounter lifecycle. Both terminal states are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterStatus {
    Running,
    Succeeded,
    Failed,
}

/// What the presentation layer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReelingSnapshot {
    pub bar_position: f64,
    pub fish_position: f64,
    pub progress: f64,
    pub is_stressed: bool,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickResult {
    Continuing(ReelingSnapshot),
    Succeeded,
    Failed,
}

impl TickResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TickResult::Continuing(_))
    }
}

/// Mutable simulation state, owned by exactly one encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterState {
    /// Player bar center on the 0-100 track (0 = bottom).
    pub bar_position: f64,
    pub bar_velocity: f64,
    /// Fish position, kept within 5-95.
    pub fish_position: f64,
    pub fish_velocity: f64,
    /// Point the fish is currently swimming toward.
    pub fish_target: f64,
    /// Catch progress, 0-100.
    pub progress: f64,
    pub is_pressing: bool,
    /// Time spent at zero progress, in dt units.
    pub stress_accumulator: f64,
    pub is_stressed: bool,
    pub last_tick: Instant,
}

impl EncounterState {
    pub fn new(now: Instant) -> Self {
        Self {
            bar_position: START_BAR_POSITION,
            bar_velocity: 0.0,
            fish_position: START_FISH_POSITION,
            fish_velocity: 0.0,
            fish_target: START_FISH_POSITION,
            progress: START_PROGRESS,
            is_pressing: false,
            stress_accumulator: 0.0,
            is_stressed: false,
            last_tick: now,
        }
    }

    pub fn snapshot(&self) -> ReelingSnapshot {
        ReelingSnapshot {
            bar_position: self.bar_position,
            fish_position: self.fish_position,
            progress: self.progress,
            is_stressed: self.is_stressed,
        }
    }
}

/// Shared press flag. Input handlers may write it from anywhere; the engine
/// reads it once at the start of each tick, so the last write before a tick
/// wins.
#[derive(Debug, Clone, Default)]
pub struct PressHandle {
    pressed: Arc<AtomicBool>,
}

impl PressHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pressed: bool) {
        self.pressed.store(pressed, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.pressed.load(Ordering::Relaxed)
    }
}
