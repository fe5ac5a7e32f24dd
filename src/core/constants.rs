// Time normalization
/// Physics constants are authored per nominal frame at this rate.
pub const NOMINAL_FRAME_RATE: f64 = 60.0;

// Track geometry (normalized 0-100 track)
pub const TRACK_MIN: f64 = 0.0;
pub const TRACK_MAX: f64 = 100.0;
/// Pixel height the rod bar lengths and tolerances are authored against.
pub const REFERENCE_TRACK_PIXELS: f64 = 400.0;

// Encounter start state
pub const START_BAR_POSITION: f64 = 0.0;
pub const START_FISH_POSITION: f64 = 30.0;
pub const START_PROGRESS: f64 = 25.0;

// Precision input (mouse / keyboard)
pub const PRECISION_GRAVITY: f64 = 0.15;
pub const PRECISION_LIFT: f64 = 0.35;
pub const PRECISION_DAMPING: f64 = 0.96;
pub const PRECISION_BOUNCE: f64 = 0.4;
pub const PRECISION_MAX_DT: f64 = 2.0;

// Touch input (lower sampling rate, ~30fps hosts)
pub const TOUCH_GRAVITY: f64 = 0.08;
pub const TOUCH_LIFT: f64 = 0.32;
pub const TOUCH_DAMPING: f64 = 0.97;
pub const TOUCH_BOUNCE: f64 = 0.2;
pub const TOUCH_MAX_DT: f64 = 3.0;

// Fish AI
pub const FISH_MIN_POSITION: f64 = 5.0;
pub const FISH_MAX_POSITION: f64 = 95.0;
pub const FISH_TARGET_MIN: f64 = 7.0;
pub const FISH_TARGET_MAX: f64 = 92.0;
/// Distance to target under which the fish is considered settled.
pub const FISH_SETTLE_DISTANCE: f64 = 2.0;
pub const FISH_RETARGET_BASE_CHANCE: f64 = 0.04;
pub const FISH_RETARGET_STEP_PER_DIFFICULTY: f64 = 0.005;
pub const FISH_RETARGET_MIN_CHANCE: f64 = 0.01;
pub const FISH_BASE_AGGRESSION: f64 = 0.1;
pub const FISH_WEIGHT_AGGRESSION_DIVISOR: f64 = 400.0;
pub const FISH_DAMPING: f64 = 0.92;

// Catch progress
pub const PROGRESS_GAIN_RATE: f64 = 0.6;
pub const PROGRESS_DRAIN_RATE: f64 = 0.8;
pub const PROGRESS_MIN: f64 = 0.0;
pub const PROGRESS_MAX: f64 = 100.0;
/// Stress time (dt units, ~3s at 60fps) at zero progress before the line snaps.
pub const STRESS_FAIL_THRESHOLD: f64 = 180.0;
pub const STRESS_RECOVERY_RATE: f64 = 0.5;

// Session timing
pub const CAST_POWER_STEP: f64 = 0.05;
pub const CAST_POWER_STEP_MS: u64 = 50;
pub const BITE_WAIT_MIN_MS: u64 = 2000;
pub const BITE_WAIT_JITTER_MS: u64 = 3000;
pub const BITE_WINDOW_MS: u64 = 2000;

// Angler inventory
pub const MAX_BACKPACK_SIZE: usize = 10;
pub const STARTER_ROD_ID: u32 = 0;

// Fish value
pub const VALUE_WEIGHT_FACTOR: f64 = 0.8;
pub const VALUE_LENGTH_FACTOR: f64 = 0.5;
pub const GIGANTIC_LENGTH_RATIO: f64 = 0.9;
pub const GIGANTIC_VALUE_BONUS: f64 = 1.2;

// Persistence
pub const SAVE_VERSION_MAGIC: u64 = 0x5A45_4E46_4953_4831; // "ZENFISH1"
