//! Reeling balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of encounters with a bot angler to analyze:
//! - Win rate per rod and input profile
//! - Time to land a fish
//! - How long the line spends under stress
//!
//! The simulator drives `ReelingEncounter` directly, so results match real
//! gameplay physics.

mod config;
mod report;
mod runner;

pub use config::{BotPolicy, SimConfig};
pub use report::{RunOutcome, RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
