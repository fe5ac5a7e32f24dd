//! Zen Fishing - reeling mini-game engine library
//!
//! This module exposes the reeling physics, fishing session flow, catalog
//! and persistence for hosts, tests and the balance simulator.

pub mod build_info;
pub mod core;
pub mod fishing;
pub mod reeling;
pub mod save_manager;
pub mod session;
pub mod simulator;

pub use reeling::{
    EncounterStatus, EquipmentProfile, FishProfile, InputProfile, ReelingEncounter,
    ReelingSnapshot, TickResult,
};
pub use session::{Angler, FishingSession, SessionPhase};
