//! Reeling mini-game: the real-time tug-of-war between the player's bar and
//! a hooked fish.
//!
//! The engine performs no scheduling of its own. Hosts call
//! [`ReelingEncounter::tick`] once per rendered frame and stop as soon as a
//! terminal [`TickResult`] comes back.

pub mod ai;
pub mod logic;
pub mod types;

pub use ai::{retarget_chance, FishAi, PinnedTarget, WanderingFish};
pub use logic::*;
pub use types::*;
