//! Fishing session: cast, bite, hook and reel, plus the angler's wallet,
//! rods and backpack.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
