//! Fishing session data structures.
//!
//! A session walks one angler through cast, bite, hook and reel. All timing
//! comes from host-supplied monotonic timestamps.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::constants::STARTER_ROD_ID;
use crate::fishing::FishInstance;
use crate::reeling::TickResult;

/// Current phase of the fishing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Standing on the pier.
    Idle,
    /// Cast button held, power building.
    Casting,
    /// Line in the water, waiting for a bite (2-5s).
    Waiting,
    /// A fish is biting; hook within 2s or it escapes.
    Biting,
    /// Reeling mini-game in progress.
    Fighting,
    /// Fish landed, waiting to be stowed.
    Caught,
}

/// Persistent angler progress: wallet, rods and backpack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Angler {
    pub coins: u64,
    /// Always contains the starter rod.
    pub unlocked_rods: Vec<u32>,
    pub current_rod_id: u32,
    pub backpack: Vec<FishInstance>,
}

impl Default for Angler {
    fn default() -> Self {
        Self::new()
    }
}

impl Angler {
    pub fn new() -> Self {
        Self {
            coins: 0,
            unlocked_rods: vec![STARTER_ROD_ID],
            current_rod_id: STARTER_ROD_ID,
            backpack: Vec::new(),
        }
    }
}

/// Result of one session update.
#[derive(Debug, Clone, Default)]
pub struct SessionTickResult {
    /// Messages to display to the player.
    pub messages: Vec<String>,
    /// Reeling outcome, if an encounter was ticked.
    pub reeling: Option<TickResult>,
}

/// Timestamps the session is waiting on.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SessionClock {
    pub cast_started: Option<Instant>,
    pub bite_at: Option<Instant>,
    pub bite_deadline: Option<Instant>,
}

/// Actions refused by the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Backpack full! Sell some fish first.")]
    BackpackFull,
    /// Hook attempted after the bite window closed.
    #[error("The fish got away...")]
    BiteMissed,
    /// The action isn't available in the current phase.
    #[error("expected {expected:?} phase, currently {actual:?}")]
    WrongPhase {
        expected: SessionPhase,
        actual: SessionPhase,
    },
}

/// Outcome of a bulk sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopReceipt {
    pub coins: u64,
    /// Message to display to the player.
    pub message: String,
}

/// Shop and backpack refusals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("no rod with id {0}")]
    UnknownRod(u32),
    #[error("rod {0} is already unlocked")]
    AlreadyUnlocked(u32),
    #[error("need {needed} coins, have {available}")]
    InsufficientCoins { needed: u64, available: u64 },
    #[error("rod {0} is locked")]
    Locked(u32),
    #[error("no fish {0} in backpack")]
    FishNotFound(String),
}
