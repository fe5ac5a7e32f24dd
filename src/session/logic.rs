//! Session flow and angler inventory logic.
//!
//! Handles the cast / bite / hook phases, hands the hooked fish to a
//! reeling encounter, and stores or sells what gets landed.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::types::{
    Angler, SessionClock, SessionError, SessionPhase, SessionTickResult, ShopError, ShopReceipt,
};
use crate::core::constants::{
    BITE_WAIT_JITTER_MS, BITE_WAIT_MIN_MS, BITE_WINDOW_MS, CAST_POWER_STEP, CAST_POWER_STEP_MS,
    MAX_BACKPACK_SIZE,
};
use crate::fishing::{calculate_fish, rod_by_id, FishInstance, Rod, RODS};
use crate::reeling::{InputProfile, ReelingEncounter, TickResult, WanderingFish};

/// Encounter type used by sessions: a wandering fish with a seeded RNG.
pub type SessionEncounter = ReelingEncounter<WanderingFish<ChaCha8Rng>>;

impl Angler {
    /// The equipped rod. Falls back to the starter rod if the saved id is
    /// no longer in the catalog.
    pub fn current_rod(&self) -> &'static Rod {
        rod_by_id(self.current_rod_id).unwrap_or(&RODS[0])
    }

    pub fn is_backpack_full(&self) -> bool {
        self.backpack.len() >= MAX_BACKPACK_SIZE
    }

    pub fn has_rod(&self, id: u32) -> bool {
        self.unlocked_rods.contains(&id)
    }

    /// Sells one fish from the backpack, returning the coins earned.
    pub fn sell_fish(&mut self, id: &str) -> Result<u64, ShopError> {
        let index = self
            .backpack
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| ShopError::FishNotFound(id.to_string()))?;
        let fish = self.backpack.remove(index);
        self.coins += fish.value;
        info!("Sold {} for {} coins", fish.name, fish.value);
        Ok(fish.value)
    }

    /// Sells everything in the backpack.
    pub fn sell_all(&mut self) -> ShopReceipt {
        let coins: u64 = self.backpack.iter().map(|f| f.value).sum();
        self.coins += coins;
        self.backpack.clear();
        let message = format!("Sold all fish for {} coins!", coins);
        info!("{}", message);
        ShopReceipt { coins, message }
    }

    /// Buys a rod and equips it, returning the message for the player.
    pub fn unlock_rod(&mut self, id: u32) -> Result<String, ShopError> {
        let rod = rod_by_id(id).ok_or(ShopError::UnknownRod(id))?;
        if self.has_rod(id) {
            return Err(ShopError::AlreadyUnlocked(id));
        }
        if self.coins < rod.price {
            return Err(ShopError::InsufficientCoins {
                needed: rod.price,
                available: self.coins,
            });
        }
        self.coins -= rod.price;
        self.unlocked_rods.push(id);
        self.current_rod_id = id;
        let message = format!("Unlocked {}!", rod.name);
        info!("{}", message);
        Ok(message)
    }

    /// Equips an already unlocked rod.
    pub fn select_rod(&mut self, id: u32) -> Result<(), ShopError> {
        if rod_by_id(id).is_none() {
            return Err(ShopError::UnknownRod(id));
        }
        if !self.has_rod(id) {
            return Err(ShopError::Locked(id));
        }
        self.current_rod_id = id;
        Ok(())
    }
}

/// Cast power after holding the cast button for `held`.
pub fn cast_power_for(held: Duration) -> f64 {
    let steps = held.as_millis() / CAST_POWER_STEP_MS as u128;
    (steps as f64 * CAST_POWER_STEP).min(1.0)
}

/// Rolls how long until a fish bites (2-5s).
pub fn roll_bite_delay(rng: &mut impl Rng) -> Duration {
    Duration::from_millis(BITE_WAIT_MIN_MS + rng.gen_range(0..BITE_WAIT_JITTER_MS))
}

/// One angler's fishing loop.
#[derive(Debug)]
pub struct FishingSession {
    pub angler: Angler,
    pub input_profile: InputProfile,
    phase: SessionPhase,
    clock: SessionClock,
    cast_power: f64,
    hooked: Option<FishInstance>,
    encounter: Option<SessionEncounter>,
    landed: Option<FishInstance>,
}

impl FishingSession {
    pub fn new(angler: Angler, input_profile: InputProfile) -> Self {
        Self {
            angler,
            input_profile,
            phase: SessionPhase::Idle,
            clock: SessionClock::default(),
            cast_power: 0.0,
            hooked: None,
            encounter: None,
            landed: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    fn expect_phase(&self, expected: SessionPhase) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn enter(&mut self, phase: SessionPhase) {
        debug!("session {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn reset_to_idle(&mut self) {
        self.clock = SessionClock::default();
        self.hooked = None;
        self.encounter = None;
        self.enter(SessionPhase::Idle);
    }

    /// Starts charging a cast.
    pub fn begin_cast(&mut self, now: Instant) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::Idle)?;
        if self.angler.is_backpack_full() {
            return Err(SessionError::BackpackFull);
        }
        self.cast_power = 0.0;
        self.clock.cast_started = Some(now);
        self.enter(SessionPhase::Casting);
        Ok(())
    }

    /// Current cast power (0.0-1.0). Frozen once the cast is released.
    pub fn cast_power(&self, now: Instant) -> f64 {
        match (self.phase, self.clock.cast_started) {
            (SessionPhase::Casting, Some(started)) => {
                cast_power_for(now.saturating_duration_since(started))
            }
            _ => self.cast_power,
        }
    }

    /// Releases the cast and schedules the bite.
    pub fn release_cast(&mut self, now: Instant, rng: &mut impl Rng) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::Casting)?;
        self.cast_power = self.cast_power(now);
        self.clock.cast_started = None;
        self.clock.bite_at = Some(now + roll_bite_delay(rng));
        self.enter(SessionPhase::Waiting);
        Ok(())
    }

    /// Advances timers and the active reeling encounter.
    pub fn update(&mut self, now: Instant) -> SessionTickResult {
        let mut result = SessionTickResult::default();

        if self.phase == SessionPhase::Waiting {
            if let Some(bite_at) = self.clock.bite_at {
                if now >= bite_at {
                    self.clock.bite_at = None;
                    self.clock.bite_deadline =
                        Some(bite_at + Duration::from_millis(BITE_WINDOW_MS));
                    self.enter(SessionPhase::Biting);
                    result.messages.push("Something's biting! Hook it!".to_string());
                }
            }
        }

        if self.phase == SessionPhase::Biting {
            if let Some(deadline) = self.clock.bite_deadline {
                if now >= deadline {
                    self.reset_to_idle();
                    result.messages.push("The fish got away...".to_string());
                }
            }
        }

        if self.phase == SessionPhase::Fighting {
            if let Some(outcome) = self.reel(now) {
                result.reeling = Some(outcome);
                if outcome == TickResult::Failed {
                    result.messages.push("The line snapped!".to_string());
                }
            }
        }

        result
    }

    /// Sets the hook on a biting fish and starts the reeling mini-game.
    ///
    /// A hook at or after the bite deadline fails with
    /// [`SessionError::BiteMissed`] and returns the session to `Idle`, even
    /// if `update` never ran in between.
    pub fn hook(
        &mut self,
        now: Instant,
        rng: &mut impl Rng,
    ) -> Result<&FishInstance, SessionError> {
        self.expect_phase(SessionPhase::Biting)?;
        if self.clock.bite_deadline.is_some_and(|deadline| now >= deadline) {
            self.reset_to_idle();
            return Err(SessionError::BiteMissed);
        }
        let rod = self.angler.current_rod();
        let fish = calculate_fish(self.cast_power, rod, rng);
        let ai = WanderingFish::new(ChaCha8Rng::seed_from_u64(rng.gen()));
        self.encounter = Some(ReelingEncounter::with_ai(
            rod.equipment_profile(),
            fish.profile(),
            self.input_profile,
            ai,
            now,
        ));
        self.clock.bite_deadline = None;
        self.enter(SessionPhase::Fighting);
        Ok(&*self.hooked.insert(fish))
    }

    /// Forwards the press flag to the active encounter.
    pub fn set_pressing(&self, pressed: bool) {
        if let Some(encounter) = &self.encounter {
            encounter.set_pressing(pressed);
        }
    }

    pub fn encounter(&self) -> Option<&SessionEncounter> {
        self.encounter.as_ref()
    }

    pub fn encounter_mut(&mut self) -> Option<&mut SessionEncounter> {
        self.encounter.as_mut()
    }

    pub fn hooked_fish(&self) -> Option<&FishInstance> {
        self.hooked.as_ref()
    }

    pub fn landed_fish(&self) -> Option<&FishInstance> {
        self.landed.as_ref()
    }

    /// Ticks the reeling encounter. Returns `None` when nothing is hooked.
    pub fn reel(&mut self, now: Instant) -> Option<TickResult> {
        let outcome = self.encounter.as_mut()?.tick(now);
        self.settle(outcome);
        Some(outcome)
    }

    /// Resolves a reeling outcome: landed fish move to `Caught`, snapped
    /// lines back to `Idle`. The encounter is dropped either way.
    fn settle(&mut self, outcome: TickResult) {
        match outcome {
            TickResult::Continuing(_) => {}
            TickResult::Succeeded => {
                self.encounter = None;
                self.landed = self.hooked.take();
                self.enter(SessionPhase::Caught);
            }
            TickResult::Failed => {
                info!("Line snapped");
                self.reset_to_idle();
            }
        }
    }

    /// Advances the encounter by an explicit dt, for hosts that pace
    /// frames themselves.
    pub fn reel_by(&mut self, dt: f64) -> Option<TickResult> {
        let outcome = self.encounter.as_mut()?.advance(dt);
        self.settle(outcome);
        Some(outcome)
    }

    /// Stows the landed fish in the backpack.
    pub fn keep_catch(&mut self) -> Result<String, SessionError> {
        self.expect_phase(SessionPhase::Caught)?;
        let message = match self.landed.take() {
            Some(fish) => {
                let message = format!("Caught a {}!", fish.name);
                info!("{} ({} coins)", message, fish.value);
                self.angler.backpack.push(fish);
                message
            }
            None => String::new(),
        };
        self.enter(SessionPhase::Idle);
        Ok(message)
    }
}
