//! Game logic for the reeling mini-game.
//!
//! Every step is expressed in normalized delta time: 1.0 dt is one frame at
//! 60fps, so hosts ticking at any rate see the same motion.

use std::time::Instant;

use log::debug;
use rand::rngs::ThreadRng;

use super::ai::{retarget_chance, FishAi, WanderingFish};
use super::types::{
    EncounterState, EncounterStatus, EquipmentProfile, FishProfile, InputProfile,
    PhysicsConstants, PressHandle, ReelingSnapshot, TickResult,
};
use crate::core::constants::{
    FISH_BASE_AGGRESSION, FISH_DAMPING, FISH_MAX_POSITION, FISH_MIN_POSITION,
    FISH_SETTLE_DISTANCE, FISH_WEIGHT_AGGRESSION_DIVISOR, NOMINAL_FRAME_RATE, PROGRESS_DRAIN_RATE,
    PROGRESS_GAIN_RATE, PROGRESS_MAX, PROGRESS_MIN, REFERENCE_TRACK_PIXELS, STRESS_FAIL_THRESHOLD,
    STRESS_RECOVERY_RATE, TRACK_MAX, TRACK_MIN,
};

/// Converts a raw delta time into a usable one: non-finite or negative
/// values become 0, and long gaps are capped at `max_dt`.
pub fn clamp_dt(raw: f64, max_dt: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    raw.min(max_dt)
}

/// Normalized dt between two monotonic timestamps. A `now` earlier than
/// `last` counts as no elapsed time.
pub fn elapsed_dt(last: Instant, now: Instant) -> f64 {
    now.saturating_duration_since(last).as_secs_f64() * NOMINAL_FRAME_RATE
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Clamps a bar that left the track and reflects its velocity back toward
/// the interior, scaled by `bounce`.
pub fn resolve_bar_bounds(position: f64, velocity: f64, bounce: f64) -> (f64, f64) {
    if position <= TRACK_MIN {
        (TRACK_MIN, velocity.abs() * bounce)
    } else if position >= TRACK_MAX {
        (TRACK_MAX, -velocity.abs() * bounce)
    } else {
        (position, velocity)
    }
}

/// Integrates the player bar for one tick.
pub fn step_bar(state: &mut EncounterState, physics: &PhysicsConstants, dt: f64) {
    if state.is_pressing {
        state.bar_velocity += physics.lift * dt;
    } else {
        state.bar_velocity -= physics.gravity * dt;
    }
    state.bar_velocity = finite_or_zero(state.bar_velocity * physics.damping);

    let next = state.bar_position + state.bar_velocity * dt;
    let next = if next.is_finite() { next } else { TRACK_MIN };
    let (position, velocity) = resolve_bar_bounds(next, state.bar_velocity, physics.bounce);
    state.bar_position = position;
    state.bar_velocity = velocity;
}

/// Velocity a fish of the given weight adds per nominal frame.
pub fn fish_aggression(weight: f64) -> f64 {
    FISH_BASE_AGGRESSION + weight / FISH_WEIGHT_AGGRESSION_DIVISOR
}

/// Steers and integrates the fish for one tick.
pub fn step_fish<A: FishAi>(
    state: &mut EncounterState,
    equipment: &EquipmentProfile,
    fish: &FishProfile,
    ai: &mut A,
    dt: f64,
) {
    if (state.fish_position - state.fish_target).abs() < FISH_SETTLE_DISTANCE {
        if let Some(target) = ai.retarget(retarget_chance(equipment.difficulty_index)) {
            state.fish_target = target;
        }
    }

    let aggression = fish_aggression(fish.weight);
    if state.fish_position < state.fish_target {
        state.fish_velocity += aggression * dt;
    } else {
        state.fish_velocity -= aggression * dt;
    }
    state.fish_velocity = finite_or_zero(state.fish_velocity * FISH_DAMPING);

    let next = state.fish_position + state.fish_velocity * dt;
    let next = if next.is_finite() { next } else { state.fish_target };
    // Hard clamp, no bounce.
    state.fish_position = next.clamp(FISH_MIN_POSITION, FISH_MAX_POSITION);
}

/// Half the bar height plus tolerance, as a percentage of the track.
pub fn catch_reach(equipment: &EquipmentProfile) -> f64 {
    let bar_height_pct = equipment.bar_length / REFERENCE_TRACK_PIXELS * 100.0;
    let tolerance_pct = equipment.tolerance / REFERENCE_TRACK_PIXELS * 100.0;
    bar_height_pct / 2.0 + tolerance_pct
}

pub fn is_fish_inside(state: &EncounterState, equipment: &EquipmentProfile) -> bool {
    (state.fish_position - state.bar_position).abs() <= catch_reach(equipment)
}

/// Moves catch progress and the stress timer for one tick.
///
/// Returns `Succeeded` when progress reaches 100 and `Failed` once the
/// stress timer passes its threshold. Stress only builds while progress sits
/// at zero and bleeds off at half rate otherwise.
pub fn step_progress(state: &mut EncounterState, inside: bool, dt: f64) -> EncounterStatus {
    let rate = if inside {
        PROGRESS_GAIN_RATE
    } else {
        -PROGRESS_DRAIN_RATE
    };
    let next = finite_or_zero(state.progress + rate * dt);

    if next >= PROGRESS_MAX {
        state.progress = PROGRESS_MAX;
        state.is_stressed = false;
        return EncounterStatus::Succeeded;
    }

    if next <= PROGRESS_MIN {
        state.progress = PROGRESS_MIN;
        state.is_stressed = true;
        state.stress_accumulator += dt;
        if state.stress_accumulator > STRESS_FAIL_THRESHOLD {
            return EncounterStatus::Failed;
        }
        return EncounterStatus::Running;
    }

    state.progress = next;
    state.stress_accumulator = (state.stress_accumulator - dt * STRESS_RECOVERY_RATE).max(0.0);
    state.is_stressed = false;
    EncounterStatus::Running
}

/// One reeling encounter, from hook-set to landed or snapped line.
///
/// The host owns the frame loop: call [`tick`](Self::tick) once per frame
/// with a monotonic timestamp until a terminal result comes back, then
/// discard the encounter.
///
/// A clone continues the same fight from the same state but gets its own
/// [`PressHandle`], seeded with the current press flag.
#[derive(Debug)]
pub struct ReelingEncounter<A: FishAi = WanderingFish<ThreadRng>> {
    equipment: EquipmentProfile,
    fish: FishProfile,
    input_profile: InputProfile,
    physics: PhysicsConstants,
    state: EncounterState,
    status: EncounterStatus,
    press: PressHandle,
    ai: A,
}

impl<A: FishAi + Clone> Clone for ReelingEncounter<A> {
    fn clone(&self) -> Self {
        let press = PressHandle::new();
        press.set(self.press.get());
        Self {
            equipment: self.equipment,
            fish: self.fish,
            input_profile: self.input_profile,
            physics: self.physics,
            state: self.state.clone(),
            status: self.status,
            press,
            ai: self.ai.clone(),
        }
    }
}

impl ReelingEncounter {
    /// Starts an encounter whose fish struggles at random.
    pub fn start(
        equipment: EquipmentProfile,
        fish: FishProfile,
        input_profile: InputProfile,
        now: Instant,
    ) -> Self {
        Self::with_ai(
            equipment,
            fish,
            input_profile,
            WanderingFish::new(rand::thread_rng()),
            now,
        )
    }
}

impl<A: FishAi> ReelingEncounter<A> {
    /// Starts an encounter with a specific fish AI (seeded or stubbed).
    pub fn with_ai(
        equipment: EquipmentProfile,
        fish: FishProfile,
        input_profile: InputProfile,
        ai: A,
        now: Instant,
    ) -> Self {
        debug!(
            "reeling start: bar={}px tol={}px difficulty={} weight={} input={}",
            equipment.bar_length,
            equipment.tolerance,
            equipment.difficulty_index,
            fish.weight,
            input_profile.name()
        );
        Self {
            equipment,
            fish,
            input_profile,
            physics: input_profile.physics(),
            state: EncounterState::new(now),
            status: EncounterStatus::Running,
            press: PressHandle::new(),
            ai,
        }
    }

    /// Records the press flag; physics picks it up on the next tick.
    pub fn set_pressing(&self, pressed: bool) {
        self.press.set(pressed);
    }

    /// A handle input code can hold onto to set the press flag directly.
    pub fn press_handle(&self) -> PressHandle {
        self.press.clone()
    }

    /// Advances by the time elapsed since the previous tick.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        if self.status != EncounterStatus::Running {
            return self.terminal_result();
        }
        let raw = elapsed_dt(self.state.last_tick, now);
        self.state.last_tick = now;
        self.advance(raw)
    }

    /// Advances by an explicit normalized dt. The dt is capped by the input
    /// profile's ceiling like any other tick.
    pub fn advance(&mut self, dt: f64) -> TickResult {
        if self.status != EncounterStatus::Running {
            return self.terminal_result();
        }
        let dt = clamp_dt(dt, self.physics.max_dt);
        self.state.is_pressing = self.press.get();

        step_bar(&mut self.state, &self.physics, dt);
        step_fish(&mut self.state, &self.equipment, &self.fish, &mut self.ai, dt);
        let inside = is_fish_inside(&self.state, &self.equipment);
        self.status = step_progress(&mut self.state, inside, dt);

        match self.status {
            EncounterStatus::Running => TickResult::Continuing(self.state.snapshot()),
            _ => {
                debug!(
                    "reeling finished: {:?} (stress {:.1})",
                    self.status, self.state.stress_accumulator
                );
                self.terminal_result()
            }
        }
    }

    fn terminal_result(&self) -> TickResult {
        match self.status {
            EncounterStatus::Succeeded => TickResult::Succeeded,
            EncounterStatus::Failed => TickResult::Failed,
            EncounterStatus::Running => TickResult::Continuing(self.state.snapshot()),
        }
    }

    pub fn snapshot(&self) -> ReelingSnapshot {
        self.state.snapshot()
    }

    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    /// Mutable simulation state, for setting up edge cases in tests. Not
    /// part of the host API: hosts drive the encounter through ticks only.
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut EncounterState {
        &mut self.state
    }

    pub fn equipment(&self) -> &EquipmentProfile {
        &self.equipment
    }

    pub fn fish(&self) -> &FishProfile {
        &self.fish
    }

    pub fn input_profile(&self) -> InputProfile {
        self.input_profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reeling::ai::PinnedTarget;
    use std::time::Duration;

    fn bamboo() -> EquipmentProfile {
        EquipmentProfile {
            bar_length: 100.0,
            tolerance: 10.0,
            difficulty_index: 0,
        }
    }

    fn state() -> EncounterState {
        EncounterState::new(Instant::now())
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(1.0, 2.0), 1.0);
        assert_eq!(clamp_dt(10.0, 2.0), 2.0);
        assert_eq!(clamp_dt(10.0, 3.0), 3.0);
        assert_eq!(clamp_dt(-1.0, 2.0), 0.0);
        assert_eq!(clamp_dt(f64::NAN, 2.0), 0.0);
        assert_eq!(clamp_dt(f64::INFINITY, 2.0), 0.0);
    }

    #[test]
    fn test_elapsed_dt_nominal_frame() {
        let t0 = Instant::now();
        let dt = elapsed_dt(t0, t0 + Duration::from_millis(50));
        assert!((dt - 3.0).abs() < 1e-9);
        // Clock going backwards is no time at all
        assert_eq!(elapsed_dt(t0 + Duration::from_millis(50), t0), 0.0);
    }

    #[test]
    fn test_bar_rises_when_pressed() {
        let physics = InputProfile::Precision.physics();
        let mut s = state();
        s.bar_position = 50.0;
        s.is_pressing = true;
        step_bar(&mut s, &physics, 1.0);
        assert!((s.bar_velocity - 0.35 * 0.96).abs() < 1e-12);
        assert!(s.bar_position > 50.0);
    }

    #[test]
    fn test_bar_falls_when_released() {
        let physics = InputProfile::Precision.physics();
        let mut s = state();
        s.bar_position = 50.0;
        step_bar(&mut s, &physics, 1.0);
        assert!((s.bar_velocity + 0.15 * 0.96).abs() < 1e-12);
        assert!(s.bar_position < 50.0);
    }

    #[test]
    fn test_bar_damping_approaches_terminal_velocity() {
        let physics = InputProfile::Precision.physics();
        let mut s = state();
        s.is_pressing = true;
        let mut peak: f64 = 0.0;
        for _ in 0..10 {
            step_bar(&mut s, &physics, 1.0);
            peak = peak.max(s.bar_velocity);
        }
        // lift * damping / (1 - damping)
        assert!(peak < 0.35 * 0.96 / 0.04);
    }

    #[test]
    fn test_bounce_off_top() {
        let (pos, vel) = resolve_bar_bounds(101.0, 2.0, 0.4);
        assert_eq!(pos, 100.0);
        assert!((vel + 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_bounce_off_bottom() {
        let (pos, vel) = resolve_bar_bounds(-3.0, -2.0, 0.2);
        assert_eq!(pos, 0.0);
        assert!((vel - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_inside_track_untouched() {
        assert_eq!(resolve_bar_bounds(40.0, -1.5, 0.4), (40.0, -1.5));
    }

    #[test]
    fn test_fish_aggression_scales_with_weight() {
        assert!((fish_aggression(20.0) - 0.15).abs() < 1e-12);
        assert!((fish_aggression(100.0) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_fish_moves_toward_target() {
        let mut s = state();
        s.fish_target = 80.0;
        let mut ai = PinnedTarget::new();
        step_fish(&mut s, &bamboo(), &FishProfile { weight: 20.0 }, &mut ai, 1.0);
        assert!(s.fish_velocity > 0.0);
        assert!(s.fish_position > 30.0);
    }

    #[test]
    fn test_fish_retargets_only_when_settled() {
        struct AlwaysBolt;
        impl FishAi for AlwaysBolt {
            fn retarget(&mut self, _chance: f64) -> Option<f64> {
                Some(70.0)
            }
        }

        let mut s = state();
        s.fish_target = 60.0; // far from the fish at 30
        step_fish(&mut s, &bamboo(), &FishProfile { weight: 20.0 }, &mut AlwaysBolt, 1.0);
        assert_eq!(s.fish_target, 60.0);

        let mut s = state(); // fish and target both at 30
        step_fish(&mut s, &bamboo(), &FishProfile { weight: 20.0 }, &mut AlwaysBolt, 1.0);
        assert_eq!(s.fish_target, 70.0);
    }

    #[test]
    fn test_fish_hard_clamped() {
        let mut s = state();
        s.fish_position = 94.0;
        s.fish_target = 92.0;
        s.fish_velocity = 50.0;
        step_fish(&mut s, &bamboo(), &FishProfile { weight: 20.0 }, &mut PinnedTarget::new(), 1.0);
        assert_eq!(s.fish_position, 95.0);
        // No bounce: velocity keeps its sign
        assert!(s.fish_velocity > 0.0);
    }

    #[test]
    fn test_catch_reach() {
        // 100px bar = 25% of track, 10px tolerance = 2.5%
        assert!((catch_reach(&bamboo()) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_inside_uses_reach() {
        let mut s = state();
        s.bar_position = 50.0;
        s.fish_position = 64.9;
        assert!(is_fish_inside(&s, &bamboo()));
        s.fish_position = 35.5;
        assert!(is_fish_inside(&s, &bamboo()));
        s.fish_position = 65.2;
        assert!(!is_fish_inside(&s, &bamboo()));
    }

    #[test]
    fn test_progress_gain_and_drain_asymmetry() {
        let mut s = state();
        step_progress(&mut s, true, 1.0);
        assert!((s.progress - 25.6).abs() < 1e-12);
        let mut s = state();
        step_progress(&mut s, false, 1.0);
        assert!((s.progress - 24.2).abs() < 1e-12);
    }

    #[test]
    fn test_progress_caps_and_succeeds() {
        let mut s = state();
        s.progress = 99.9;
        assert_eq!(step_progress(&mut s, true, 1.0), EncounterStatus::Succeeded);
        assert_eq!(s.progress, 100.0);
    }

    #[test]
    fn test_stress_builds_at_zero() {
        let mut s = state();
        s.progress = 0.5;
        assert_eq!(step_progress(&mut s, false, 1.0), EncounterStatus::Running);
        assert_eq!(s.progress, 0.0);
        assert!(s.is_stressed);
        assert_eq!(s.stress_accumulator, 1.0);
    }

    #[test]
    fn test_stress_recovers_at_half_rate() {
        let mut s = state();
        s.progress = 10.0;
        s.stress_accumulator = 50.0;
        s.is_stressed = true;
        step_progress(&mut s, true, 2.0);
        assert!((s.stress_accumulator - 49.0).abs() < 1e-12);
        assert!(!s.is_stressed);
    }

    #[test]
    fn test_stress_floor_zero() {
        let mut s = state();
        s.stress_accumulator = 0.2;
        step_progress(&mut s, true, 1.0);
        assert_eq!(s.stress_accumulator, 0.0);
    }

    #[test]
    fn test_fails_past_threshold() {
        let mut s = state();
        s.progress = 0.0;
        s.stress_accumulator = 180.0;
        assert_eq!(step_progress(&mut s, false, 0.5), EncounterStatus::Failed);
    }

    #[test]
    fn test_exactly_threshold_is_not_failure() {
        let mut s = state();
        s.progress = 0.0;
        s.stress_accumulator = 179.0;
        assert_eq!(step_progress(&mut s, false, 1.0), EncounterStatus::Running);
        assert_eq!(s.stress_accumulator, 180.0);
    }

    #[test]
    fn test_press_takes_effect_next_tick() {
        let mut enc = ReelingEncounter::with_ai(
            bamboo(),
            FishProfile { weight: 20.0 },
            InputProfile::Precision,
            PinnedTarget::new(),
            Instant::now(),
        );
        enc.set_pressing(true);
        assert_eq!(enc.snapshot().bar_position, 0.0);
        enc.advance(1.0);
        assert!(enc.snapshot().bar_position > 0.0);
        assert!(enc.state().is_pressing);
    }

    #[test]
    fn test_tick_uses_elapsed_time() {
        let t0 = Instant::now();
        let mut enc = ReelingEncounter::with_ai(
            bamboo(),
            FishProfile { weight: 20.0 },
            InputProfile::Precision,
            PinnedTarget::new(),
            t0,
        );
        // Fish and bar start 30 apart, outside reach: 1 dt drains 0.8
        enc.tick(t0 + Duration::from_secs(1) / 60);
        assert!((enc.snapshot().progress - 24.2).abs() < 1e-6);
        assert_eq!(enc.state().last_tick, t0 + Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_long_gap_is_capped() {
        let t0 = Instant::now();
        let mut enc = ReelingEncounter::with_ai(
            bamboo(),
            FishProfile { weight: 20.0 },
            InputProfile::Precision,
            PinnedTarget::new(),
            t0,
        );
        enc.tick(t0 + Duration::from_secs(30));
        // Capped at 2 dt of drain
        assert!((enc.snapshot().progress - 23.4).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_is_absorbing() {
        let mut enc = ReelingEncounter::with_ai(
            bamboo(),
            FishProfile { weight: 20.0 },
            InputProfile::Precision,
            PinnedTarget::new(),
            Instant::now(),
        );
        enc.state_mut().progress = 99.9;
        enc.state_mut().bar_position = 30.0;
        assert_eq!(enc.advance(1.0), TickResult::Succeeded);
        let before = enc.state().clone();
        assert_eq!(enc.advance(1.0), TickResult::Succeeded);
        assert_eq!(enc.tick(Instant::now()), TickResult::Succeeded);
        assert_eq!(enc.state(), &before);
        assert_eq!(enc.status(), EncounterStatus::Succeeded);
    }

    #[test]
    fn test_clone_gets_its_own_press_handle() {
        let enc = ReelingEncounter::with_ai(
            bamboo(),
            FishProfile { weight: 20.0 },
            InputProfile::Precision,
            PinnedTarget::new(),
            Instant::now(),
        );
        enc.set_pressing(true);
        let mut copy = enc.clone();
        assert!(copy.press_handle().get());

        copy.set_pressing(false);
        assert!(enc.press_handle().get());
        enc.set_pressing(false);
        copy.set_pressing(true);
        assert!(!enc.press_handle().get());

        // Same fight, same state
        assert_eq!(copy.state(), enc.state());
        copy.advance(1.0);
        assert!(copy.state().bar_velocity > 0.0);
        assert_eq!(enc.state().bar_velocity, 0.0);
    }
}
