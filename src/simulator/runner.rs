//! Main simulation runner driving real reeling encounters with a bot player.
//!
//! Encounters are advanced with a fixed dt through the same
//! `ReelingEncounter` the game uses; statistics are read back from the
//! encounter state after every tick.

use std::time::Instant;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::SimConfig;
use super::report::{RunOutcome, RunStats, SimReport};
use crate::fishing::{calculate_fish, rod_by_id, Rod, RODS};
use crate::reeling::{
    FishAi, FishProfile, PinnedTarget, ReelingEncounter, TickResult, WanderingFish,
};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let rod = resolve_rod(config.rod_id);
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, rod, &mut rng);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?} after {} ticks (weight {:.1}, stressed {} ticks)",
                run_idx + 1,
                config.num_runs,
                stats.outcome,
                stats.ticks,
                stats.fish_weight,
                stats.stressed_ticks
            );
        }
        all_runs.push(stats);
    }

    let report = SimReport::from_runs(
        all_runs,
        rod.name,
        config.input_profile.name(),
        config.policy.name(),
    );
    info!(
        "simulated {} encounters with {}: {} landed, {} snapped, {} timed out",
        report.num_runs, rod.name, report.landed, report.snapped, report.timed_out
    );
    report
}

fn resolve_rod(rod_id: u32) -> &'static Rod {
    rod_by_id(rod_id).unwrap_or_else(|| {
        debug!("unknown rod {}, falling back to {}", rod_id, RODS[0].name);
        &RODS[0]
    })
}

/// Plays one encounter to completion or timeout.
pub fn simulate_single_run(config: &SimConfig, rod: &Rod, rng: &mut ChaCha8Rng) -> RunStats {
    let fish_weight = match config.fish_weight {
        Some(weight) => weight,
        None => calculate_fish(rng.gen(), rod, rng).weight,
    };
    let fish = FishProfile {
        weight: fish_weight,
    };
    let now = Instant::now();

    if config.calm_fish {
        let encounter = ReelingEncounter::with_ai(
            rod.equipment_profile(),
            fish,
            config.input_profile,
            PinnedTarget::new(),
            now,
        );
        play_encounter(encounter, config)
    } else {
        let ai = WanderingFish::new(ChaCha8Rng::seed_from_u64(rng.gen()));
        let encounter =
            ReelingEncounter::with_ai(rod.equipment_profile(), fish, config.input_profile, ai, now);
        play_encounter(encounter, config)
    }
}

fn play_encounter<A: FishAi>(mut encounter: ReelingEncounter<A>, config: &SimConfig) -> RunStats {
    let fish_weight = encounter.fish().weight;
    let mut stressed_ticks = 0;

    for tick in 1..=config.max_ticks_per_run {
        let state = encounter.state();
        let press = config
            .policy
            .wants_press(state.bar_position, state.bar_velocity, state.fish_position);
        encounter.set_pressing(press);

        let outcome = match encounter.advance(config.dt) {
            TickResult::Continuing(snapshot) => {
                if snapshot.is_stressed {
                    stressed_ticks += 1;
                }
                continue;
            }
            TickResult::Succeeded => RunOutcome::Landed,
            TickResult::Failed => RunOutcome::Snapped,
        };

        return RunStats {
            outcome,
            ticks: tick,
            stressed_ticks,
            fish_weight,
        };
    }

    RunStats {
        outcome: RunOutcome::TimedOut,
        ticks: config.max_ticks_per_run,
        stressed_ticks,
        fish_weight,
    }
}
