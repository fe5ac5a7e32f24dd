//! Fishing session integration tests
//!
//! Walks whole fishing loops through the public API:
//! - Cast, bite, hook, reel and keep
//! - Missed bites and snapped lines
//! - Selling, buying rods and saving progress

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use zen_fishing::reeling::{InputProfile, TickResult};
use zen_fishing::save_manager::SaveManager;
use zen_fishing::session::{Angler, FishingSession, SessionPhase};
use zen_fishing::simulator::BotPolicy;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

/// Casts for `hold` and polls every 100ms until a fish bites.
fn cast_until_bite(
    session: &mut FishingSession,
    t0: Instant,
    hold: Duration,
    rng: &mut ChaCha8Rng,
) -> Instant {
    session.begin_cast(t0).unwrap();
    session.release_cast(t0 + hold, rng).unwrap();
    assert_eq!(session.phase(), SessionPhase::Waiting);

    let mut now = t0 + hold;
    for _ in 0..60 {
        now += Duration::from_millis(100);
        let result = session.update(now);
        if session.phase() == SessionPhase::Biting {
            assert_eq!(result.messages, vec!["Something's biting! Hook it!"]);
            return now;
        }
        assert!(result.messages.is_empty());
    }
    panic!("no bite within 6 seconds");
}

/// Reels with the tracking bot until the encounter resolves.
fn reel_with_bot(session: &mut FishingSession) -> TickResult {
    let bot = BotPolicy::default();
    for _ in 0..20_000 {
        let press = match session.encounter() {
            Some(encounter) => {
                let state = encounter.state();
                bot.wants_press(state.bar_position, state.bar_velocity, state.fish_position)
            }
            None => panic!("no active encounter"),
        };
        session.set_pressing(press);
        match session.reel_by(1.0) {
            Some(TickResult::Continuing(_)) => {}
            Some(outcome) => return outcome,
            None => panic!("encounter vanished mid-fight"),
        }
    }
    panic!("encounter never resolved");
}

// ============================================================================
// Complete loop
// ============================================================================

#[test]
fn test_full_fishing_loop_lands_and_stows_fish() {
    let mut rng = create_test_rng();
    let mut session = FishingSession::new(Angler::new(), InputProfile::Precision);
    let t0 = Instant::now();

    let bite = cast_until_bite(&mut session, t0, Duration::from_millis(800), &mut rng);
    assert!((session.cast_power(bite) - 0.8).abs() < 1e-12);

    let hooked_name = session.hook(bite, &mut rng).unwrap().name.clone();
    assert_eq!(session.phase(), SessionPhase::Fighting);
    assert!(session.encounter().is_some());

    // A frame through the timestamp path first
    let first = session.update(bite + Duration::from_millis(16));
    assert!(matches!(first.reeling, Some(TickResult::Continuing(_))));

    assert_eq!(reel_with_bot(&mut session), TickResult::Succeeded);
    assert_eq!(session.phase(), SessionPhase::Caught);
    assert!(session.encounter().is_none());
    assert!(session.hooked_fish().is_none());
    assert_eq!(session.landed_fish().map(|f| f.name.clone()), Some(hooked_name.clone()));

    let message = session.keep_catch().unwrap();
    assert_eq!(message, format!("Caught a {}!", hooked_name));
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(session.angler.backpack.len(), 1);
    assert!(session.angler.backpack[0].value > 0);
}

#[test]
fn test_several_casts_fill_backpack() {
    let mut rng = create_test_rng();
    let mut session = FishingSession::new(Angler::new(), InputProfile::Touch);
    let mut now = Instant::now();

    for _ in 0..3 {
        let bite = cast_until_bite(&mut session, now, Duration::from_millis(500), &mut rng);
        session.hook(bite, &mut rng).unwrap();
        assert_eq!(reel_with_bot(&mut session), TickResult::Succeeded);
        session.keep_catch().unwrap();
        now = bite + Duration::from_secs(30);
    }

    assert_eq!(session.angler.backpack.len(), 3);
    let ids: Vec<&str> = session.angler.backpack.iter().map(|f| f.id.as_str()).collect();
    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);
}

// ============================================================================
// Failure paths
// ============================================================================

#[test]
fn test_unanswered_bite_gets_away() {
    let mut rng = create_test_rng();
    let mut session = FishingSession::new(Angler::new(), InputProfile::Precision);
    let bite = cast_until_bite(&mut session, Instant::now(), Duration::ZERO, &mut rng);

    let result = session.update(bite + Duration::from_secs(2));
    assert_eq!(result.messages, vec!["The fish got away..."]);
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.hook(bite + Duration::from_secs(2), &mut rng).is_err());
}

#[test]
fn test_snapped_line_returns_to_idle() {
    let mut rng = create_test_rng();
    let mut session = FishingSession::new(Angler::new(), InputProfile::Precision);
    let bite = cast_until_bite(&mut session, Instant::now(), Duration::from_millis(200), &mut rng);
    session.hook(bite, &mut rng).unwrap();

    // Right at the edge of snapping with the fish far from the bar
    {
        let state = session.encounter_mut().unwrap().state_mut();
        state.progress = 0.0;
        state.stress_accumulator = 179.5;
        state.bar_position = 0.0;
        state.fish_position = 90.0;
        state.fish_target = 90.0;
    }
    session.set_pressing(false);

    let result = session.update(bite + Duration::from_millis(50));
    assert_eq!(result.reeling, Some(TickResult::Failed));
    assert_eq!(result.messages, vec!["The line snapped!"]);
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.encounter().is_none());
    assert!(session.angler.backpack.is_empty());

    // Ready for another cast straight away
    assert!(session.begin_cast(bite + Duration::from_secs(1)).is_ok());
}

// ============================================================================
// Shop and persistence
// ============================================================================

#[test]
fn test_catch_sell_upgrade_and_save() {
    let mut rng = create_test_rng();
    let mut session = FishingSession::new(Angler::new(), InputProfile::Precision);
    let bite = cast_until_bite(&mut session, Instant::now(), Duration::from_secs(1), &mut rng);
    session.hook(bite, &mut rng).unwrap();
    reel_with_bot(&mut session);
    session.keep_catch().unwrap();

    let value = session.angler.backpack[0].value;
    assert_eq!(session.angler.sell_all().coins, value);
    assert_eq!(session.angler.coins, value);

    session.angler.coins += 1800;
    assert_eq!(session.angler.unlock_rod(1).unwrap(), "Unlocked Fiberglass Rod!");
    assert_eq!(session.angler.current_rod().name, "Fiberglass Rod");

    let path = std::env::temp_dir().join(format!("zen_fishing_flow_{}.dat", std::process::id()));
    let manager = SaveManager::at(&path);
    manager.save(&session.angler).unwrap();

    let restored = manager.load_or_default().unwrap();
    assert_eq!(restored, session.angler);
    assert!(restored.has_rod(1));
    std::fs::remove_file(&path).unwrap();
}
