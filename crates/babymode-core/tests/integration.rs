//! Integration tests for Baby Mode core
//!
//! These tests drive complete sessions through the public API:
//! - Swipe sessions across the whole screen set
//! - Parent exit sequences, including every wrong ordering
//! - Kiosk engage/disable against scripted capabilities
//! - Worker install, activate and offline fetch against the in-memory cache

use std::cell::RefCell;

use babymode_core::cache::{WORKER_SCRIPT, WORKER_WASM};
use babymode_core::kiosk::engage;
use babymode_core::testing::{
    MemoryCaches, MemoryNetwork, MemoryResponse, RecordingScope, ScriptedCapabilities,
    SequenceRandom,
};
use babymode_core::{
    AppConfig, CacheBackend, CacheManifest, CacheWorker, Corner, ExitDetector, ExitEvent,
    FetchOutcome, FetchRequest, InteractionAnimator, KioskLock, NavResult, PowerMode,
    ScreenNavigator, Size, Support,
};

const WIDTH: f64 = 400.0;

fn swipe(nav: &mut ScreenNavigator, dx: f64, duration_ms: f64, start_ms: f64) -> NavResult {
    nav.begin_drag(200.0, 300.0, start_ms);
    nav.update_drag(200.0 + dx, 300.0, WIDTH, start_ms + duration_ms);
    nav.end_drag(start_ms + duration_ms)
}

// =============================================================================
// Navigation Sessions
// =============================================================================

#[test]
fn test_swipe_through_all_screens_and_back() {
    let config = AppConfig::default();
    let mut nav = ScreenNavigator::new(config.screen_count(), config.swipe.clone());
    let mut now = 0.0;

    for expected in 1..5 {
        swipe(&mut nav, -120.0, 200.0, now);
        now += 1000.0;
        assert_eq!(nav.current_screen(), expected);
    }

    // Extra swipe past the end stays put
    swipe(&mut nav, -120.0, 200.0, now);
    now += 1000.0;
    assert_eq!(nav.current_screen(), 4);
    assert!((nav.offset() + 80.0).abs() < 0.001);

    for expected in (0..4).rev() {
        swipe(&mut nav, 120.0, 200.0, now);
        now += 1000.0;
        assert_eq!(nav.current_screen(), expected);
    }
}

#[test]
fn test_index_always_in_range() {
    let mut nav = ScreenNavigator::new(5, AppConfig::default().swipe);
    let deltas = [-300.0, -15.0, 45.0, -60.0, 200.0, -51.0, 11.0, -400.0, 90.0, -12.0];
    let durations = [50.0, 400.0, 100.0, 30.0, 1000.0];
    let mut now = 0.0;

    for (i, dx) in deltas.iter().cycle().take(60).enumerate() {
        swipe(&mut nav, *dx, durations[i % durations.len()], now);
        now += 500.0;
        assert!(nav.current_screen() < nav.screen_count());
    }
}

#[test]
fn test_slow_short_swipes_never_move() {
    let mut nav = ScreenNavigator::new(5, AppConfig::default().swipe);
    nav.go_to_screen(2, 0.0);
    let mut now = 1000.0;

    // |dx| <= 50 and velocity <= 0.3 px/ms
    for dx in [-50.0, -30.0, 12.0, 50.0] {
        swipe(&mut nav, dx, 200.0, now);
        now += 500.0;
        assert_eq!(nav.current_screen(), 2);
    }
}

#[test]
fn test_swipe_during_transition_is_dropped() {
    let mut nav = ScreenNavigator::new(5, AppConfig::default().swipe);
    swipe(&mut nav, -120.0, 100.0, 0.0);
    assert_eq!(nav.current_screen(), 1);

    // Released at 100ms; the lock holds until 400ms
    let result = swipe(&mut nav, -120.0, 100.0, 150.0);
    assert_eq!(result, NavResult::Ignored);
    assert_eq!(nav.current_screen(), 1);
}

// =============================================================================
// Parent Exit
// =============================================================================

#[test]
fn test_only_exact_order_matches() {
    let mut matches = 0;
    for a in Corner::ALL {
        for b in Corner::ALL {
            for c in Corner::ALL {
                for d in Corner::ALL {
                    let mut detector = ExitDetector::default();
                    let mut last = ExitEvent::Ignored;
                    for (i, corner) in [a, b, c, d].into_iter().enumerate() {
                        last = detector.record(corner, i as f64 * 100.0);
                    }
                    if last == ExitEvent::Matched {
                        matches += 1;
                        assert_eq!([a, b, c, d], Corner::DEFAULT_PATTERN);
                    } else {
                        assert_eq!(last, ExitEvent::Mismatch);
                    }
                    assert!(detector.sequence().is_empty());
                }
            }
        }
    }
    assert_eq!(matches, 1);
}

#[test]
fn test_exit_sequence_from_touches() {
    let viewport = Size::new(390.0, 844.0);
    let mut detector = ExitDetector::default();

    let touches = [(0.0, 0.0), (390.0, 0.0), (390.0, 844.0), (0.0, 844.0)];
    let events: Vec<ExitEvent> = touches
        .iter()
        .enumerate()
        .map(|(i, (x, y))| detector.on_touch(1, *x, *y, viewport, i as f64 * 700.0))
        .collect();

    assert_eq!(events[3], ExitEvent::Matched);
}

#[test]
fn test_exit_sequence_times_out() {
    let viewport = Size::new(390.0, 844.0);
    let mut detector = ExitDetector::default();

    detector.on_touch(1, 10.0, 10.0, viewport, 0.0);
    detector.on_touch(1, 380.0, 10.0, viewport, 1000.0);
    detector.on_touch(1, 380.0, 830.0, viewport, 2000.0);
    // More than 3s after the last tap
    let event = detector.on_touch(1, 10.0, 830.0, viewport, 5500.0);

    assert_eq!(
        event,
        ExitEvent::Recorded {
            corner: Corner::BottomLeft,
            len: 1
        }
    );
}

// =============================================================================
// Kiosk and Power
// =============================================================================

#[test]
fn test_kiosk_engage_then_parent_exit_releases() {
    let lock = RefCell::new(KioskLock::default());
    let provider = ScriptedCapabilities::supported();

    pollster::block_on(engage(&lock, &provider));
    assert!(lock.borrow().is_locked());

    lock.borrow_mut().disable(&provider);
    assert!(!lock.borrow().is_locked());
    assert_eq!(provider.exit_calls(), 1);
}

#[test]
fn test_low_battery_slows_tap_animation() {
    let config = AppConfig::default();
    let mut animator = InteractionAnimator::new(config.animator.clone());
    let status = Support::ok(babymode_core::BatteryStatus {
        level: 0.1,
        charging: false,
    })
    .value()
    .unwrap();

    let mode = PowerMode::from_battery(status, &config.power);
    animator.set_animation_secs(mode.animation_secs(&config.power));

    let mut rng = SequenceRandom::new(vec![0.5]);
    let plan = animator.plan_tap(Size::new(400.0, 800.0), &mut rng);
    assert_eq!(plan.resume_animation, "float 8s ease-in-out infinite");
    assert!((plan.target.x - 150.0).abs() < 0.001);
    assert!((plan.target.y - 350.0).abs() < 0.001);
}

// =============================================================================
// Offline Cache Worker
// =============================================================================

#[test]
fn test_worker_upgrade_cycle() {
    let caches = MemoryCaches::new();
    caches.insert("baby-mode-v0", "/index.html", MemoryResponse::ok("old shell"));
    let scope = RecordingScope::new();
    let worker = CacheWorker::default();

    pollster::block_on(worker.install(&caches, &scope)).unwrap();
    for url in CacheManifest::DEFAULT.shell {
        assert!(caches.contains("baby-mode-v1", url));
    }

    let deleted = pollster::block_on(worker.activate(&caches, &scope)).unwrap();
    assert_eq!(deleted, vec!["baby-mode-v0".to_string()]);
    assert_eq!(caches.names(), vec!["baby-mode-v1".to_string()]);
    assert_eq!(scope.skip_waiting_calls(), 1);
    assert_eq!(scope.claim_calls(), 1);
}

#[test]
fn test_worker_serves_offline_after_install() {
    let caches = MemoryCaches::new();
    let scope = RecordingScope::new();
    let worker = CacheWorker::default();
    pollster::block_on(worker.install(&caches, &scope)).unwrap();

    let offline = MemoryNetwork::offline();

    // Shell assets straight from cache
    let outcome = pollster::block_on(worker.respond(
        &FetchRequest::get("/css/styles.css"),
        &caches,
        &offline,
    ));
    assert!(matches!(outcome, FetchOutcome::Cached(_)));

    // Unknown page falls back to the shell document
    let outcome = pollster::block_on(worker.respond(
        &FetchRequest::navigate("/somewhere"),
        &caches,
        &offline,
    ));
    assert!(matches!(outcome, FetchOutcome::Fallback(ref r) if r.body == "/index.html"));

    // Unknown asset has nothing to fall back to
    let outcome =
        pollster::block_on(worker.respond(&FetchRequest::get("/extra.png"), &caches, &offline));
    assert!(outcome.into_response().is_none());
}

#[test]
fn test_worker_bundle_available_offline_after_install() {
    let caches = MemoryCaches::new();
    let worker = CacheWorker::default();
    pollster::block_on(worker.install(&caches, &RecordingScope::new())).unwrap();

    // A restarted worker reads its own module back from the shell cache
    let lookup = pollster::block_on(caches.lookup(&FetchRequest::get(WORKER_WASM))).unwrap();
    assert!(lookup.is_some());
    let lookup = pollster::block_on(caches.lookup(&FetchRequest::get(WORKER_SCRIPT))).unwrap();
    assert!(lookup.is_some());
}

#[test]
fn test_worker_caches_runtime_assets() {
    let caches = MemoryCaches::new();
    let network = MemoryNetwork::new().serving("/assets/icons/icon-192x192.png", MemoryResponse::ok("icon"));
    let worker = CacheWorker::default();
    let request = FetchRequest::get("/assets/icons/icon-192x192.png");

    let first = pollster::block_on(worker.respond(&request, &caches, &network));
    assert!(matches!(first, FetchOutcome::Network { stored: true, .. }));

    let second = pollster::block_on(worker.respond(&request, &caches, &network));
    assert!(matches!(second, FetchOutcome::Cached(_)));
    assert_eq!(network.requests().len(), 1);
}
