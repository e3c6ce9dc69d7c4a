use rand::SeedableRng;
use rand::rngs::StdRng;

use snake_arcade::entities::EffectKind;
use snake_arcade::events::Event;
use snake_arcade::rules::{self, tick};
use snake_arcade::state::GameState;
use snake_arcade::{Cell, Direction, Grid, Settings};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(1234)
}

/// A resting snake on a medium board, so ticks only advance timers.
fn idle_state() -> GameState {
    let mut rng = seeded_rng();
    let mut state = GameState::new(Grid::new(15, 15), &Settings::default(), 0, &mut rng);
    state.food = Cell::new(1, 1);
    state
}

fn expiries(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::EffectExpired(_)))
        .count()
}

#[test]
fn nothing_banked_means_nothing_happens() {
    let mut state = idle_state();
    let before = state.clone();
    for kind in EffectKind::ALL {
        assert_eq!(rules::activate(&mut state, kind), None);
    }
    assert_eq!(state, before);
}

#[test]
fn speed_boost_runs_five_seconds_then_resets_to_the_level_speed() {
    let settings = Settings::default();
    let mut rng = seeded_rng();
    let mut state = idle_state();
    state.inventory.speed_boost = 1;

    assert_eq!(
        rules::activate(&mut state, EffectKind::SpeedBoost),
        Some(Event::EffectActivated(EffectKind::SpeedBoost))
    );
    assert_eq!(state.inventory.speed_boost, 0);
    assert_eq!(state.effects.speed_boost.remaining_ms, 5_000);
    assert!((state.current_speed - 12.0).abs() < 1e-9);

    let out = tick(&mut state, &settings, 5_000, 5_000, &mut rng);
    assert!(out.events.contains(&Event::EffectExpired(EffectKind::SpeedBoost)));
    assert!(!state.effects.speed_boost.active);
    assert!((state.current_speed - 8.0).abs() < 1e-9);
}

#[test]
fn expiry_discards_speed_gained_within_the_level() {
    let settings = Settings::default();
    let mut rng = seeded_rng();
    let mut state = idle_state();
    state.inventory.speed_boost = 1;
    rules::activate(&mut state, EffectKind::SpeedBoost);

    let head = state.head();
    state.direction = Some(Direction::Right);
    state.next_direction = Some(Direction::Right);
    state.food = head.step(Direction::Right);
    tick(&mut state, &settings, 100, 100, &mut rng);
    assert_eq!(state.score, 1);
    assert!((state.current_speed - 12.5).abs() < 1e-9);

    state.direction = None;
    state.next_direction = None;
    tick(&mut state, &settings, 4_900, 5_000, &mut rng);
    assert!((state.current_speed - 8.0).abs() < 1e-9);
}

#[test]
fn freeze_halves_the_speed() {
    let mut state = idle_state();
    state.inventory.freeze = 2;
    rules::activate(&mut state, EffectKind::Freeze);
    assert!((state.current_speed - 4.0).abs() < 1e-9);
    assert_eq!(state.inventory.freeze, 1);
}

#[test]
fn shield_leaves_the_speed_alone() {
    let mut state = idle_state();
    state.inventory.shield = 1;
    rules::activate(&mut state, EffectKind::Shield);
    assert!(state.effects.shield.active);
    assert!((state.current_speed - 8.0).abs() < 1e-9);
}

#[test]
fn a_running_effect_cannot_be_stacked() {
    let mut state = idle_state();
    state.inventory.speed_boost = 2;

    assert!(rules::activate(&mut state, EffectKind::SpeedBoost).is_some());
    let speed = state.current_speed;
    assert_eq!(rules::activate(&mut state, EffectKind::SpeedBoost), None);
    assert_eq!(state.inventory.speed_boost, 1);
    assert_eq!(state.current_speed, speed);
}

#[test]
fn timers_count_down_and_expire_exactly_once() {
    let settings = Settings::default();
    let mut rng = seeded_rng();
    let mut state = idle_state();
    state.inventory.shield = 1;
    rules::activate(&mut state, EffectKind::Shield);

    let out = tick(&mut state, &settings, 3_000, 3_000, &mut rng);
    assert_eq!(expiries(&out.events), 0);
    assert!(state.effects.shield.active);
    assert_eq!(state.effects.shield.remaining_ms, 2_000);

    let out = tick(&mut state, &settings, 3_000, 6_000, &mut rng);
    assert_eq!(expiries(&out.events), 1);
    assert!(!state.effects.shield.active);
    assert_eq!(state.effects.shield.remaining_ms, 0);

    let out = tick(&mut state, &settings, 3_000, 9_000, &mut rng);
    assert_eq!(expiries(&out.events), 0);
}

#[test]
fn effects_can_be_reactivated_after_expiry() {
    let settings = Settings::default();
    let mut rng = seeded_rng();
    let mut state = idle_state();
    state.inventory.freeze = 2;

    rules::activate(&mut state, EffectKind::Freeze);
    tick(&mut state, &settings, 5_000, 5_000, &mut rng);
    assert!((state.current_speed - 8.0).abs() < 1e-9);

    assert!(rules::activate(&mut state, EffectKind::Freeze).is_some());
    assert!((state.current_speed - 4.0).abs() < 1e-9);
    assert_eq!(state.inventory.freeze, 0);
}
