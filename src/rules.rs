//! Game rules: every transition of `GameState` during play.
//!
//! `tick` advances one scheduled step; `turn` and `activate` are the input
//! entry points. All randomness comes through the injected RNG so a seeded
//! generator replays a game exactly.

use log::{debug, info};
use rand::Rng;

use crate::config::{GameMode, Settings};
use crate::entities::{EffectKind, PowerUpKind};
use crate::events::{Collision, Event};
use crate::grid::Direction;
use crate::state::GameState;

/// Uncollected power-ups vanish after this long.
pub const POWER_UP_LIFETIME_MS: u64 = 10_000;
pub const EFFECT_DURATION_MS: u64 = 5_000;
/// Chance that eating food also drops a power-up.
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.15;
/// Chance that a survival-mode level-up brings another obstacle batch.
pub const SURVIVAL_OBSTACLE_CHANCE: f64 = 0.3;
pub const MULTI_FOOD_RESPAWNS: u64 = 3;
pub const MULTI_FOOD_STAGGER_MS: u64 = 200;
/// Combo length from which eating also fires `Event::ComboStreak`.
pub const COMBO_STREAK_THRESHOLD: u32 = 5;

/// Result of one tick. `fatal` is set when the snake died; the state was not
/// touched after the collision was detected.
#[derive(Debug, Default)]
pub struct TickOutcome {
    pub events: Vec<Event>,
    pub fatal: Option<Collision>,
}

// ── Input-driven transitions ────────────────────────────────────────────────

/// Buffers a turn. Only turns across the current axis of travel are
/// accepted; from rest every direction is. Clears the post-resume hold.
pub fn turn(state: &mut GameState, direction: Direction) -> bool {
    let accepted = match state.direction {
        None => true,
        Some(current) => current.is_vertical() != direction.is_vertical(),
    };
    if accepted {
        state.next_direction = Some(direction);
        state.waiting_for_movement = false;
    }
    accepted
}

/// Spends one banked unit of `kind`. A no-op when nothing is banked or the
/// effect is already running.
pub fn activate(state: &mut GameState, kind: EffectKind) -> Option<Event> {
    if state.inventory.count(kind) == 0 || state.effects.is_active(kind) {
        return None;
    }
    *state.inventory.count_mut(kind) -= 1;
    let effect = state.effects.get_mut(kind);
    effect.active = true;
    effect.remaining_ms = EFFECT_DURATION_MS;
    if let Some(factor) = kind.speed_factor() {
        state.current_speed *= factor;
    }
    debug!("{} activated, speed now {:.2}", kind.label(), state.current_speed);
    Some(Event::EffectActivated(kind))
}

// ── Scheduled tick ──────────────────────────────────────────────────────────

/// One scheduled update. `elapsed_ms` is the time since the previous tick,
/// `now_ms` the game clock used for power-up lifetimes.
pub fn tick(
    state: &mut GameState,
    settings: &Settings,
    elapsed_ms: u64,
    now_ms: u64,
    rng: &mut impl Rng,
) -> TickOutcome {
    let mut out = TickOutcome::default();
    let level_before = state.level();

    decay_effects(state, settings, elapsed_ms, &mut out.events);
    commit_direction(state);
    if let Some(cause) = move_snake(state, settings, now_ms, rng, &mut out.events) {
        out.fatal = Some(cause);
        return out;
    }
    sweep_power_ups(state, now_ms, rng, &mut out.events);

    state.play_time_ms += elapsed_ms;
    check_level_up(state, settings, level_before, rng, &mut out.events);
    check_achievements(state, &mut out.events);
    check_high_score(state, &mut out.events);
    out
}

fn decay_effects(state: &mut GameState, settings: &Settings, elapsed_ms: u64, events: &mut Vec<Event>) {
    for kind in EffectKind::ALL {
        let effect = state.effects.get_mut(kind);
        if !effect.active {
            continue;
        }
        effect.remaining_ms = effect.remaining_ms.saturating_sub(elapsed_ms);
        if effect.remaining_ms == 0 {
            effect.active = false;
            if kind.speed_factor().is_some() {
                // Reset to the level formula rather than undoing the factor.
                state.current_speed =
                    state.formula_speed(settings.difficulty.settings().speed_increase);
            }
            debug!("{} expired", kind.label());
            events.push(Event::EffectExpired(kind));
        }
    }
}

fn commit_direction(state: &mut GameState) {
    if let Some(next) = state.next_direction {
        state.direction = Some(next);
        state.moving = true;
    }
}

fn move_snake(
    state: &mut GameState,
    settings: &Settings,
    now_ms: u64,
    rng: &mut impl Rng,
    events: &mut Vec<Event>,
) -> Option<Collision> {
    if state.waiting_for_movement {
        return None;
    }
    let direction = state.direction?;

    let mut new_head = state.head().step(direction);
    if !state.grid.contains(new_head) {
        if settings.wall_collision {
            return Some(Collision::Wall);
        }
        new_head = state.grid.wrap(new_head);
    }

    let hit = if state.is_on_snake(new_head) {
        Some(Collision::SelfBite)
    } else if state.is_on_obstacle(new_head) {
        Some(Collision::Obstacle)
    } else {
        None
    };
    if let Some(cause) = hit {
        if !state.effects.is_active(EffectKind::Shield) {
            return Some(cause);
        }
        state.shield_saves += 1;
    }

    state.snake.insert(0, new_head);
    if new_head == state.food {
        eat_food(state, settings, now_ms, rng, events);
    } else {
        state.snake.pop();
        state.combo = 0;
    }
    events.push(Event::Moved { head: new_head });

    if let Some(i) = state.power_ups.iter().position(|p| p.cell == new_head) {
        let power_up = state.power_ups.remove(i);
        collect_power_up(state, power_up.kind, now_ms);
        events.push(Event::PowerUpCollected {
            id: power_up.id,
            kind: power_up.kind,
            cell: power_up.cell,
        });
    }
    None
}

fn eat_food(
    state: &mut GameState,
    settings: &Settings,
    now_ms: u64,
    rng: &mut impl Rng,
    events: &mut Vec<Event>,
) {
    let cell = state.food;
    state.combo += 1;
    let mut points = 1;
    if state.combo > 1 {
        points += state.combo / 2;
    }
    state.score += points;
    state.max_combo = state.max_combo.max(state.combo);
    events.push(Event::FoodEaten {
        cell,
        points,
        combo: state.combo,
    });
    if state.combo >= COMBO_STREAK_THRESHOLD {
        events.push(Event::ComboStreak(state.combo));
    }

    let food = state.respawn_food(rng);
    events.push(Event::FoodRespawned(food));

    if settings.power_ups_active() && rng.gen_bool(POWER_UP_SPAWN_CHANCE) {
        if let Some(p) = state.spawn_power_up(now_ms, rng) {
            events.push(Event::PowerUpSpawned {
                id: p.id,
                kind: p.kind,
                cell: p.cell,
            });
        }
    }

    check_achievements(state, events);
    state.current_speed += settings.difficulty.settings().speed_increase;
}

fn collect_power_up(state: &mut GameState, kind: PowerUpKind, now_ms: u64) {
    match kind.banked_effect() {
        Some(effect) => *state.inventory.count_mut(effect) += 1,
        None => {
            state
                .pending_food
                .extend((0..MULTI_FOOD_RESPAWNS).map(|i| now_ms + i * MULTI_FOOD_STAGGER_MS));
        }
    }
}

/// Drops expired power-ups and fires due food respawns.
fn sweep_power_ups(state: &mut GameState, now_ms: u64, rng: &mut impl Rng, events: &mut Vec<Event>) {
    state.power_ups.retain(|p| {
        let alive = now_ms.saturating_sub(p.spawned_at) < POWER_UP_LIFETIME_MS;
        if !alive {
            events.push(Event::PowerUpExpired { id: p.id });
        }
        alive
    });

    let due = state.pending_food.iter().filter(|&&at| at <= now_ms).count();
    state.pending_food.retain(|&at| at > now_ms);
    for _ in 0..due {
        let food = state.respawn_food(rng);
        events.push(Event::FoodRespawned(food));
    }
}

fn check_level_up(
    state: &mut GameState,
    settings: &Settings,
    level_before: u32,
    rng: &mut impl Rng,
    events: &mut Vec<Event>,
) {
    let level = state.level();
    if level <= level_before {
        return;
    }
    info!("level {level} reached with score {}", state.score);
    events.push(Event::LevelUp { level });
    if settings.mode == GameMode::Survival && rng.gen_bool(SURVIVAL_OBSTACLE_CHANCE) {
        let placed = state.spawn_obstacle_batch(rng);
        events.push(Event::ObstaclesSpawned(placed));
    }
}

pub fn check_achievements(state: &mut GameState, events: &mut Vec<Event>) {
    let progress = state.progress();
    for id in state.achievements.evaluate(&progress) {
        info!("achievement unlocked: {}", id.info().name);
        events.push(Event::AchievementUnlocked(id));
    }
}

fn check_high_score(state: &mut GameState, events: &mut Vec<Event>) {
    if !state.new_record && state.score > 0 && state.score > state.high_score {
        state.new_record = true;
        events.push(Event::NewHighScore(state.score));
    }
}
