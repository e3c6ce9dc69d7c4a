//! The full per-game record. One owned value, mutated only by the rules in
//! `rules.rs` and discarded wholesale when a game ends.

use rand::Rng;

use crate::achievements::{Achievements, Progress};
use crate::config::Settings;
use crate::entities::{Effects, Inventory, Obstacle, PowerUp, PowerUpKind};
use crate::grid::{Cell, Direction, Grid};
use crate::spawn::random_free_cell;

/// Score needed per level.
pub const POINTS_PER_LEVEL: u32 = 10;
/// Share of the board covered by one obstacle batch.
pub const OBSTACLE_DENSITY: f64 = 0.05;
/// Obstacles stay out of the rows and columns this close to the centre.
pub const OBSTACLE_SAFE_RADIUS: i32 = 3;
pub const MAX_LIVE_POWER_UPS: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    /// Head first.
    pub snake: Vec<Cell>,
    /// Applied heading; `None` while the snake waits for its first input.
    pub direction: Option<Direction>,
    /// Buffered input, committed at the next tick.
    pub next_direction: Option<Direction>,
    pub food: Cell,
    pub power_ups: Vec<PowerUp>,
    pub obstacles: Vec<Obstacle>,
    pub effects: Effects,
    pub inventory: Inventory,
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub base_speed: f64,
    /// Ticks per second.
    pub current_speed: f64,
    /// Set on resume; movement is held until a fresh turn arrives.
    pub waiting_for_movement: bool,
    pub moving: bool,
    /// Time spent playing, pauses excluded.
    pub play_time_ms: u64,
    /// Game-clock deadlines of staggered food respawns.
    pub pending_food: Vec<u64>,
    pub shield_saves: u32,
    /// Best score on record when the game started.
    pub high_score: u32,
    pub new_record: bool,
    pub achievements: Achievements,
    next_id: u32,
}

impl GameState {
    /// A fresh game: a one-cell snake at the centre, food placed, and a batch
    /// of obstacles when the settings call for them.
    pub fn new(grid: Grid, settings: &Settings, high_score: u32, rng: &mut impl Rng) -> Self {
        let base_speed = settings.difficulty.settings().base_speed;
        let mut state = Self {
            grid,
            snake: vec![grid.center()],
            direction: None,
            next_direction: None,
            food: grid.center(),
            power_ups: Vec::new(),
            obstacles: Vec::new(),
            effects: Effects::default(),
            inventory: Inventory::default(),
            score: 0,
            combo: 0,
            max_combo: 0,
            base_speed,
            current_speed: base_speed,
            waiting_for_movement: false,
            moving: false,
            play_time_ms: 0,
            pending_food: Vec::new(),
            shield_saves: 0,
            high_score,
            new_record: false,
            achievements: Achievements::default(),
            next_id: 1,
        };
        state.respawn_food(rng);
        if settings.obstacles_active() {
            state.spawn_obstacle_batch(rng);
        }
        state
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// Always derived from the score.
    pub fn level(&self) -> u32 {
        level_for_score(self.score)
    }

    /// Tick rate implied by the difficulty and current level, ignoring
    /// everything eaten within the level.
    pub fn formula_speed(&self, speed_increase: f64) -> f64 {
        self.base_speed + f64::from(self.level() - 1) * speed_increase
    }

    pub fn is_on_snake(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    pub fn is_on_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.iter().any(|o| o.cell == cell)
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.is_on_snake(cell)
            || self.food == cell
            || self.is_on_obstacle(cell)
            || self.power_ups.iter().any(|p| p.cell == cell)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            score: self.score,
            combo: self.combo,
            current_speed: self.current_speed,
            base_speed: self.base_speed,
            play_time_ms: self.play_time_ms,
            snake_length: self.snake.len(),
            shield_saves: self.shield_saves,
        }
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ── Placement ────────────────────────────────────────────────────────────

    pub fn respawn_food(&mut self, rng: &mut impl Rng) -> Cell {
        self.food = random_free_cell(&self.grid, rng, |c| self.is_occupied(c));
        self.food
    }

    /// Places a power-up of random kind unless the live cap is reached.
    pub fn spawn_power_up(&mut self, now_ms: u64, rng: &mut impl Rng) -> Option<PowerUp> {
        if self.power_ups.len() >= MAX_LIVE_POWER_UPS {
            return None;
        }
        let cell = random_free_cell(&self.grid, rng, |c| self.is_occupied(c));
        let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
        let power_up = PowerUp {
            id: self.take_id(),
            cell,
            kind,
            spawned_at: now_ms,
        };
        self.power_ups.push(power_up.clone());
        Some(power_up)
    }

    /// Adds `floor(area * OBSTACLE_DENSITY)` obstacles, keeping clear of the
    /// centre cross where the snake starts. Returns how many were placed.
    pub fn spawn_obstacle_batch(&mut self, rng: &mut impl Rng) -> usize {
        let count = (self.grid.area() as f64 * OBSTACLE_DENSITY).floor() as usize;
        let center = self.grid.center();
        for _ in 0..count {
            let cell = random_free_cell(&self.grid, rng, |c| {
                self.is_occupied(c)
                    || (c.x - center.x).abs() < OBSTACLE_SAFE_RADIUS
                    || (c.y - center.y).abs() < OBSTACLE_SAFE_RADIUS
            });
            let id = self.take_id();
            self.obstacles.push(Obstacle { id, cell });
        }
        count
    }
}

pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, GameMode};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn level_is_derived_from_score() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(9), 1);
        assert_eq!(level_for_score(10), 2);
        assert_eq!(level_for_score(57), 6);
    }

    #[test]
    fn new_game_starts_at_rest_in_the_centre() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = GameState::new(Grid::new(20, 12), &Settings::default(), 42, &mut rng);
        assert_eq!(state.snake, vec![Cell::new(10, 6)]);
        assert_eq!(state.direction, None);
        assert_ne!(state.food, state.head());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.current_speed, 8.0);
        assert_eq!(state.high_score, 42);
    }

    #[test]
    fn obstacles_avoid_the_centre_cross() {
        let mut rng = StdRng::seed_from_u64(11);
        let settings = Settings {
            difficulty: Difficulty::Hard,
            mode: GameMode::Survival,
            ..Settings::default()
        };
        let state = GameState::new(Grid::new(20, 20), &settings, 0, &mut rng);
        assert_eq!(state.obstacles.len(), 20);
        let center = state.grid.center();
        for o in &state.obstacles {
            assert!((o.cell.x - center.x).abs() >= OBSTACLE_SAFE_RADIUS);
            assert!((o.cell.y - center.y).abs() >= OBSTACLE_SAFE_RADIUS);
        }
    }

    #[test]
    fn power_up_cap_is_enforced() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = GameState::new(Grid::new(15, 15), &Settings::default(), 0, &mut rng);
        for _ in 0..MAX_LIVE_POWER_UPS {
            assert!(state.spawn_power_up(0, &mut rng).is_some());
        }
        assert!(state.spawn_power_up(0, &mut rng).is_none());
        let mut ids: Vec<u32> = state.power_ups.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), MAX_LIVE_POWER_UPS);
    }
}
