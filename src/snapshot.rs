//! Read-only view handed to renderers.

use crate::achievements::AchievementId;
use crate::config::Settings;
use crate::entities::{Effects, Inventory, Obstacle, PowerUp};
use crate::game::Status;
use crate::grid::{Cell, Direction, Grid};
use crate::state::GameState;

pub struct Snapshot<'a> {
    pub status: Status,
    pub grid: Grid,
    pub snake: &'a [Cell],
    /// Where the head points, for orienting its sprite.
    pub heading: Option<Direction>,
    pub food: Cell,
    pub power_ups: &'a [PowerUp],
    pub obstacles: &'a [Obstacle],
    pub effects: Effects,
    pub inventory: Inventory,
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub level: u32,
    pub high_score: u32,
    pub new_record: bool,
    pub current_speed: f64,
    pub play_time_ms: u64,
    pub time_limited: bool,
    pub fps: Option<u32>,
    pub moving: bool,
    pub achievements: Vec<AchievementId>,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(state: &'a GameState, settings: &Settings, status: Status, fps: u32) -> Self {
        Self {
            status,
            grid: state.grid,
            snake: &state.snake,
            heading: state.direction,
            food: state.food,
            power_ups: &state.power_ups,
            obstacles: &state.obstacles,
            effects: state.effects,
            inventory: state.inventory,
            score: state.score,
            combo: state.combo,
            max_combo: state.max_combo,
            level: state.level(),
            high_score: state.high_score.max(state.score),
            new_record: state.new_record,
            current_speed: state.current_speed,
            play_time_ms: state.play_time_ms,
            time_limited: settings.mode.settings().time_limited,
            fps: settings.show_fps.then_some(fps),
            moving: state.moving && !state.waiting_for_movement,
            achievements: state.achievements.unlocked().collect(),
        }
    }
}
