//! The tick scheduler and game state machine.
//!
//! The host calls `frame` once per rendered frame with its clock. Queued
//! commands are applied first; a rules tick runs only when enough time has
//! passed for the current speed. `&mut self` keeps every mutation exclusive,
//! so a renderer can only observe the state between frames.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use rand::Rng;

use crate::config::Settings;
use crate::events::{Collision, Command, Event};
use crate::grid::Grid;
use crate::rules;
use crate::snapshot::Snapshot;
use crate::state::GameState;
use crate::storage::{GameStats, ScoreStore};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Frames counted over a rolling one-second window.
#[derive(Clone, Debug, Default)]
struct FpsCounter {
    frames: u32,
    window_start: u64,
    fps: u32,
}

impl FpsCounter {
    fn record(&mut self, now_ms: u64) {
        self.frames += 1;
        if now_ms.saturating_sub(self.window_start) >= 1000 {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = now_ms;
        }
    }
}

pub struct Game<S: ScoreStore> {
    settings: Settings,
    grid: Grid,
    status: Status,
    state: GameState,
    commands: VecDeque<Command>,
    store: S,
    last_update: u64,
    fps: FpsCounter,
}

impl<S: ScoreStore> Game<S> {
    /// A game sitting in the menu. Nothing moves until `Command::Start`.
    pub fn new(settings: Settings, grid: Grid, store: S, rng: &mut impl Rng) -> Self {
        let state = GameState::new(grid, &settings, store.read_high_score(), rng);
        Self {
            settings,
            grid,
            status: Status::Menu,
            state,
            commands: VecDeque::new(),
            store,
            last_update: 0,
            fps: FpsCounter::default(),
        }
    }

    /// Resumes play from an existing state, e.g. a prepared scenario.
    pub fn from_state(settings: Settings, state: GameState, store: S, now_ms: u64) -> Self {
        Self {
            settings,
            grid: state.grid,
            status: Status::Playing,
            state,
            commands: VecDeque::new(),
            store,
            last_update: now_ms,
            fps: FpsCounter {
                window_start: now_ms,
                ..FpsCounter::default()
            },
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings can only change while no game is running.
    pub fn settings_mut(&mut self) -> Option<&mut Settings> {
        match self.status {
            Status::Menu | Status::GameOver => Some(&mut self.settings),
            Status::Playing | Status::Paused => None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Board used by the next game started. The running game keeps its own.
    pub fn resize(&mut self, grid: Grid) {
        self.grid = grid;
    }

    pub fn push_command(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.state, &self.settings, self.status, self.fps.fps)
    }

    /// Per-frame entry point: applies queued commands, then ticks if the
    /// speed gate allows.
    pub fn frame(&mut self, now_ms: u64, rng: &mut impl Rng) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(command) = self.commands.pop_front() {
            self.apply(command, now_ms, rng, &mut events);
        }
        self.fps.record(now_ms);

        if self.status != Status::Playing {
            return events;
        }
        let elapsed = now_ms.saturating_sub(self.last_update);
        if (elapsed as f64) < 1000.0 / self.state.current_speed {
            return events;
        }
        self.last_update = now_ms;

        let outcome = rules::tick(&mut self.state, &self.settings, elapsed, now_ms, rng);
        events.extend(outcome.events);
        if let Some(cause) = outcome.fatal {
            self.game_over(cause, &mut events);
        }
        events
    }

    fn apply(&mut self, command: Command, now_ms: u64, rng: &mut impl Rng, events: &mut Vec<Event>) {
        match (command, self.status) {
            (Command::Start, Status::Menu | Status::GameOver)
            | (Command::Restart, Status::Playing | Status::Paused | Status::GameOver) => {
                self.start(now_ms, rng);
                events.push(Event::Started);
            }
            (Command::Turn(direction), Status::Playing) => {
                rules::turn(&mut self.state, direction);
            }
            (Command::Activate(kind), Status::Playing) => {
                if let Some(event) = rules::activate(&mut self.state, kind) {
                    events.push(event);
                }
            }
            (Command::TogglePause | Command::Escape, Status::Playing) => {
                self.status = Status::Paused;
                events.push(Event::Paused);
            }
            (Command::TogglePause, Status::Paused) => {
                self.status = Status::Playing;
                self.state.waiting_for_movement = true;
                self.last_update = now_ms;
                events.push(Event::Resumed);
            }
            (Command::Escape, Status::Paused | Status::GameOver) => {
                self.status = Status::Menu;
                events.push(Event::ReturnedToMenu);
            }
            _ => {}
        }
    }

    fn start(&mut self, now_ms: u64, rng: &mut impl Rng) {
        self.state = GameState::new(self.grid, &self.settings, self.store.read_high_score(), rng);
        self.status = Status::Playing;
        self.last_update = now_ms;
        info!(
            "new game: {} / {} on {}x{}",
            self.settings.difficulty, self.settings.mode, self.grid.columns, self.grid.rows
        );
    }

    fn game_over(&mut self, cause: Collision, events: &mut Vec<Event>) {
        self.status = Status::GameOver;
        let state = &self.state;
        let stats = GameStats {
            score: state.score,
            level: state.level(),
            max_combo: state.max_combo,
            duration_ms: state.play_time_ms,
            difficulty: self.settings.difficulty,
            mode: self.settings.mode,
            snake_length: state.snake.len(),
            timestamp: unix_millis(),
        };
        info!(
            "game over ({cause:?}): score {} level {} after {} ms",
            stats.score, stats.level, stats.duration_ms
        );

        let new_record = stats.score > self.store.read_high_score();
        if new_record {
            if let Err(err) = self.store.write_high_score(stats.score) {
                warn!("could not save high score: {err}");
            }
        }
        if let Err(err) = self.store.append_game_stats(stats.clone()) {
            warn!("could not save game stats: {err}");
        }
        events.push(Event::GameOver {
            cause,
            stats,
            new_record,
        });
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
