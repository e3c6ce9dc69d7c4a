//! Snake arcade core: a fixed-timestep state machine with power-ups,
//! obstacles, combo scoring and achievements, independent of any renderer.

pub mod achievements;
pub mod config;
pub mod entities;
pub mod events;
pub mod game;
pub mod grid;
pub mod rules;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod storage;

pub use config::{Difficulty, GameMode, Settings};
pub use events::{Command, Cue, Event};
pub use game::{Game, Status};
pub use grid::{Cell, Direction, Grid};
pub use snapshot::Snapshot;
pub use storage::{GameStats, JsonStore, MemoryStore, ScoreStore};
