//! Messages crossing the core boundary: `Command`s flow in from input
//! handling, `Event`s flow out to rendering and audio.

use crate::achievements::AchievementId;
use crate::entities::{EffectKind, PowerUpKind};
use crate::grid::{Cell, Direction};
use crate::storage::GameStats;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    /// Switches between playing and paused.
    TogglePause,
    /// Pauses a running game; from pause or game over, goes back to the menu.
    Escape,
    Restart,
    /// Starts a game from the menu or the game-over screen.
    Start,
    Activate(EffectKind),
}

/// Why a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
    Obstacle,
}

/// Audio cues. The core never touches playback; it only names the sound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Eat,
    Move,
    GameOver,
    Combo,
    Achievement,
    PowerUpCollect,
    PowerUpActivate,
    LevelUp,
}

impl Cue {
    pub const ALL: [Cue; 8] = [
        Cue::Eat,
        Cue::Move,
        Cue::GameOver,
        Cue::Combo,
        Cue::Achievement,
        Cue::PowerUpCollect,
        Cue::PowerUpActivate,
        Cue::LevelUp,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Started,
    Paused,
    Resumed,
    ReturnedToMenu,
    Moved { head: Cell },
    FoodEaten { cell: Cell, points: u32, combo: u32 },
    /// Combo reached a streak worth celebrating.
    ComboStreak(u32),
    FoodRespawned(Cell),
    PowerUpSpawned { id: u32, kind: PowerUpKind, cell: Cell },
    PowerUpExpired { id: u32 },
    PowerUpCollected { id: u32, kind: PowerUpKind, cell: Cell },
    EffectActivated(EffectKind),
    EffectExpired(EffectKind),
    ObstaclesSpawned(usize),
    LevelUp { level: u32 },
    AchievementUnlocked(AchievementId),
    /// Fired once per game, the first time the score passes the stored best.
    NewHighScore(u32),
    GameOver {
        cause: Collision,
        stats: GameStats,
        new_record: bool,
    },
}

impl Event {
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Event::Moved { .. } => Some(Cue::Move),
            Event::FoodEaten { .. } => Some(Cue::Eat),
            Event::ComboStreak(_) => Some(Cue::Combo),
            Event::PowerUpCollected { .. } => Some(Cue::PowerUpCollect),
            Event::EffectActivated(_) => Some(Cue::PowerUpActivate),
            Event::LevelUp { .. } => Some(Cue::LevelUp),
            Event::AchievementUnlocked(_) => Some(Cue::Achievement),
            Event::GameOver { .. } => Some(Cue::GameOver),
            _ => None,
        }
    }
}
