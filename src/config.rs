//! Difficulty and mode tables plus the player-facing toggles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DifficultySettings {
    /// Ticks per second at the start of a game.
    pub base_speed: f64,
    /// Added to the tick rate every time food is eaten.
    pub speed_increase: f64,
    pub obstacles: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ModeSettings {
    pub power_ups: bool,
    pub obstacles: bool,
    pub time_limited: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                base_speed: 6.0,
                speed_increase: 0.3,
                obstacles: false,
            },
            Difficulty::Medium => DifficultySettings {
                base_speed: 8.0,
                speed_increase: 0.5,
                obstacles: false,
            },
            Difficulty::Hard => DifficultySettings {
                base_speed: 12.0,
                speed_increase: 0.8,
                obstacles: true,
            },
            Difficulty::Expert => DifficultySettings {
                base_speed: 16.0,
                speed_increase: 1.2,
                obstacles: true,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    pub fn next(self) -> Difficulty {
        let i = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Difficulty {
        let i = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Modern,
    Survival,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Modern, GameMode::Survival];

    pub fn settings(self) -> ModeSettings {
        match self {
            GameMode::Classic => ModeSettings {
                power_ups: false,
                obstacles: false,
                time_limited: false,
            },
            GameMode::Modern => ModeSettings {
                power_ups: true,
                obstacles: false,
                time_limited: false,
            },
            GameMode::Survival => ModeSettings {
                power_ups: true,
                obstacles: true,
                time_limited: true,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Modern => "modern",
            GameMode::Survival => "survival",
        }
    }

    pub fn next(self) -> GameMode {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> GameMode {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct ParseSettingError {
    kind: &'static str,
    value: String,
}

impl FromStr for Difficulty {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSettingError {
                kind: "difficulty",
                value: s.to_string(),
            })
    }
}

impl FromStr for GameMode {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSettingError {
                kind: "game mode",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the player can choose before a game. Persisted in the save file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub mode: GameMode,
    /// `true`: leaving the board is fatal. `false`: the board wraps.
    pub wall_collision: bool,
    pub sound_enabled: bool,
    pub power_ups_enabled: bool,
    pub show_fps: bool,
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            mode: GameMode::Classic,
            wall_collision: true,
            sound_enabled: true,
            power_ups_enabled: true,
            show_fps: false,
            volume: 1.0,
        }
    }
}

impl Settings {
    /// Power-ups spawn only when both the mode and the player allow them.
    pub fn power_ups_active(&self) -> bool {
        self.mode.settings().power_ups && self.power_ups_enabled
    }

    pub fn obstacles_active(&self) -> bool {
        self.mode.settings().obstacles || self.difficulty.settings().obstacles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("survival".parse::<GameMode>(), Ok(GameMode::Survival));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn cycling_wraps_around() {
        assert_eq!(Difficulty::Expert.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.previous(), Difficulty::Expert);
        assert_eq!(GameMode::Survival.next(), GameMode::Classic);
    }

    #[test]
    fn obstacles_come_from_mode_or_difficulty() {
        let mut settings = Settings::default();
        assert!(!settings.obstacles_active());
        settings.difficulty = Difficulty::Hard;
        assert!(settings.obstacles_active());
        settings.difficulty = Difficulty::Easy;
        settings.mode = GameMode::Survival;
        assert!(settings.obstacles_active());
    }

    #[test]
    fn classic_mode_never_spawns_power_ups() {
        let settings = Settings::default();
        assert!(!settings.power_ups_active());
        let modern = Settings {
            mode: GameMode::Modern,
            ..Settings::default()
        };
        assert!(modern.power_ups_active());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"difficulty":"expert"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Expert);
        assert!(settings.wall_collision);
        assert_eq!(settings.volume, 1.0);
    }
}
