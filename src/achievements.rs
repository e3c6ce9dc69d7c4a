//! Achievement catalog. Each entry latches once per game; unlocking only
//! produces a notification.

use serde::{Deserialize, Serialize};

/// Snake length for `GiantSnake`.
pub const GIANT_SNAKE_LENGTH: usize = 50;
/// Play time for `Survivor`, in milliseconds.
pub const SURVIVOR_MS: u64 = 300_000;
pub const COMBO_MASTER_STREAK: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    FirstFood,
    Century,
    HighScorer,
    SpeedDemon,
    ComboMaster,
    Perfectionist,
    Survivor,
    GiantSnake,
}

pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CATALOG: &[Achievement] = &[
    Achievement {
        id: AchievementId::FirstFood,
        name: "First Bite",
        description: "Eat your first food",
    },
    Achievement {
        id: AchievementId::Century,
        name: "Century",
        description: "Reach 100 points",
    },
    Achievement {
        id: AchievementId::HighScorer,
        name: "High Scorer",
        description: "Reach 500 points",
    },
    Achievement {
        id: AchievementId::SpeedDemon,
        name: "Speed Demon",
        description: "Reach double your starting speed",
    },
    Achievement {
        id: AchievementId::ComboMaster,
        name: "Combo Master",
        description: "Get a 10x combo",
    },
    Achievement {
        id: AchievementId::Perfectionist,
        name: "Perfectionist",
        description: "Pass 200 points without leaning on a shield",
    },
    Achievement {
        id: AchievementId::Survivor,
        name: "Survivor",
        description: "Survive for 5 minutes",
    },
    Achievement {
        id: AchievementId::GiantSnake,
        name: "Giant Snake",
        description: "Grow to 50 segments",
    },
];

/// Everything the predicates look at, gathered from the game state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Progress {
    pub score: u32,
    pub combo: u32,
    pub current_speed: f64,
    pub base_speed: f64,
    pub play_time_ms: u64,
    pub snake_length: usize,
    /// Collisions that a shield absorbed this game.
    pub shield_saves: u32,
}

impl AchievementId {
    pub fn info(self) -> &'static Achievement {
        CATALOG
            .iter()
            .find(|a| a.id == self)
            .unwrap_or(&CATALOG[0])
    }

    fn index(self) -> usize {
        CATALOG.iter().position(|a| a.id == self).unwrap_or(0)
    }

    pub fn is_met(self, p: &Progress) -> bool {
        match self {
            AchievementId::FirstFood => p.score > 0,
            AchievementId::Century => p.score >= 100,
            AchievementId::HighScorer => p.score >= 500,
            AchievementId::SpeedDemon => {
                p.base_speed > 0.0 && p.current_speed >= p.base_speed * 2.0
            }
            AchievementId::ComboMaster => p.combo >= COMBO_MASTER_STREAK,
            AchievementId::Perfectionist => p.score > 200 && p.shield_saves == 0,
            AchievementId::Survivor => p.play_time_ms >= SURVIVOR_MS,
            AchievementId::GiantSnake => p.snake_length >= GIANT_SNAKE_LENGTH,
        }
    }
}

/// Per-game unlock flags, one per catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
    unlocked: [bool; 8],
}

impl Achievements {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked[id.index()]
    }

    /// Latches `id`. Returns `false` if it was already unlocked.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        let flag = &mut self.unlocked[id.index()];
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    /// Unlocks every entry whose predicate now holds and returns the new ones
    /// in catalog order.
    pub fn evaluate(&mut self, progress: &Progress) -> Vec<AchievementId> {
        CATALOG
            .iter()
            .map(|a| a.id)
            .filter(|id| id.is_met(progress) && self.unlock(*id))
            .collect()
    }

    pub fn unlocked(&self) -> impl Iterator<Item = AchievementId> + '_ {
        CATALOG
            .iter()
            .map(|a| a.id)
            .filter(|id| self.is_unlocked(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_id() {
        assert_eq!(CATALOG.len(), 8);
        for (i, a) in CATALOG.iter().enumerate() {
            assert_eq!(a.id.index(), i);
        }
    }

    #[test]
    fn unlock_is_a_one_way_latch() {
        let mut achievements = Achievements::default();
        let progress = Progress {
            score: 1,
            base_speed: 8.0,
            current_speed: 8.0,
            snake_length: 2,
            ..Progress::default()
        };
        assert_eq!(achievements.evaluate(&progress), vec![AchievementId::FirstFood]);
        assert!(achievements.evaluate(&progress).is_empty());
        assert!(!achievements.unlock(AchievementId::FirstFood));
    }

    #[test]
    fn shield_saves_block_perfectionist() {
        let mut progress = Progress {
            score: 201,
            base_speed: 8.0,
            current_speed: 8.0,
            shield_saves: 1,
            ..Progress::default()
        };
        assert!(!AchievementId::Perfectionist.is_met(&progress));
        progress.shield_saves = 0;
        assert!(AchievementId::Perfectionist.is_met(&progress));
    }

    #[test]
    fn speed_demon_needs_double_base_speed() {
        let progress = Progress {
            base_speed: 8.0,
            current_speed: 15.5,
            ..Progress::default()
        };
        assert!(!AchievementId::SpeedDemon.is_met(&progress));
        assert!(AchievementId::SpeedDemon.is_met(&Progress {
            current_speed: 16.0,
            ..progress
        }));
    }

    #[test]
    fn zeroed_progress_unlocks_nothing() {
        let mut achievements = Achievements::default();
        assert!(!AchievementId::SpeedDemon.is_met(&Progress::default()));
        assert!(achievements.evaluate(&Progress::default()).is_empty());
    }
}
