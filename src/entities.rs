//! Game entity types: plain records keyed by stable ids. Renderers map
//! them to visuals on their own.

use serde::{Deserialize, Serialize};

use crate::grid::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    Shield,
    Freeze,
    /// Collected for an immediate burst of food respawns instead of banking.
    MultiFood,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::Shield,
        PowerUpKind::Freeze,
        PowerUpKind::MultiFood,
    ];

    /// The effect this kind banks into the inventory, if any.
    pub fn banked_effect(self) -> Option<EffectKind> {
        match self {
            PowerUpKind::SpeedBoost => Some(EffectKind::SpeedBoost),
            PowerUpKind::Shield => Some(EffectKind::Shield),
            PowerUpKind::Freeze => Some(EffectKind::Freeze),
            PowerUpKind::MultiFood => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "speed boost",
            PowerUpKind::Shield => "shield",
            PowerUpKind::Freeze => "freeze",
            PowerUpKind::MultiFood => "multi food",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub cell: Cell,
    pub kind: PowerUpKind,
    /// Game clock (ms) at which it appeared.
    pub spawned_at: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub cell: Cell,
}

// ── Timed effects ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    SpeedBoost,
    Shield,
    Freeze,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [EffectKind::SpeedBoost, EffectKind::Shield, EffectKind::Freeze];

    /// Multiplier applied to the tick rate on activation.
    pub fn speed_factor(self) -> Option<f64> {
        match self {
            EffectKind::SpeedBoost => Some(1.5),
            EffectKind::Freeze => Some(0.5),
            EffectKind::Shield => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EffectKind::SpeedBoost => "speed boost",
            EffectKind::Shield => "shield",
            EffectKind::Freeze => "freeze",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub active: bool,
    pub remaining_ms: u64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    pub speed_boost: Effect,
    pub shield: Effect,
    pub freeze: Effect,
}

impl Effects {
    pub fn get(&self, kind: EffectKind) -> &Effect {
        match kind {
            EffectKind::SpeedBoost => &self.speed_boost,
            EffectKind::Shield => &self.shield,
            EffectKind::Freeze => &self.freeze,
        }
    }

    pub fn get_mut(&mut self, kind: EffectKind) -> &mut Effect {
        match kind {
            EffectKind::SpeedBoost => &mut self.speed_boost,
            EffectKind::Shield => &mut self.shield,
            EffectKind::Freeze => &mut self.freeze,
        }
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.get(kind).active
    }
}

/// Banked power-ups waiting for the player to activate them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub speed_boost: u32,
    pub shield: u32,
    pub freeze: u32,
}

impl Inventory {
    pub fn count(&self, kind: EffectKind) -> u32 {
        match kind {
            EffectKind::SpeedBoost => self.speed_boost,
            EffectKind::Shield => self.shield,
            EffectKind::Freeze => self.freeze,
        }
    }

    pub fn count_mut(&mut self, kind: EffectKind) -> &mut u32 {
        match kind {
            EffectKind::SpeedBoost => &mut self.speed_boost,
            EffectKind::Shield => &mut self.shield,
            EffectKind::Freeze => &mut self.freeze,
        }
    }
}
