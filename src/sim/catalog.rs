//! Static archetype tables for enemies and pickups

use serde::{Deserialize, Serialize};

/// Enemy archetypes, in spawn-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Boss,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Boss,
    ];

    /// Score awarded when destroyed
    pub fn points(&self) -> u64 {
        match self {
            EnemyKind::Basic => 100,
            EnemyKind::Fast => 150,
            EnemyKind::Tank => 300,
            EnemyKind::Boss => 500,
        }
    }

    /// Hits needed to destroy
    pub fn max_health(&self) -> u8 {
        match self {
            EnemyKind::Basic | EnemyKind::Fast => 1,
            EnemyKind::Tank => 2,
            EnemyKind::Boss => 3,
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        match self {
            EnemyKind::Basic => 1.0,
            EnemyKind::Fast => 1.5,
            EnemyKind::Tank => 0.7,
            EnemyKind::Boss => 0.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
            EnemyKind::Boss => "boss",
        }
    }
}

/// Power-up archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    DoubleFire,
    Shield,
    SpeedBoost,
    /// Instant +1 life, no timer
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::DoubleFire,
        PowerUpKind::Shield,
        PowerUpKind::SpeedBoost,
        PowerUpKind::ExtraLife,
    ];

    /// Effect duration in simulation milliseconds (0 = instant)
    pub fn duration_ms(&self) -> f64 {
        match self {
            PowerUpKind::DoubleFire => 10_000.0,
            PowerUpKind::Shield => 8_000.0,
            PowerUpKind::SpeedBoost => 8_000.0,
            PowerUpKind::ExtraLife => 0.0,
        }
    }

    pub fn is_timed(&self) -> bool {
        self.duration_ms() > 0.0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::DoubleFire => "doubleFire",
            PowerUpKind::Shield => "shield",
            PowerUpKind::SpeedBoost => "speedBoost",
            PowerUpKind::ExtraLife => "extraLife",
        }
    }
}
