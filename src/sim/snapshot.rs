//! Read-only view of a match for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::catalog::{EnemyKind, PowerUpKind};
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub shielded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletView {
    pub id: u32,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub health: u8,
    /// True once the enemy has taken at least one hit
    pub damaged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub id: u32,
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplosionView {
    pub id: u32,
    pub pos: Vec2,
    /// 0.0 when created, 1.0 when about to expire
    pub progress: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub wave: u32,
    pub double_fire: bool,
    pub shield: bool,
    pub speed_boost: bool,
    pub player: PlayerView,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub power_ups: Vec<PowerUpView>,
    pub explosions: Vec<ExplosionView>,
}

impl GameState {
    /// Copy out the current frame
    pub fn snapshot(&self) -> Snapshot {
        let lifetime = self.tuning.explosion_lifetime_ms.max(1.0);
        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            wave: self.wave,
            double_fire: self.effects.double_fire(),
            shield: self.effects.shield(),
            speed_boost: self.effects.speed_boost(),
            player: PlayerView {
                pos: self.player.pos,
                shielded: self.effects.shield(),
            },
            bullets: self
                .bullets
                .iter()
                .map(|b| BulletView { id: b.id, pos: b.pos })
                .collect(),
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    kind: e.kind,
                    health: e.health,
                    damaged: e.health < e.kind.max_health(),
                })
                .collect(),
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    id: p.id,
                    pos: p.pos,
                    kind: p.kind,
                })
                .collect(),
            explosions: self
                .explosions
                .iter()
                .map(|x| ExplosionView {
                    id: x.id,
                    pos: x.pos,
                    progress: ((self.time_ms - x.created_ms) / lifetime).clamp(0.0, 1.0) as f32,
                })
                .collect(),
        }
    }
}
