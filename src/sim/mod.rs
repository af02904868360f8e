//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulation clock advanced only by the step function
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use catalog::{EnemyKind, PowerUpKind};
pub use collision::{Rect, clamp, random_between};
pub use snapshot::Snapshot;
pub use spawn::{enemy_weights, roll_power_up_drop, select_enemy_kind, spawn_enemy};
pub use state::{
    ActiveEffects, Bullet, Enemy, Explosion, GameEvent, GameOverNotice, GamePhase, GameState,
    IdAllocator, Player, PowerUp,
};
pub use tick::{TickInput, tick};
