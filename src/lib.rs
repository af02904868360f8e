//! Star Volley - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, power-ups)
//! - `scheduler`: Frame-driven adapter that steps the simulation
//! - `platform`: Keyboard/touch input normalization
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `session`: Menu -> play -> game over lifecycle
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use scheduler::{Frame, Scheduler};
pub use session::{Screen, Session};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical play-field dimensions
    pub const GAME_WIDTH: f32 = 480.0;
    pub const GAME_HEIGHT: f32 = 640.0;

    /// Player ship size; the ship sits 20 units above the bottom edge
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;

    pub const ENEMY_WIDTH: f32 = 36.0;
    pub const ENEMY_HEIGHT: f32 = 36.0;

    /// Power-up pickups are square
    pub const POWERUP_SIZE: f32 = 30.0;

    /// Nominal frame length (60 Hz) in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Longest frame the scheduler will feed the simulation
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Fixed vertical position of the player ship
    pub const PLAYER_Y: f32 = GAME_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN;
}
