//! Data-driven game balance
//!
//! Every gameplay number the simulation uses lives here so a build can ship
//! alternative balance as JSON without touching the step code.

use serde::{Deserialize, Serialize};

/// Balance knobs for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal move per frame (units)
    pub player_speed: f32,
    /// Multiplier applied to `player_speed` while speed-boost is active
    pub speed_boost_multiplier: f32,
    pub starting_lives: u8,
    pub max_lives: u8,

    // === Weapons ===
    /// Upward bullet travel per frame (units)
    pub bullet_speed: f32,
    pub max_bullets: usize,
    pub fire_cooldown_ms: f64,
    pub double_fire_cooldown_ms: f64,
    /// Horizontal offset of each double-fire bullet from the ship center
    pub double_fire_spread: f32,

    // === Enemies ===
    /// Descent per frame before archetype and wave scaling
    pub enemy_base_speed: f32,
    /// Extra speed fraction per wave (speed * (1 + wave * this))
    pub enemy_speed_per_wave: f32,
    pub spawn_interval_base_ms: f64,
    pub spawn_interval_step_ms: f64,
    pub spawn_interval_floor_ms: f64,

    // === Waves ===
    pub wave_threshold_base: u32,
    pub wave_threshold_per_wave: u32,

    // === Power-ups ===
    /// Chance that a destroyed enemy drops a pickup
    pub drop_chance: f64,
    /// Pickup descent per frame
    pub powerup_fall_speed: f32,

    // === Effects ===
    pub explosion_lifetime_ms: f64,
    /// Grace period between the final hit and the game-over notice
    pub game_over_delay_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 8.0,
            speed_boost_multiplier: 1.5,
            starting_lives: 3,
            max_lives: 5,

            bullet_speed: 12.0,
            max_bullets: 5,
            fire_cooldown_ms: 200.0,
            double_fire_cooldown_ms: 100.0,
            double_fire_spread: 10.0,

            enemy_base_speed: 2.0,
            enemy_speed_per_wave: 0.1,
            spawn_interval_base_ms: 1500.0,
            spawn_interval_step_ms: 100.0,
            spawn_interval_floor_ms: 500.0,

            wave_threshold_base: 10,
            wave_threshold_per_wave: 5,

            drop_chance: 0.15,
            powerup_fall_speed: 2.0,

            explosion_lifetime_ms: 300.0,
            game_over_delay_ms: 500.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults and
    /// out-of-range values are sanitized
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Parse tuning, falling back to the defaults on malformed JSON
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Clamp every knob into a range the simulation can run with.
    ///
    /// Non-finite or negative speeds and times fall back to their defaults.
    /// A match always starts with at least one life and room for one bullet.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let speed = |v: f32, default: f32| if v.is_finite() && v >= 0.0 { v } else { default };
        let time = |v: f64, default: f64| if v.is_finite() && v >= 0.0 { v } else { default };

        let max_lives = self.max_lives.max(1);
        Self {
            player_speed: speed(self.player_speed, defaults.player_speed),
            speed_boost_multiplier: speed(
                self.speed_boost_multiplier,
                defaults.speed_boost_multiplier,
            ),
            starting_lives: self.starting_lives.clamp(1, max_lives),
            max_lives,

            bullet_speed: speed(self.bullet_speed, defaults.bullet_speed),
            max_bullets: self.max_bullets.max(1),
            fire_cooldown_ms: time(self.fire_cooldown_ms, defaults.fire_cooldown_ms),
            double_fire_cooldown_ms: time(
                self.double_fire_cooldown_ms,
                defaults.double_fire_cooldown_ms,
            ),
            double_fire_spread: speed(self.double_fire_spread, defaults.double_fire_spread),

            enemy_base_speed: speed(self.enemy_base_speed, defaults.enemy_base_speed),
            enemy_speed_per_wave: speed(self.enemy_speed_per_wave, defaults.enemy_speed_per_wave),
            spawn_interval_base_ms: time(
                self.spawn_interval_base_ms,
                defaults.spawn_interval_base_ms,
            ),
            spawn_interval_step_ms: time(
                self.spawn_interval_step_ms,
                defaults.spawn_interval_step_ms,
            ),
            spawn_interval_floor_ms: time(
                self.spawn_interval_floor_ms,
                defaults.spawn_interval_floor_ms,
            ),

            wave_threshold_base: self.wave_threshold_base,
            wave_threshold_per_wave: self.wave_threshold_per_wave,

            drop_chance: if self.drop_chance.is_nan() {
                defaults.drop_chance
            } else {
                self.drop_chance.clamp(0.0, 1.0)
            },
            powerup_fall_speed: speed(self.powerup_fall_speed, defaults.powerup_fall_speed),

            explosion_lifetime_ms: time(
                self.explosion_lifetime_ms,
                defaults.explosion_lifetime_ms,
            ),
            game_over_delay_ms: time(self.game_over_delay_ms, defaults.game_over_delay_ms),
        }
    }

    /// Player speed for this frame
    pub fn player_speed(&self, speed_boost: bool) -> f32 {
        if speed_boost {
            self.player_speed * self.speed_boost_multiplier
        } else {
            self.player_speed
        }
    }

    /// Minimum time between two fire actions
    pub fn fire_cooldown(&self, double_fire: bool) -> f64 {
        if double_fire {
            self.double_fire_cooldown_ms
        } else {
            self.fire_cooldown_ms
        }
    }

    /// Time between enemy spawns; tightens each wave down to the floor
    pub fn spawn_interval_ms(&self, wave: u32) -> f64 {
        (self.spawn_interval_base_ms - self.spawn_interval_step_ms * wave as f64)
            .max(self.spawn_interval_floor_ms)
    }

    /// Defeats needed in `wave` before the next wave starts
    pub fn wave_threshold(&self, wave: u32) -> u32 {
        self.wave_threshold_per_wave
            .saturating_mul(wave)
            .saturating_add(self.wave_threshold_base)
    }

    /// Wave-scaled speed factor shared by all archetypes
    pub fn wave_speed_factor(&self, wave: u32) -> f32 {
        1.0 + wave as f32 * self.enemy_speed_per_wave
    }
}
