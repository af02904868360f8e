//! Game state and core simulation types
//!
//! All authoritative match state lives here. Collaborators read it through
//! [`GameState::snapshot`] and never mutate entities directly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::catalog::{EnemyKind, PowerUpKind};
use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen; resumes from the exact same state
    Paused,
    /// Lives ran out (terminal)
    GameOver,
}

/// The player's ship. Only `x` moves; `y` is fixed for the whole match.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(GAME_WIDTH / 2.0 - PLAYER_WIDTH / 2.0, PLAYER_Y),
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + PLAYER_WIDTH / 2.0
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// A descending enemy
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub health: u8,
    /// Descent per frame, fixed at spawn time
    pub speed: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}

/// A falling power-up pickup
#[derive(Debug, Clone, Serialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, POWERUP_SIZE, POWERUP_SIZE)
    }
}

/// Purely visual burst; expires after `Tuning::explosion_lifetime_ms`
#[derive(Debug, Clone, Serialize)]
pub struct Explosion {
    pub id: u32,
    /// Center of the burst
    pub pos: Vec2,
    /// Simulation time of creation
    pub created_ms: f64,
}

/// Deadlines of the timed power-ups, in simulation milliseconds
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActiveEffects {
    pub double_fire_until: Option<f64>,
    pub shield_until: Option<f64>,
    pub speed_boost_until: Option<f64>,
}

impl ActiveEffects {
    fn slot(&self, kind: PowerUpKind) -> Option<f64> {
        match kind {
            PowerUpKind::DoubleFire => self.double_fire_until,
            PowerUpKind::Shield => self.shield_until,
            PowerUpKind::SpeedBoost => self.speed_boost_until,
            PowerUpKind::ExtraLife => None,
        }
    }

    fn slot_mut(&mut self, kind: PowerUpKind) -> Option<&mut Option<f64>> {
        match kind {
            PowerUpKind::DoubleFire => Some(&mut self.double_fire_until),
            PowerUpKind::Shield => Some(&mut self.shield_until),
            PowerUpKind::SpeedBoost => Some(&mut self.speed_boost_until),
            PowerUpKind::ExtraLife => None,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.slot(kind).is_some()
    }

    pub fn double_fire(&self) -> bool {
        self.is_active(PowerUpKind::DoubleFire)
    }

    pub fn shield(&self) -> bool {
        self.is_active(PowerUpKind::Shield)
    }

    pub fn speed_boost(&self) -> bool {
        self.is_active(PowerUpKind::SpeedBoost)
    }

    /// Start (or restart) a timed effect. A repeat pickup replaces the deadline.
    pub fn activate(&mut self, kind: PowerUpKind, now_ms: f64) {
        if let Some(slot) = self.slot_mut(kind) {
            *slot = Some(now_ms + kind.duration_ms());
        }
    }

    /// Remaining time of an effect, if active
    pub fn remaining_ms(&self, kind: PowerUpKind, now_ms: f64) -> Option<f64> {
        self.slot(kind).map(|deadline| (deadline - now_ms).max(0.0))
    }

    /// Clear every effect whose deadline has passed
    pub fn expire(&mut self, now_ms: f64) {
        for slot in [
            &mut self.double_fire_until,
            &mut self.shield_until,
            &mut self.speed_boost_until,
        ] {
            if slot.is_some_and(|deadline| now_ms >= deadline) {
                *slot = None;
            }
        }
    }
}

/// Monotonic entity id source, owned by one match
#[derive(Debug, Clone, Serialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Start numbering from 1 again (match restart only)
    pub fn reset(&mut self) {
        self.next = 1;
    }
}

/// Discrete things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Player fired (one event per volley)
    Shot,
    /// Enemy took damage but survived
    EnemyHit { id: u32 },
    EnemyDestroyed { id: u32, kind: EnemyKind, points: u64 },
    /// An explosion was emitted
    Explosion { pos: Vec2 },
    PowerUpCollected { kind: PowerUpKind },
    PlayerDamaged { lives: u8 },
    WaveAdvanced { wave: u32 },
    GameOver { score: u64 },
}

/// Deferred game-over report, counted down by the scheduler
#[derive(Debug, Clone, Serialize)]
pub struct GameOverNotice {
    pub remaining_ms: f64,
    pub delivered: bool,
}

/// Complete match state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance for this match
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Score (never decreases)
    pub score: u64,
    /// Player lives, kept within [0, tuning.max_lives]
    pub lives: u8,
    /// Current wave (1-based, never decreases)
    pub wave: u32,
    /// Enemies defeated since the wave started
    pub defeated_in_wave: u32,
    /// Simulation clock; only advances while the match is stepping
    pub time_ms: f64,
    /// Time of the last volley (None = never fired)
    pub last_shot_ms: Option<f64>,
    pub last_spawn_ms: f64,
    pub player: Player,
    /// Entity collections, in creation order
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub effects: ActiveEffects,
    /// Set once, when lives reach zero
    pub game_over: Option<GameOverNotice>,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    ids: IdAllocator,
}

impl GameState {
    /// Create a new match with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new match with the given balance (sanitized first)
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            lives: tuning.starting_lives.min(tuning.max_lives),
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            wave: 1,
            defeated_in_wave: 0,
            time_ms: 0.0,
            last_shot_ms: None,
            last_spawn_ms: 0.0,
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            explosions: Vec::new(),
            effects: ActiveEffects::default(),
            game_over: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            ids: IdAllocator::default(),
        }
    }

    /// Reset to a fresh match, keeping the tuning
    pub fn restart(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        let mut ids = std::mem::take(&mut self.ids);
        ids.reset();
        *self = Self {
            ids,
            ..Self::with_tuning(seed, tuning)
        };
        log::info!("Match restarted with seed: {}", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.allocate()
    }

    /// Match still in progress (playing or paused)
    pub fn is_running(&self) -> bool {
        self.phase != GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Flip between playing and paused. No effect once the match is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn spawn_explosion(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        self.explosions.push(Explosion {
            id,
            pos,
            created_ms: self.time_ms,
        });
        self.events.push(GameEvent::Explosion { pos });
    }

    /// Apply one hit to the player.
    ///
    /// Absorbed entirely by an active shield. `explosion_at` is emitted only
    /// when the hit lands.
    pub fn damage_player(&mut self, explosion_at: Option<Vec2>) {
        if self.effects.shield() || !self.is_running() {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::PlayerDamaged { lives: self.lives });
        if let Some(pos) = explosion_at {
            self.spawn_explosion(pos);
        }

        if self.lives == 0 {
            self.end_match();
        }
    }

    /// Terminal transition; idempotent
    fn end_match(&mut self) {
        if self.game_over.is_some() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over = Some(GameOverNotice {
            remaining_ms: self.tuning.game_over_delay_ms,
            delivered: false,
        });
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over at wave {} with score {}", self.wave, self.score);
    }

    /// Apply a collected pickup
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        if kind.is_timed() {
            self.effects.activate(kind, self.time_ms);
        } else {
            self.lives = self.lives.saturating_add(1).min(self.tuning.max_lives);
        }
        self.events.push(GameEvent::PowerUpCollected { kind });
    }

    /// Count down the pending game-over notice by `elapsed_ms`.
    ///
    /// Returns the final score exactly once, when the grace delay has run out.
    pub fn poll_game_over(&mut self, elapsed_ms: f64) -> Option<u64> {
        let notice = self.game_over.as_mut()?;
        if notice.delivered {
            return None;
        }
        notice.remaining_ms -= elapsed_ms.max(0.0);
        if notice.remaining_ms > 0.0 {
            return None;
        }
        notice.delivered = true;
        Some(self.score)
    }
}
