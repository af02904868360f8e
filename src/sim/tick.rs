//! Per-frame simulation step
//!
//! One call advances the match by one frame. The stages run in a fixed
//! order and each stage takes its collections by value and hands back new
//! ones, so a later stage only ever sees the finished output of the earlier
//! ones.

use glam::Vec2;

use super::spawn::{roll_power_up_drop, spawn_due, spawn_enemy};
use super::state::{Bullet, Enemy, Explosion, GameEvent, GamePhase, GameState, PowerUp};
use crate::consts::*;
use crate::sim::collision::clamp;

/// Normalized player intents for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held
    pub move_left: bool,
    /// Held
    pub move_right: bool,
    /// Held; fires whenever the cooldown allows
    pub fire: bool,
    /// Edge: toggle pause (handled by the scheduler)
    pub pause: bool,
    /// Edge: toggle mute (handled by the session)
    pub mute: bool,
}

/// Advance the game state by one frame of `dt_ms` simulation milliseconds.
///
/// Does nothing unless the match is playing.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    state.time_ms += dt_ms;
    state.effects.expire(state.time_ms);

    move_player(state, input);
    fire(state, input);

    let bullets = std::mem::take(&mut state.bullets);
    state.bullets = advance_bullets(bullets, state.tuning.bullet_speed);

    if spawn_due(state) {
        let enemy = spawn_enemy(state);
        state.enemies.push(enemy);
        state.last_spawn_ms = state.time_ms;
    }
    let enemies = std::mem::take(&mut state.enemies);
    state.enemies = advance_enemies(enemies);

    let power_ups = std::mem::take(&mut state.power_ups);
    state.power_ups = advance_power_ups(power_ups, state.tuning.powerup_fall_speed);

    let explosions = std::mem::take(&mut state.explosions);
    state.explosions = expire_explosions(
        explosions,
        state.time_ms,
        state.tuning.explosion_lifetime_ms,
    );

    resolve_bullet_hits(state);
    advance_wave(state);

    resolve_player_collisions(state);
    if !state.is_running() {
        return;
    }

    collect_power_ups(state);
    resolve_escaped_enemies(state);
}

/// Stage 1: horizontal movement, clamped to the field
fn move_player(state: &mut GameState, input: &TickInput) {
    let speed = state.tuning.player_speed(state.effects.speed_boost());
    let max_x = GAME_WIDTH - PLAYER_WIDTH;

    if input.move_left {
        state.player.pos.x = clamp(state.player.pos.x - speed, 0.0, max_x);
    }
    if input.move_right {
        state.player.pos.x = clamp(state.player.pos.x + speed, 0.0, max_x);
    }
}

/// Stage 2: fire a volley if the cooldown has elapsed and there is room
fn fire(state: &mut GameState, input: &TickInput) {
    if !input.fire {
        return;
    }

    let double_fire = state.effects.double_fire();
    let cooldown = state.tuning.fire_cooldown(double_fire);
    if state
        .last_shot_ms
        .is_some_and(|last| state.time_ms - last < cooldown)
    {
        return;
    }

    let capacity = state.tuning.max_bullets.saturating_sub(state.bullets.len());
    if capacity == 0 {
        return;
    }

    let spread = state.tuning.double_fire_spread;
    let offsets = if double_fire {
        [Some(-spread), Some(spread)]
    } else {
        [Some(0.0), None]
    };
    let x = state.player.center_x() - BULLET_WIDTH / 2.0;
    let y = state.player.pos.y;

    for offset in offsets.into_iter().flatten().take(capacity) {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(x + offset, y),
        });
    }
    state.last_shot_ms = Some(state.time_ms);
    state.events.push(GameEvent::Shot);
}

/// Stage 3: bullets fly up and vanish once fully above the field
fn advance_bullets(bullets: Vec<Bullet>, speed: f32) -> Vec<Bullet> {
    bullets
        .into_iter()
        .map(|mut bullet| {
            bullet.pos.y -= speed;
            bullet
        })
        .filter(|bullet| bullet.pos.y >= -BULLET_HEIGHT)
        .collect()
}

/// Stage 4: enemies descend. Escapes are handled by the bottom pass.
fn advance_enemies(enemies: Vec<Enemy>) -> Vec<Enemy> {
    enemies
        .into_iter()
        .map(|mut enemy| {
            enemy.pos.y += enemy.speed;
            enemy
        })
        .collect()
}

/// Stage 5: pickups fall and are lost off the bottom
fn advance_power_ups(power_ups: Vec<PowerUp>, fall_speed: f32) -> Vec<PowerUp> {
    power_ups
        .into_iter()
        .map(|mut power_up| {
            power_up.pos.y += fall_speed;
            power_up
        })
        .filter(|power_up| power_up.pos.y < GAME_HEIGHT + POWERUP_SIZE)
        .collect()
}

/// Stage 6
fn expire_explosions(explosions: Vec<Explosion>, now_ms: f64, lifetime_ms: f64) -> Vec<Explosion> {
    explosions
        .into_iter()
        .filter(|explosion| now_ms - explosion.created_ms < lifetime_ms)
        .collect()
}

/// Result of matching bullets against enemies
struct HitOutcome {
    bullets: Vec<Bullet>,
    enemies: Vec<Enemy>,
    /// Enemies that took damage but survived
    damaged: Vec<u32>,
    /// Enemies whose health reached zero, in defeat order
    destroyed: Vec<Enemy>,
}

/// Each bullet hits at most the first overlapping enemy (creation order) and
/// is consumed by the hit.
fn match_bullets(bullets: Vec<Bullet>, mut enemies: Vec<Enemy>) -> HitOutcome {
    let mut surviving = Vec::with_capacity(bullets.len());
    let mut damaged = Vec::new();
    let mut destroyed = Vec::new();

    for bullet in bullets {
        let bullet_rect = bullet.rect();
        let Some(idx) = enemies
            .iter()
            .position(|enemy| enemy.rect().overlaps(&bullet_rect))
        else {
            surviving.push(bullet);
            continue;
        };

        let enemy = &mut enemies[idx];
        enemy.health = enemy.health.saturating_sub(1);
        if enemy.health == 0 {
            destroyed.push(enemies.remove(idx));
        } else {
            damaged.push(enemy.id);
        }
    }

    HitOutcome {
        bullets: surviving,
        enemies,
        damaged,
        destroyed,
    }
}

/// Stage 7: bullet-enemy collisions, scoring, explosions and drops
fn resolve_bullet_hits(state: &mut GameState) {
    let bullets = std::mem::take(&mut state.bullets);
    let enemies = std::mem::take(&mut state.enemies);
    let outcome = match_bullets(bullets, enemies);
    state.bullets = outcome.bullets;
    state.enemies = outcome.enemies;

    for id in outcome.damaged {
        state.events.push(GameEvent::EnemyHit { id });
    }

    for enemy in outcome.destroyed {
        let points = enemy.kind.points();
        state.score += points;
        state.defeated_in_wave += 1;
        state.events.push(GameEvent::EnemyDestroyed {
            id: enemy.id,
            kind: enemy.kind,
            points,
        });
        state.spawn_explosion(enemy.rect().center());
        if let Some(power_up) = roll_power_up_drop(state, enemy.pos) {
            state.power_ups.push(power_up);
        }
    }
}

/// Stage 8
fn advance_wave(state: &mut GameState) {
    if state.defeated_in_wave < state.tuning.wave_threshold(state.wave) {
        return;
    }
    state.wave += 1;
    state.defeated_in_wave = 0;
    state.events.push(GameEvent::WaveAdvanced { wave: state.wave });
    log::info!("Wave {} started (score {})", state.wave, state.score);
}

/// Split `enemies` into (matching, rest), both in creation order
fn split_enemies(enemies: Vec<Enemy>, pred: impl Fn(&Enemy) -> bool) -> (Vec<Enemy>, Vec<Enemy>) {
    enemies.into_iter().partition(|enemy| pred(enemy))
}

/// Stage 9: enemies ramming the ship
fn resolve_player_collisions(state: &mut GameState) {
    let player_rect = state.player.rect();
    let enemies = std::mem::take(&mut state.enemies);
    let (rammed, rest) = split_enemies(enemies, |enemy| enemy.rect().overlaps(&player_rect));
    state.enemies = rest;

    for enemy in rammed {
        state.damage_player(Some(enemy.rect().center()));
    }
}

/// Stage 10
fn collect_power_ups(state: &mut GameState) {
    let player_rect = state.player.rect();
    let power_ups = std::mem::take(&mut state.power_ups);
    let (collected, rest): (Vec<_>, Vec<_>) = power_ups
        .into_iter()
        .partition(|power_up| power_up.rect().overlaps(&player_rect));
    state.power_ups = rest;

    for power_up in collected {
        state.apply_power_up(power_up.kind);
    }
}

/// Stage 11: enemies reaching the bottom cost a life
fn resolve_escaped_enemies(state: &mut GameState) {
    let enemies = std::mem::take(&mut state.enemies);
    let (escaped, rest) = split_enemies(enemies, |enemy| enemy.pos.y >= GAME_HEIGHT - ENEMY_HEIGHT);
    state.enemies = rest;

    for _ in escaped {
        state.damage_player(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::{EnemyKind, PowerUpKind};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const DT: f64 = FRAME_MS;

    /// No spawns and no drops, so every entity in a test is placed by hand
    fn quiet_state() -> GameState {
        let tuning = Tuning {
            spawn_interval_floor_ms: f64::MAX,
            drop_chance: 0.0,
            ..Default::default()
        };
        GameState::with_tuning(12345, tuning)
    }

    fn place_enemy(state: &mut GameState, kind: EnemyKind, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, y),
            kind,
            health: kind.max_health(),
            speed: 0.0,
        });
        id
    }

    /// A bullet that overlaps an enemy at (x, y) after moving up one frame
    fn place_bullet_under(state: &mut GameState, x: f32, y: f32) {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(x + 10.0, y + 20.0 + 12.0),
        });
    }

    fn count_game_over_events(state: &mut GameState) -> usize {
        state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let mut state = quiet_state();
        state.toggle_pause();
        let input = TickInput {
            move_left: true,
            fire: true,
            ..Default::default()
        };
        let x = state.player.pos.x;
        tick(&mut state, &input, DT);
        assert_eq!(state.time_ms, 0.0);
        assert_eq!(state.player.pos.x, x);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut state = quiet_state();
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        let x = state.player.pos.x;
        tick(&mut state, &left, DT);
        assert_eq!(state.player.pos.x, x - 8.0);

        for _ in 0..100 {
            tick(&mut state, &left, DT);
        }
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_speed_boost_moves_faster() {
        let mut state = quiet_state();
        state.effects.activate(PowerUpKind::SpeedBoost, 0.0);
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        let x = state.player.pos.x;
        tick(&mut state, &right, DT);
        assert_eq!(state.player.pos.x, x + 12.0);
    }

    #[test]
    fn test_fire_spawns_centered_bullet() {
        let mut state = quiet_state();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.bullets.len(), 1);
        let bullet = &state.bullets[0];
        let expected_x = state.player.center_x() - BULLET_WIDTH / 2.0;
        assert_eq!(bullet.pos.x, expected_x);
        // Already advanced once this frame
        assert_eq!(bullet.pos.y, PLAYER_Y - 12.0);
        assert!(state.drain_events().contains(&GameEvent::Shot));
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = quiet_state();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        tick(&mut state, &input, 50.0);
        assert_eq!(state.bullets.len(), 1);

        tick(&mut state, &input, 149.0);
        assert_eq!(state.bullets.len(), 1);
        tick(&mut state, &input, 1.0);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_double_fire_two_bullets_and_short_cooldown() {
        let mut state = quiet_state();
        state.effects.activate(PowerUpKind::DoubleFire, 0.0);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.bullets.len(), 2);
        let center = state.player.center_x() - BULLET_WIDTH / 2.0;
        assert_eq!(state.bullets[0].pos.x, center - 10.0);
        assert_eq!(state.bullets[1].pos.x, center + 10.0);

        tick(&mut state, &input, 100.0);
        assert_eq!(state.bullets.len(), 4);
    }

    #[test]
    fn test_bullet_cap() {
        let mut state = quiet_state();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, 250.0);
        }
        assert_eq!(state.bullets.len(), 5);

        state.effects.activate(PowerUpKind::DoubleFire, state.time_ms);
        tick(&mut state, &input, 250.0);
        assert!(state.bullets.len() <= 5);
    }

    #[test]
    fn test_double_fire_volley_truncated_to_capacity() {
        let mut state = quiet_state();
        for _ in 0..4 {
            let id = state.next_entity_id();
            state.bullets.push(Bullet {
                id,
                pos: Vec2::new(10.0, 300.0),
            });
        }
        state.effects.activate(PowerUpKind::DoubleFire, 0.0);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);

        assert_eq!(state.bullets.len(), 5);
        let center = state.player.center_x() - BULLET_WIDTH / 2.0;
        assert_eq!(state.bullets[4].pos.x, center - 10.0);
        assert!(state.bullets.iter().all(|b| b.pos.x != center + 10.0));
    }

    #[test]
    fn test_huge_wave_threshold_does_not_overflow() {
        let tuning = Tuning::from_json(r#"{ "wave_threshold_per_wave": 4000000000 }"#).unwrap();
        let mut state = GameState::with_tuning(3, tuning);
        state.wave = 2;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.wave, 2);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_bullet_removed_once_above_field() {
        let mut state = quiet_state();
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(100.0, 0.0),
        });
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.y, -BULLET_HEIGHT);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_fired_bullet_leaves_field() {
        let mut state = quiet_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, DT);
        let ticks = ((GAME_HEIGHT + BULLET_HEIGHT) / 12.0).ceil() as usize;
        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_tank_takes_two_hits() {
        let mut state = quiet_state();
        let id = place_enemy(&mut state, EnemyKind::Tank, 100.0, 100.0);

        place_bullet_under(&mut state, 100.0, 100.0);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 1);
        assert!(state.bullets.is_empty(), "bullet consumed by a non-lethal hit");
        assert_eq!(state.score, 0);
        assert!(state.drain_events().contains(&GameEvent::EnemyHit { id }));

        place_bullet_under(&mut state, 100.0, 100.0);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 300);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].pos, Vec2::new(118.0, 118.0));
        assert_eq!(state.defeated_in_wave, 1);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 300);
    }

    #[test]
    fn test_bullet_hits_only_first_enemy() {
        let mut state = quiet_state();
        let first = place_enemy(&mut state, EnemyKind::Basic, 100.0, 100.0);
        place_enemy(&mut state, EnemyKind::Basic, 104.0, 100.0);
        place_bullet_under(&mut state, 100.0, 100.0);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.enemies.len(), 1);
        assert_ne!(state.enemies[0].id, first);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_two_bullets_two_hits_on_boss() {
        let mut state = quiet_state();
        place_enemy(&mut state, EnemyKind::Boss, 100.0, 100.0);
        place_bullet_under(&mut state, 100.0, 100.0);
        place_bullet_under(&mut state, 104.0, 100.0);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.enemies[0].health, 1);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_missing_bullet_continues() {
        let mut state = quiet_state();
        place_enemy(&mut state, EnemyKind::Basic, 300.0, 100.0);
        place_bullet_under(&mut state, 100.0, 100.0);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_wave_advances_on_threshold_defeat() {
        let mut state = quiet_state();
        state.defeated_in_wave = 13;
        place_enemy(&mut state, EnemyKind::Basic, 100.0, 100.0);
        place_bullet_under(&mut state, 100.0, 100.0);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.wave, 1);
        assert_eq!(state.defeated_in_wave, 14);

        place_enemy(&mut state, EnemyKind::Basic, 100.0, 100.0);
        place_bullet_under(&mut state, 100.0, 100.0);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.wave, 2);
        assert_eq!(state.defeated_in_wave, 0);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::WaveAdvanced { wave: 2 })
        );
    }

    #[test]
    fn test_ramming_enemy_costs_life() {
        let mut state = quiet_state();
        let p = state.player.pos;
        place_enemy(&mut state, EnemyKind::Basic, p.x, p.y - 10.0);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.enemies.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_shield_blocks_ramming_at_last_life() {
        let mut state = quiet_state();
        state.lives = 1;
        state.apply_power_up(PowerUpKind::Shield);
        let p = state.player.pos;
        place_enemy(&mut state, EnemyKind::Basic, p.x, p.y - 10.0);

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.enemies.is_empty());
        assert_eq!(state.lives, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.game_over.is_none());
    }

    #[test]
    fn test_last_life_lost_by_ramming() {
        let mut state = quiet_state();
        state.lives = 1;
        let p = state.player.pos;
        place_enemy(&mut state, EnemyKind::Basic, p.x, p.y - 10.0);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(count_game_over_events(&mut state), 1);

        // Further ticks are inert
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(count_game_over_events(&mut state), 0);
    }

    #[test]
    fn test_last_life_lost_by_escape() {
        let mut state = quiet_state();
        state.lives = 1;
        place_enemy(&mut state, EnemyKind::Basic, 10.0, GAME_HEIGHT - ENEMY_HEIGHT);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.enemies.is_empty());
        assert!(state.explosions.is_empty());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(count_game_over_events(&mut state), 1);
    }

    #[test]
    fn test_simultaneous_hits_end_match_once() {
        let mut state = quiet_state();
        state.lives = 2;
        let p = state.player.pos;
        place_enemy(&mut state, EnemyKind::Basic, p.x, p.y - 10.0);
        place_enemy(&mut state, EnemyKind::Basic, p.x + 4.0, p.y - 10.0);
        place_enemy(&mut state, EnemyKind::Basic, p.x - 4.0, p.y - 10.0);
        place_enemy(&mut state, EnemyKind::Basic, 400.0, GAME_HEIGHT - ENEMY_HEIGHT);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(count_game_over_events(&mut state), 1);
        assert_eq!(state.poll_game_over(500.0), Some(0));
        assert_eq!(state.poll_game_over(500.0), None);
    }

    #[test]
    fn test_escape_with_shield_is_free() {
        let mut state = quiet_state();
        state.apply_power_up(PowerUpKind::Shield);
        place_enemy(&mut state, EnemyKind::Basic, 10.0, GAME_HEIGHT - ENEMY_HEIGHT);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.enemies.is_empty());
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_collect_power_up() {
        let mut state = quiet_state();
        let id = state.next_entity_id();
        let p = state.player.pos;
        state.power_ups.push(PowerUp {
            id,
            pos: Vec2::new(p.x + 5.0, p.y - 20.0),
            kind: PowerUpKind::DoubleFire,
        });
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.power_ups.is_empty());
        assert!(state.effects.double_fire());
        assert_eq!(
            state.effects.remaining_ms(PowerUpKind::DoubleFire, state.time_ms),
            Some(10_000.0)
        );
    }

    #[test]
    fn test_power_up_expires_on_sim_clock() {
        let mut state = quiet_state();
        state.apply_power_up(PowerUpKind::SpeedBoost);
        for _ in 0..79 {
            tick(&mut state, &TickInput::default(), 100.0);
        }
        assert!(state.effects.speed_boost());
        tick(&mut state, &TickInput::default(), 100.0);
        assert!(!state.effects.speed_boost());
    }

    #[test]
    fn test_missed_power_up_falls_away() {
        let mut state = quiet_state();
        let id = state.next_entity_id();
        state.power_ups.push(PowerUp {
            id,
            pos: Vec2::new(0.0, GAME_HEIGHT + POWERUP_SIZE - 1.0),
            kind: PowerUpKind::Shield,
        });
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.power_ups.is_empty());
        assert!(!state.effects.shield());
    }

    #[test]
    fn test_explosions_expire() {
        let mut state = quiet_state();
        state.spawn_explosion(Vec2::new(50.0, 50.0));
        tick(&mut state, &TickInput::default(), 299.0);
        assert_eq!(state.explosions.len(), 1);
        tick(&mut state, &TickInput::default(), 1.0);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_enemies_spawn_on_cadence() {
        let tuning = Tuning {
            drop_chance: 0.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(7, tuning);
        tick(&mut state, &TickInput::default(), 1400.0);
        assert!(state.enemies.is_empty());
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].kind, EnemyKind::Basic);
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_bad_dt_does_not_move_clock() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), f64::NAN);
        tick(&mut state, &TickInput::default(), -50.0);
        assert_eq!(state.time_ms, 0.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                move_left: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for frame in 0..3000 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input, DT);
            tick(&mut state2, input, DT);
        }

        assert_eq!(state1.time_ms, state2.time_ms);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
        }
    }

    proptest! {
        #[test]
        fn prop_player_always_in_bounds(moves in proptest::collection::vec(0u8..4, 1..300)) {
            let mut state = quiet_state();
            for m in moves {
                let input = TickInput {
                    move_left: m & 1 != 0,
                    move_right: m & 2 != 0,
                    ..Default::default()
                };
                if m == 3 {
                    state.effects.activate(PowerUpKind::SpeedBoost, state.time_ms);
                }
                tick(&mut state, &input, DT);
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= GAME_WIDTH - PLAYER_WIDTH);
            }
        }

        #[test]
        fn prop_lives_and_score_stay_sane(seed in any::<u64>(), frames in 1usize..2000) {
            let mut state = GameState::new(seed);
            let mut last_score = 0;
            let mut last_wave = 1;
            for frame in 0..frames {
                let input = TickInput {
                    move_left: frame % 90 < 45,
                    move_right: frame % 90 >= 45,
                    fire: true,
                    ..Default::default()
                };
                tick(&mut state, &input, DT);
                prop_assert!(state.lives <= state.tuning.max_lives);
                prop_assert!(state.score >= last_score);
                prop_assert!(state.wave >= last_wave);
                prop_assert!(state.bullets.len() <= state.tuning.max_bullets);
                last_score = state.score;
                last_wave = state.wave;
            }
        }
    }
}
