//! Enemy spawning and power-up drops
//!
//! Harder archetypes phase in as waves advance; basic enemies phase out
//! entirely by wave 10.

use glam::Vec2;
use rand::Rng;

use super::catalog::{EnemyKind, PowerUpKind};
use super::collision::random_between;
use super::state::{Enemy, GameState, PowerUp};
use crate::consts::*;

/// Spawn weights for [`EnemyKind::ALL`] at `wave`
pub fn enemy_weights(wave: u32) -> [u32; 4] {
    let basic = 10u32.saturating_sub(wave);
    let fast = if wave >= 2 { (wave * 2).min(8) } else { 0 };
    let tank = if wave >= 3 { wave.min(5) } else { 0 };
    let boss = if wave >= 5 { (wave - 4).min(3) } else { 0 };
    [basic, fast, tank, boss]
}

/// Weighted archetype pick for `wave`.
///
/// Never returns an archetype whose weight is zero; falls back to
/// `Basic` if every weight is zero.
pub fn select_enemy_kind<R: Rng>(wave: u32, rng: &mut R) -> EnemyKind {
    let weights = enemy_weights(wave);
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return EnemyKind::Basic;
    }

    let mut remaining = rng.random::<f64>() * total as f64;
    for (kind, weight) in EnemyKind::ALL.iter().zip(weights) {
        if weight == 0 {
            continue;
        }
        remaining -= weight as f64;
        if remaining <= 0.0 {
            return *kind;
        }
    }

    // Rounding left a sliver; the last live archetype owns it
    EnemyKind::ALL
        .iter()
        .zip(weights)
        .rev()
        .find(|(_, weight)| *weight > 0)
        .map(|(kind, _)| *kind)
        .unwrap_or(EnemyKind::Basic)
}

/// Whether enough simulation time has passed since the last spawn
pub fn spawn_due(state: &GameState) -> bool {
    state.time_ms - state.last_spawn_ms > state.tuning.spawn_interval_ms(state.wave)
}

/// Create an enemy just above the visible field for the current wave
pub fn spawn_enemy(state: &mut GameState) -> Enemy {
    let kind = select_enemy_kind(state.wave, &mut state.rng);
    let x = random_between(&mut state.rng, ENEMY_WIDTH, GAME_WIDTH - ENEMY_WIDTH * 2.0);
    let speed = state.tuning.enemy_base_speed
        * kind.speed_multiplier()
        * state.tuning.wave_speed_factor(state.wave);

    let enemy = Enemy {
        id: state.next_entity_id(),
        pos: Vec2::new(x, -ENEMY_HEIGHT),
        kind,
        health: kind.max_health(),
        speed,
    };
    log::debug!(
        "Spawned {} enemy {} at x={:.0} (wave {})",
        kind.as_str(),
        enemy.id,
        x,
        state.wave
    );
    enemy
}

/// Roll for a pickup where an enemy was destroyed
pub fn roll_power_up_drop(state: &mut GameState, pos: Vec2) -> Option<PowerUp> {
    let chance = state.tuning.drop_chance;
    let chance = if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    };
    if !state.rng.random_bool(chance) {
        return None;
    }

    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    Some(PowerUp {
        id: state.next_entity_id(),
        pos,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_weights_by_wave() {
        assert_eq!(enemy_weights(1), [9, 0, 0, 0]);
        assert_eq!(enemy_weights(2), [8, 4, 0, 0]);
        assert_eq!(enemy_weights(3), [7, 6, 3, 0]);
        assert_eq!(enemy_weights(5), [5, 8, 5, 1]);
        assert_eq!(enemy_weights(12), [0, 8, 5, 3]);
    }

    #[test]
    fn test_wave_one_is_all_basic() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            assert_eq!(select_enemy_kind(1, &mut rng), EnemyKind::Basic);
        }
    }

    #[test]
    fn test_late_waves_see_every_hard_archetype() {
        let mut rng = Pcg32::seed_from_u64(42);
        let picks: Vec<_> = (0..2000).map(|_| select_enemy_kind(7, &mut rng)).collect();
        for kind in EnemyKind::ALL {
            assert!(picks.contains(&kind), "{:?} never picked", kind);
        }
    }

    #[test]
    fn test_spawned_enemy_placement() {
        let mut state = GameState::new(3);
        state.wave = 4;
        for _ in 0..200 {
            let enemy = spawn_enemy(&mut state);
            assert!(enemy.pos.x >= ENEMY_WIDTH);
            assert!(enemy.pos.x <= GAME_WIDTH - ENEMY_WIDTH * 2.0);
            assert_eq!(enemy.pos.y, -ENEMY_HEIGHT);
            assert_eq!(enemy.health, enemy.kind.max_health());
            let expected = 2.0 * enemy.kind.speed_multiplier() * 1.4;
            assert!((enemy.speed - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_spawn_due_respects_interval() {
        let mut state = GameState::new(3);
        state.time_ms = 1400.0;
        assert!(!spawn_due(&state));
        state.time_ms = 1400.5;
        assert!(spawn_due(&state));
    }

    #[test]
    fn test_drop_rate_is_roughly_fifteen_percent() {
        let mut state = GameState::new(11);
        let drops = (0..10_000)
            .filter_map(|_| roll_power_up_drop(&mut state, Vec2::new(10.0, 20.0)))
            .inspect(|p| assert_eq!(p.pos, Vec2::new(10.0, 20.0)))
            .count();
        assert!((1200..1800).contains(&drops), "drops = {}", drops);
    }

    #[test]
    fn test_drop_chance_out_of_range_is_clamped() {
        let tuning = Tuning {
            drop_chance: 7.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(5, tuning);
        assert!(roll_power_up_drop(&mut state, Vec2::ZERO).is_some());

        state.tuning.drop_chance = f64::NAN;
        assert!(roll_power_up_drop(&mut state, Vec2::ZERO).is_none());
    }

    proptest! {
        #[test]
        fn prop_never_selects_zero_weight(wave in 1u32..64, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let weights = enemy_weights(wave);
            for _ in 0..32 {
                let kind = select_enemy_kind(wave, &mut rng);
                let idx = EnemyKind::ALL.iter().position(|k| *k == kind).unwrap();
                prop_assert!(weights[idx] > 0);
            }
        }

        #[test]
        fn prop_spawn_interval_monotonic(wave in 0u32..200) {
            let tuning = Tuning::default();
            let now = tuning.spawn_interval_ms(wave);
            let next = tuning.spawn_interval_ms(wave + 1);
            prop_assert!(next <= now);
            prop_assert!(now >= 500.0);
            prop_assert_eq!(now, (1500.0 - 100.0 * wave as f64).max(500.0));
        }
    }
}
