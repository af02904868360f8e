//! Sound effects for game events
//!
//! The simulation only emits [`GameEvent`]s; this module decides which of
//! them are audible. Playback itself is the Web Audio synth in `web`, which
//! exists only in the browser build. Nothing here feeds back into the
//! simulation, so a missing or failing audio device never affects play.

use crate::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Enemy took a hit and survived
    Hit,
    /// Enemy destroyed or player struck
    Explosion,
    /// Power-up collected
    PowerUp,
    /// Player lost a life
    Damage,
    GameOver,
}

impl SoundEffect {
    /// Sound for a single event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shot => Some(Self::Shoot),
            GameEvent::EnemyHit { .. } => Some(Self::Hit),
            GameEvent::Explosion { .. } => Some(Self::Explosion),
            GameEvent::PowerUpCollected { .. } => Some(Self::PowerUp),
            GameEvent::PlayerDamaged { .. } => Some(Self::Damage),
            GameEvent::GameOver { .. } => Some(Self::GameOver),
            // Covered by the explosion that accompanies it
            GameEvent::EnemyDestroyed { .. } => None,
            GameEvent::WaveAdvanced { .. } => None,
        }
    }

    /// Sounds for one frame's events, each effect at most once, in first
    /// occurrence order
    pub fn for_frame(events: &[GameEvent]) -> Vec<Self> {
        let mut effects = Vec::new();
        for effect in events.iter().filter_map(Self::for_event) {
            if !effects.contains(&effect) {
                effects.push(effect);
            }
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EnemyKind, PowerUpKind};
    use glam::Vec2;

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Shot), Some(SoundEffect::Shoot));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EnemyHit { id: 3 }),
            Some(SoundEffect::Hit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpCollected {
                kind: PowerUpKind::Shield
            }),
            Some(SoundEffect::PowerUp)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PlayerDamaged { lives: 2 }),
            Some(SoundEffect::Damage)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver { score: 10 }),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::WaveAdvanced { wave: 2 }),
            None
        );
    }

    #[test]
    fn test_frame_sounds_deduplicated() {
        let events = vec![
            GameEvent::Shot,
            GameEvent::EnemyDestroyed {
                id: 1,
                kind: EnemyKind::Basic,
                points: 100,
            },
            GameEvent::Explosion { pos: Vec2::ZERO },
            GameEvent::Explosion { pos: Vec2::ONE },
            GameEvent::Shot,
        ];
        assert_eq!(
            SoundEffect::for_frame(&events),
            vec![SoundEffect::Shoot, SoundEffect::Explosion]
        );
    }
}
