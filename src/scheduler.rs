//! Frame-driven scheduler adapter
//!
//! Turns display refresh timestamps into simulation steps. One call per
//! frame; the scheduler owns nothing but the previous timestamp.

use crate::consts::{FRAME_MS, MAX_FRAME_MS};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Result of one scheduled frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Whether the simulation advanced this frame
    pub stepped: bool,
    /// Elapsed time applied this frame (ms)
    pub dt_ms: f64,
    /// Events emitted since the previous frame
    pub events: Vec<GameEvent>,
    /// Final score, delivered exactly once per match
    pub game_over: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    last_time: Option<f64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp (next frame uses a nominal step)
    pub fn reset(&mut self) {
        self.last_time = None;
    }

    /// Elapsed time since the previous frame, clamped to [0, MAX_FRAME_MS]
    fn elapsed(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_time {
            Some(last) => now_ms - last,
            None => FRAME_MS,
        };
        self.last_time = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        }
    }

    /// Run one display frame
    pub fn frame(&mut self, state: &mut GameState, input: &TickInput, now_ms: f64) -> Frame {
        let dt_ms = self.elapsed(now_ms);

        if input.pause && state.is_running() {
            state.toggle_pause();
            log::info!(
                "{}",
                if state.is_paused() { "Paused" } else { "Resumed" }
            );
        }

        let was_over = !state.is_running();
        let stepped = match state.phase {
            GamePhase::Playing => {
                tick(state, input, dt_ms);
                true
            }
            GamePhase::Paused | GamePhase::GameOver => false,
        };

        // The notice starts counting on the frame after the match ended
        let game_over = if was_over {
            state.poll_game_over(dt_ms)
        } else {
            None
        };

        Frame {
            stepped,
            dt_ms,
            events: state.drain_events(),
            game_over,
        }
    }
}
