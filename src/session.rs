//! Menu -> playing -> game over lifecycle
//!
//! The session is the single owner of the match state. The shell feeds it
//! input and timestamps, and reads back frames and snapshots.

use crate::highscores::HighScore;
use crate::persistence::Storage;
use crate::scheduler::{Frame, Scheduler};
use crate::settings::Settings;
use crate::sim::{GameState, Snapshot, TickInput};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver { score: u64, new_high_score: bool },
}

pub struct Session {
    screen: Screen,
    state: GameState,
    scheduler: Scheduler,
    high_score: HighScore,
    settings: Settings,
    storage: Box<dyn Storage>,
}

impl Session {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self::with_tuning(storage, Tuning::default())
    }

    pub fn with_tuning(storage: Box<dyn Storage>, tuning: Tuning) -> Self {
        let high_score = HighScore::load(storage.as_ref());
        let settings = Settings::load(storage.as_ref());
        Self {
            screen: Screen::Menu,
            state: GameState::with_tuning(0, tuning),
            scheduler: Scheduler::new(),
            high_score,
            settings,
            storage,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    /// Player preferences, persisted through the session's storage
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn muted(&self) -> bool {
        self.settings.muted
    }

    /// Begin a fresh match
    pub fn start(&mut self, seed: u64) {
        self.state.restart(seed);
        self.scheduler.reset();
        self.screen = Screen::Playing;
        log::info!("Match started (best so far: {})", self.high_score.best);
    }

    pub fn restart(&mut self, seed: u64) {
        self.start(seed);
    }

    pub fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
    }

    /// Run one display frame. Returns `None` when no match is on screen.
    pub fn frame(&mut self, input: &TickInput, now_ms: f64) -> Option<Frame> {
        if input.mute {
            let muted = self.settings.toggle_mute();
            log::info!("Sound {}", if muted { "muted" } else { "unmuted" });
            self.settings.save(self.storage.as_mut());
        }

        if self.screen != Screen::Playing {
            return None;
        }

        let frame = self.scheduler.frame(&mut self.state, input, now_ms);
        if let Some(score) = frame.game_over {
            // A tie still earns the banner but leaves the stored best alone
            let new_high_score = self.high_score.is_record(score);
            if self.high_score.submit(score) {
                self.high_score.save(self.storage.as_mut());
            }
            self.screen = Screen::GameOver {
                score,
                new_high_score,
            };
        }
        Some(frame)
    }
}
