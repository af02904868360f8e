//! Player preferences
//!
//! Persisted separately from the high score.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Show the on-screen controls hint on the menu
    pub show_controls_hint: bool,
    /// Pause when the window loses focus or the tab is hidden
    pub auto_pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_controls_hint: true,
            auto_pause_on_blur: true,
        }
    }
}

impl Settings {
    pub const STORAGE_KEY: &'static str = "star_volley_settings";

    /// Gain applied to sound effects, 0 when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Keep volumes in range after loading hand-edited data
    fn sanitized(mut self) -> Self {
        let unit = |v: f32| if v.is_nan() { 1.0 } else { v.clamp(0.0, 1.0) };
        self.master_volume = unit(self.master_volume);
        self.sfx_volume = unit(self.sfx_volume);
        self
    }

    pub fn load(storage: &dyn Storage) -> Self {
        if let Some(json) = storage.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        if let Ok(json) = serde_json::to_string(self) {
            if storage.set_item(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            } else {
                log::warn!("Settings could not be saved");
            }
        }
    }
}
