//! Best score across sessions
//!
//! Read once at startup, written only when a match beats it.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub const STORAGE_KEY: &'static str = "star_volley_highscore";

    pub fn new() -> Self {
        Self::default()
    }

    /// Load from storage. Missing or corrupt data starts fresh.
    pub fn load(storage: &dyn Storage) -> Self {
        let Some(raw) = storage.get_item(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self::new();
        };

        // Stored as a bare integer; the JSON form is accepted too
        let parsed = raw
            .trim()
            .parse::<u64>()
            .ok()
            .map(|best| Self { best })
            .or_else(|| serde_json::from_str::<HighScore>(&raw).ok());
        match parsed {
            Some(score) => {
                log::info!("Loaded high score: {}", score.best);
                score
            }
            None => {
                log::warn!("Ignoring corrupt high score: {:?}", raw);
                Self::new()
            }
        }
    }

    /// Whether `score` deserves a "new high score" banner: non-zero and at
    /// least the current best
    pub fn is_record(&self, score: u64) -> bool {
        score > 0 && score >= self.best
    }

    /// Record a final score. True when it is a new best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score == 0 || score <= self.best {
            return false;
        }
        log::info!("New high score: {} (was {})", score, self.best);
        self.best = score;
        true
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        if storage.set_item(Self::STORAGE_KEY, &self.best.to_string()) {
            log::info!("High score saved ({})", self.best);
        } else {
            log::warn!("High score could not be saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_submit_requires_strict_improvement() {
        let mut high = HighScore::new();
        assert!(!high.submit(0));
        assert!(high.submit(500));
        assert!(!high.submit(500));
        assert!(!high.submit(300));
        assert!(high.submit(501));
        assert_eq!(high.best, 501);
    }

    #[test]
    fn test_tie_is_a_record_but_not_stored() {
        let mut high = HighScore { best: 500 };
        assert!(high.is_record(500));
        assert!(high.is_record(501));
        assert!(!high.is_record(499));
        assert!(!HighScore::new().is_record(0));
        assert!(!high.submit(500));
        assert_eq!(high.best, 500);
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let mut high = HighScore::new();
        high.submit(1200);
        high.save(&mut storage);
        assert_eq!(storage.get_item(HighScore::STORAGE_KEY).as_deref(), Some("1200"));

        assert_eq!(HighScore::load(&storage).best, 1200);
    }

    #[test]
    fn test_load_missing_or_corrupt() {
        let mut storage = MemoryStorage::new();
        assert_eq!(HighScore::load(&storage).best, 0);

        storage.set_item(HighScore::STORAGE_KEY, "not a number");
        assert_eq!(HighScore::load(&storage).best, 0);

        storage.set_item(HighScore::STORAGE_KEY, "4200");
        assert_eq!(HighScore::load(&storage).best, 4200);

        storage.set_item(HighScore::STORAGE_KEY, r#"{"best":77}"#);
        assert_eq!(HighScore::load(&storage).best, 77);
    }
}
