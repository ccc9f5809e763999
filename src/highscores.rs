//! Best-score bookkeeping
//!
//! The host loads a previously stored integer at startup and stores whatever the
//! simulation reports through [`crate::sim::GameEvent::NewHighScore`]. Serialized form
//! is the bare integer.

use serde::{Deserialize, Serialize};

/// Best cumulative coverage score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Whether `score` would replace the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New high score {} (was {})", score, self.best);
        self.best = score;
        true
    }

    /// Parse a stored value; anything unreadable starts fresh
    pub fn from_stored(stored: &str) -> Self {
        match serde_json::from_str(stored.trim()) {
            Ok(score) => score,
            Err(err) => {
                log::warn!("Failed to load high score: {}", err);
                Self::default()
            }
        }
    }

    /// Value for the host to store
    pub fn to_stored(&self) -> String {
        self.best.to_string()
    }
}
