//! Engine configuration from environment variables.
//!
//! Settings persistence belongs to the platform layer; the engine only reads
//! a snapshot of the flags it cares about.

use std::env;

#[derive(Clone, Debug)]
pub struct ReviewConfig {
    /// Master switch for move sounds (general settings, read-only here)
    pub move_sounds_enabled: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            move_sounds_enabled: true,
        }
    }
}

impl ReviewConfig {
    /// Load configuration from environment variables, with defaults.
    pub fn from_env() -> Self {
        let move_sounds_enabled = env::var("MOVE_SOUNDS_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        Self {
            move_sounds_enabled,
        }
    }
}
