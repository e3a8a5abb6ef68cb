//! Loftwahnoid - a Breakout/Arkanoid-style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, round state machine)
//! - `round`: Round controller wiring the sim to audio and score persistence
//! - `renderer`: Frame snapshot handed to whatever draws the game
//! - `audio`: Sound cue sink with a silent fallback
//! - `highscores`: Top-10 leaderboard persisted as JSON
//! - `settings` / `tuning`: Player preferences and data-driven game balance

pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod round;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreError, HighScores, ScoreStore};
pub use round::{PauseChoice, RoundController, RoundStatus};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Target frame rate; one simulation tick per frame
    pub const FPS: u32 = 60;
    /// Tick length in microseconds (16.666 ms)
    pub const TICK_US: u64 = 1_000_000 / FPS as u64;

    /// Longest high-score name kept
    pub const MAX_NAME_LEN: usize = 10;
}

/// Truncate a player name to the leaderboard limit (by characters, not bytes)
pub fn truncate_name(name: &str) -> String {
    name.chars().take(consts::MAX_NAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("ACE"), "ACE");
        assert_eq!(truncate_name("ABCDEFGHIJKLMNOP"), "ABCDEFGHIJ");
        assert_eq!(truncate_name("ééééééééééé").chars().count(), 10);
    }
}
