//! Multiplication Arcade - a retro multiplication quiz game
//!
//! Core modules:
//! - `quiz`: Deterministic quiz core (question generation, session state machine)
//! - `audio`: Sound cue sink and the Web Audio synthesizer
//! - `input`: Keypad / keyboard command mapping
//! - `settings`: Player-facing configuration

pub mod audio;
pub mod input;
pub mod quiz;
pub mod settings;

pub use audio::{AudioSink, Cue, NullAudio};
pub use quiz::{Arcade, Feedback, GamePhase, Question, Session, Snapshot, generate};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Mistake budget per level
    pub const MAX_HEARTS: u8 = 3;
    /// Clearing this level wins the game
    pub const TOTAL_LEVELS: u32 = 9;
    /// Longest answer the keypad accepts (9 × 9 = 81 needs two)
    pub const MAX_ANSWER_DIGITS: usize = 3;

    /// How long correct/wrong feedback stays up before the game moves on
    pub const FEEDBACK_DELAY_MS: u64 = 800;
    /// Nudge before handing focus back to the answer field
    pub const REFOCUS_DELAY_MS: u64 = 50;
    /// Delay before the "play again" button appears on the victory screen
    pub const VICTORY_REVEAL_DELAY_MS: u64 = 10_000;
    /// Level clock resolution
    pub const TIMER_TICK_MS: u64 = 1_000;

    /// Question count at level 1
    pub const BASE_QUESTION_COUNT: u32 = 20;
    /// Extra questions per level
    pub const QUESTIONS_PER_LEVEL_STEP: u32 = 10;
    /// Question count cap
    pub const MAX_QUESTION_COUNT: u32 = 50;
    /// Smallest multiplier at every level
    pub const MIN_MULTIPLIER: u32 = 2;
    /// Multiplicand range, inclusive
    pub const MIN_MULTIPLICAND: u32 = 1;
    pub const MAX_MULTIPLICAND: u32 = 9;
    /// Resample budget when a draw repeats the previous question
    pub const MAX_RESAMPLE_ATTEMPTS: u32 = 20;
}

/// Format elapsed seconds as `MM:SS` for the HUD clock
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(600), "10:00");
    }
}
