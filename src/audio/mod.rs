//! Audio sink boundary
//!
//! The quiz core only ever sends one-way requests: play a cue, start or stop
//! the background loop, resume the context from a user gesture. Nothing comes
//! back, so a broken or missing audio device can never disturb game state.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

use serde::{Deserialize, Serialize};

/// Sound cue names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Keypad press
    Click,
    /// Right answer
    Correct,
    /// Wrong answer
    Wrong,
    /// Level cleared
    LevelComplete,
    /// Out of hearts
    GameOver,
    /// Final level cleared
    Victory,
}

/// Fire-and-forget audio capability injected into the state machine
pub trait AudioSink {
    /// Unlock playback. Must be called from inside a user-gesture handler.
    fn request_resume(&mut self);
    fn play_cue(&mut self, cue: Cue);
    /// Start the background music loop (idempotent)
    fn start_loop(&mut self);
    /// Stop the background music loop (idempotent)
    fn stop_loop(&mut self);
}

/// Silent sink for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn request_resume(&mut self) {}
    fn play_cue(&mut self, _cue: Cue) {}
    fn start_loop(&mut self) {}
    fn stop_loop(&mut self) {}
}
