//! Deterministic quiz module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Time only through the virtual clock in `timers`
//! - No rendering or platform dependencies (audio goes through `AudioSink`)

pub mod generator;
pub mod machine;
pub mod question;
pub mod state;
pub mod timers;

pub use generator::{generate, intentions};
pub use machine::Arcade;
pub use question::{Intention, LevelConfig, Question};
pub use state::{Feedback, GameEvent, GamePhase, LevelReport, Session, Snapshot};
pub use timers::{Deferral, TimerId, Timers};
