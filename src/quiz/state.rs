//! Session state and the types the presentation layer reads
//!
//! `Session` is owned by the state machine; everything outside it gets a
//! shared reference or a `Snapshot`.

use serde::{Deserialize, Serialize};

use super::question::Question;
use crate::consts::*;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first start
    #[default]
    Menu,
    /// Answering questions
    Playing,
    /// Level cleared with hearts left
    LevelComplete,
    /// Out of hearts
    GameOver,
    /// Final level cleared
    Victory,
}

/// Transient answer feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Wrong,
}

/// End-of-level numbers for the level-complete screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelReport {
    pub level: u32,
    pub correct: u32,
    pub wrong: u32,
    pub seconds: u32,
    pub hearts: u8,
}

impl LevelReport {
    /// Share of answers that were right, rounded to the nearest percent
    pub fn accuracy_percent(&self) -> u32 {
        let total = self.correct + self.wrong;
        if total == 0 {
            return 0;
        }
        (self.correct * 100 + total / 2) / total
    }
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Move keyboard focus to the answer field
    FocusInput,
    LevelStarted { level: u32 },
    AnswerResolved { correct: bool },
    LevelComplete { report: LevelReport },
    GameOver,
    Victory,
    /// The victory screen may now offer "play again"
    PlayAgainRevealed,
}

/// The mutable game aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    /// 1-based level
    pub level: u32,
    pub hearts: u8,
    /// Fixed once the level starts
    pub questions: Vec<Question>,
    pub current_index: usize,
    /// Digits typed so far (at most `MAX_ANSWER_DIGITS`)
    pub user_answer: String,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub feedback: Feedback,
    /// Seconds since the level started
    pub timer: u32,
    /// Set while an answer's feedback window is open
    pub is_processing: bool,
    pub play_again_visible: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session sitting on the menu
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            level: 1,
            hearts: MAX_HEARTS,
            questions: Vec::new(),
            current_index: 0,
            user_answer: String::new(),
            correct_count: 0,
            wrong_count: 0,
            feedback: Feedback::None,
            timer: 0,
            is_processing: false,
            play_again_visible: false,
        }
    }

    /// Reset per-level bookkeeping and install a new question list
    pub(crate) fn begin_level(&mut self, level: u32, hearts: u8, questions: Vec<Question>) {
        self.phase = GamePhase::Playing;
        self.level = level;
        self.hearts = hearts.min(MAX_HEARTS);
        self.questions = questions;
        self.current_index = 0;
        self.user_answer.clear();
        self.correct_count = 0;
        self.wrong_count = 0;
        self.feedback = Feedback::None;
        self.timer = 0;
        self.is_processing = false;
        self.play_again_visible = false;
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// `(1-based question number, total)`
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.questions.len())
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Keypad edits are accepted only while playing and not mid-feedback
    pub fn can_edit(&self) -> bool {
        self.phase == GamePhase::Playing && !self.is_processing
    }

    pub fn report(&self) -> LevelReport {
        LevelReport {
            level: self.level,
            correct: self.correct_count,
            wrong: self.wrong_count,
            seconds: self.timer,
            hearts: self.hearts,
        }
    }
}

/// Owned, read-only view of everything the HUD renders
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub hearts: u8,
    pub max_hearts: u8,
    pub question: Option<Question>,
    pub question_number: usize,
    pub question_total: usize,
    pub user_answer: String,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub feedback: Feedback,
    pub timer: u32,
    pub is_processing: bool,
    pub play_again_visible: bool,
    pub muted: bool,
}

impl Snapshot {
    pub fn capture(session: &Session, muted: bool) -> Self {
        let (question_number, question_total) = session.progress();
        Self {
            phase: session.phase,
            level: session.level,
            hearts: session.hearts,
            max_hearts: MAX_HEARTS,
            question: session.current_question().copied(),
            question_number,
            question_total,
            user_answer: session.user_answer.clone(),
            correct_count: session.correct_count,
            wrong_count: session.wrong_count,
            feedback: session.feedback,
            timer: session.timer,
            is_processing: session.is_processing,
            play_again_visible: session.play_again_visible,
            muted,
        }
    }
}
