//! Session state machine
//!
//! `Arcade` owns the session, the RNG, the deferral queue and the injected
//! audio sink. The orchestrator calls one command at a time and advances the
//! virtual clock with [`Arcade::update`]; each command runs to completion,
//! including arming any deferral it needs, before the next is accepted.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::generator::generate;
use super::state::{Feedback, GameEvent, GamePhase, Session, Snapshot};
use super::timers::{Deferral, Fired, TimerId, Timers};
use crate::audio::{AudioSink, Cue};
use crate::consts::*;
use crate::input::PadKey;
use crate::settings::Settings;

/// Handles for the deferrals a session may have armed
#[derive(Debug, Default)]
struct SessionTimers {
    tick: Option<TimerId>,
    resolve: Option<TimerId>,
    refocus: Option<TimerId>,
    reveal: Option<TimerId>,
}

/// The game: session state plus everything needed to drive it
pub struct Arcade<A: AudioSink> {
    session: Session,
    audio: A,
    rng: Pcg32,
    seed: u64,
    timers: Timers,
    handles: SessionTimers,
    /// Bumped on every level entry; deferrals from older epochs are dropped
    epoch: u64,
    muted: bool,
    events: Vec<GameEvent>,
}

impl<A: AudioSink> Arcade<A> {
    /// Create a game on the menu screen
    pub fn new(audio: A, seed: u64) -> Self {
        Self {
            session: Session::new(),
            audio,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            timers: Timers::new(),
            handles: SessionTimers::default(),
            epoch: 0,
            muted: false,
            events: Vec::new(),
        }
    }

    /// Create a game from settings; `fallback_seed` is used when no seed is configured
    pub fn with_settings(audio: A, settings: &Settings, fallback_seed: u64) -> Self {
        let mut arcade = Self::new(audio, settings.seed.unwrap_or(fallback_seed));
        arcade.muted = settings.start_muted;
        arcade
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session, self.muted)
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Virtual clock, in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Commands ===

    /// Menu → playing. Call from a user-gesture handler so audio can unlock.
    pub fn start_game(&mut self) -> bool {
        if self.session.phase != GamePhase::Menu {
            return false;
        }
        self.audio.request_resume();
        if !self.muted {
            self.audio.start_loop();
        }
        log::info!("Game started (seed {})", self.seed);
        self.enter_level(1, MAX_HEARTS);
        true
    }

    /// Check an answer. Ignored outside play, while feedback is showing, or
    /// when `raw` is not an integer. Returns whether the answer was taken.
    pub fn submit_answer(&mut self, raw: &str) -> bool {
        if !self.session.can_edit() {
            return false;
        }
        let Ok(given) = raw.trim().parse::<i64>() else {
            return false;
        };
        let Some(question) = self.session.current_question().copied() else {
            return false;
        };

        self.session.is_processing = true;
        let correct = u64::try_from(given).is_ok_and(|given| given == question.answer());
        if correct {
            self.session.correct_count += 1;
            self.session.feedback = Feedback::Correct;
            self.cue(Cue::Correct);
        } else {
            self.session.hearts = self.session.hearts.saturating_sub(1);
            self.session.wrong_count += 1;
            self.session.feedback = Feedback::Wrong;
            self.cue(Cue::Wrong);
        }
        log::debug!(
            "{} = {} answered {} ({})",
            question,
            question.answer(),
            given,
            if correct { "correct" } else { "wrong" }
        );

        self.handles.resolve = Some(self.timers.schedule_once(
            FEEDBACK_DELAY_MS,
            Deferral::ResolveAnswer { correct },
            self.epoch,
        ));
        true
    }

    /// Type a digit. Returns whether the buffer changed.
    pub fn append_digit(&mut self, digit: u8) -> bool {
        if !self.session.can_edit() || digit > 9 {
            return false;
        }
        self.cue(Cue::Click);
        if self.session.user_answer.len() >= MAX_ANSWER_DIGITS {
            return false;
        }
        self.session.user_answer.push(char::from(b'0' + digit));
        true
    }

    /// Delete the last digit. Returns whether the buffer changed.
    pub fn backspace(&mut self) -> bool {
        if !self.session.can_edit() {
            return false;
        }
        self.cue(Cue::Click);
        self.session.user_answer.pop().is_some()
    }

    /// Submit the typed buffer
    pub fn submit(&mut self) -> bool {
        if !self.session.can_edit() {
            return false;
        }
        self.cue(Cue::Click);
        let buffer = self.session.user_answer.clone();
        self.submit_answer(&buffer)
    }

    /// Route a keypad press
    pub fn press(&mut self, key: PadKey) -> bool {
        match key {
            PadKey::Digit(d) => self.append_digit(d),
            PadKey::Backspace => self.backspace(),
            PadKey::Submit => self.submit(),
        }
    }

    /// Level complete → next level, with one heart back (capped)
    pub fn next_level(&mut self) -> bool {
        if self.session.phase != GamePhase::LevelComplete || self.session.level >= TOTAL_LEVELS {
            return false;
        }
        let hearts = (self.session.hearts + 1).min(MAX_HEARTS);
        self.enter_level(self.session.level + 1, hearts);
        true
    }

    /// Level complete → same level again, fresh questions and full hearts
    pub fn restart_level(&mut self) -> bool {
        if self.session.phase != GamePhase::LevelComplete {
            return false;
        }
        self.enter_level(self.session.level, MAX_HEARTS);
        true
    }

    /// Game over / victory → level 1
    pub fn restart_game(&mut self) -> bool {
        if !matches!(
            self.session.phase,
            GamePhase::GameOver | GamePhase::Victory
        ) {
            return false;
        }
        self.audio.request_resume();
        if !self.muted {
            self.audio.start_loop();
        }
        log::info!("Game restarted");
        self.enter_level(1, MAX_HEARTS);
        true
    }

    /// Flip the mute flag; returns the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.audio.stop_loop();
        } else if self.session.phase != GamePhase::Menu {
            self.audio.start_loop();
        }
        log::info!("Muted: {}", self.muted);
        self.muted
    }

    /// Advance the virtual clock, running every deferral that comes due
    pub fn update(&mut self, dt_ms: u64) {
        let until = self.timers.now_ms().saturating_add(dt_ms);
        while let Some(fired) = self.timers.pop_due(until) {
            self.fire(fired);
        }
    }

    // === Internals ===

    fn cue(&mut self, cue: Cue) {
        if !self.muted {
            self.audio.play_cue(cue);
        }
    }

    fn enter_level(&mut self, level: u32, hearts: u8) {
        self.timers.cancel_all();
        self.handles = SessionTimers::default();
        self.epoch += 1;

        let questions = generate(level, &mut self.rng);
        log::info!(
            "Level {} started: {} questions, top table {}",
            level,
            questions.len(),
            level + 1
        );
        self.session.begin_level(level, hearts, questions);
        self.handles.tick = Some(self.timers.schedule_every(
            TIMER_TICK_MS,
            Deferral::TimerTick,
            self.epoch,
        ));
        self.events.push(GameEvent::LevelStarted { level });
        self.events.push(GameEvent::FocusInput);
    }

    fn leave_playing(&mut self, phase: GamePhase) {
        self.session.phase = phase;
        for handle in [
            self.handles.tick.take(),
            self.handles.refocus.take(),
            self.handles.resolve.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.timers.cancel(handle);
        }
    }

    fn fire(&mut self, fired: Fired) {
        if fired.epoch != self.epoch {
            log::debug!("Dropping stale {:?}", fired.deferral);
            return;
        }
        match fired.deferral {
            Deferral::TimerTick => {
                if self.session.phase == GamePhase::Playing {
                    self.session.timer += 1;
                }
            }
            Deferral::ResolveAnswer { correct } => {
                self.handles.resolve = None;
                self.resolve_answer(correct);
            }
            Deferral::Refocus => {
                self.handles.refocus = None;
                if self.session.phase == GamePhase::Playing {
                    self.events.push(GameEvent::FocusInput);
                }
            }
            Deferral::RevealPlayAgain => {
                self.handles.reveal = None;
                if self.session.phase == GamePhase::Victory {
                    self.session.play_again_visible = true;
                    self.events.push(GameEvent::PlayAgainRevealed);
                }
            }
        }
    }

    fn resolve_answer(&mut self, correct: bool) {
        self.session.feedback = Feedback::None;
        self.session.user_answer.clear();
        self.session.is_processing = false;
        self.events.push(GameEvent::AnswerResolved { correct });

        if !correct && self.session.hearts == 0 {
            log::info!("Game over on level {}", self.session.level);
            self.leave_playing(GamePhase::GameOver);
            self.cue(Cue::GameOver);
            self.events.push(GameEvent::GameOver);
            return;
        }

        if self.session.is_last_question() {
            if self.session.level >= TOTAL_LEVELS {
                log::info!("Victory!");
                self.leave_playing(GamePhase::Victory);
                self.cue(Cue::Victory);
                self.handles.reveal = Some(self.timers.schedule_once(
                    VICTORY_REVEAL_DELAY_MS,
                    Deferral::RevealPlayAgain,
                    self.epoch,
                ));
                self.events.push(GameEvent::Victory);
            } else {
                let report = self.session.report();
                log::info!(
                    "Level {} complete: {} right, {} wrong, {}s",
                    report.level,
                    report.correct,
                    report.wrong,
                    report.seconds
                );
                self.leave_playing(GamePhase::LevelComplete);
                self.cue(Cue::LevelComplete);
                self.events.push(GameEvent::LevelComplete { report });
            }
            return;
        }

        self.session.current_index += 1;
        if let Some(old) = self.handles.refocus.take() {
            self.timers.cancel(old);
        }
        self.handles.refocus = Some(self.timers.schedule_once(
            REFOCUS_DELAY_MS,
            Deferral::Refocus,
            self.epoch,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::quiz::Question;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Resume,
        Play(Cue),
        StartLoop,
        StopLoop,
    }

    #[derive(Debug, Default)]
    struct RecordingAudio {
        calls: Vec<Call>,
    }

    impl RecordingAudio {
        fn cues(&self) -> Vec<Cue> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Play(cue) => Some(*cue),
                    _ => None,
                })
                .collect()
        }
    }

    impl AudioSink for RecordingAudio {
        fn request_resume(&mut self) {
            self.calls.push(Call::Resume);
        }
        fn play_cue(&mut self, cue: Cue) {
            self.calls.push(Call::Play(cue));
        }
        fn start_loop(&mut self) {
            self.calls.push(Call::StartLoop);
        }
        fn stop_loop(&mut self) {
            self.calls.push(Call::StopLoop);
        }
    }

    fn started() -> Arcade<RecordingAudio> {
        let mut arcade = Arcade::new(RecordingAudio::default(), 12345);
        assert!(arcade.start_game());
        arcade
    }

    /// Started game with a fixed question list
    fn with_questions(questions: Vec<Question>) -> Arcade<RecordingAudio> {
        let mut arcade = started();
        arcade.session.questions = questions;
        arcade
    }

    fn answer_current(arcade: &mut Arcade<RecordingAudio>) {
        let answer = arcade.session().current_question().unwrap().answer();
        assert!(arcade.submit_answer(&answer.to_string()));
        arcade.update(FEEDBACK_DELAY_MS);
    }

    #[test]
    fn test_start_game() {
        let arcade = started();
        let s = arcade.session();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.level, 1);
        assert_eq!(s.hearts, MAX_HEARTS);
        assert_eq!(s.questions.len(), 20);
        assert_eq!(s.current_index, 0);
        assert_eq!(s.timer, 0);
        assert_eq!(
            arcade.audio().calls[..2],
            [Call::Resume, Call::StartLoop]
        );
    }

    #[test]
    fn test_start_game_only_from_menu() {
        let mut arcade = started();
        assert!(!arcade.start_game());
    }

    #[test]
    fn test_start_events() {
        let mut arcade = started();
        assert_eq!(
            arcade.drain_events(),
            vec![GameEvent::LevelStarted { level: 1 }, GameEvent::FocusInput]
        );
        assert!(arcade.drain_events().is_empty());
    }

    #[test]
    fn test_correct_answer() {
        let mut arcade = with_questions(vec![Question::new(6, 7), Question::new(2, 3)]);
        assert!(arcade.submit_answer("42"));

        let s = arcade.session();
        assert_eq!(s.feedback, Feedback::Correct);
        assert_eq!(s.correct_count, 1);
        assert_eq!(s.hearts, MAX_HEARTS);
        assert!(s.is_processing);
        assert_eq!(arcade.audio().cues(), vec![Cue::Correct]);
    }

    #[test]
    fn test_wrong_answer() {
        let mut arcade = with_questions(vec![Question::new(6, 7), Question::new(2, 3)]);
        assert!(arcade.submit_answer("41"));

        let s = arcade.session();
        assert_eq!(s.feedback, Feedback::Wrong);
        assert_eq!(s.hearts, MAX_HEARTS - 1);
        assert_eq!(s.wrong_count, 1);
        assert_eq!(arcade.audio().cues(), vec![Cue::Wrong]);
    }

    #[test]
    fn test_invalid_submissions_ignored() {
        let mut arcade = with_questions(vec![Question::new(6, 7), Question::new(2, 3)]);
        assert!(!arcade.submit_answer(""));
        assert!(!arcade.submit_answer("4x"));
        assert!(!arcade.submit_answer("  "));

        let s = arcade.session();
        assert_eq!(s.feedback, Feedback::None);
        assert!(!s.is_processing);
        assert_eq!((s.correct_count, s.wrong_count), (0, 0));
    }

    #[test]
    fn test_answer_parsing_policy() {
        let mut arcade = with_questions(vec![Question::new(6, 7); 6]);

        // Surrounding whitespace, a leading plus, and leading zeros all parse to 42
        for raw in ["+42", " 42 ", "0042"] {
            assert!(arcade.submit_answer(raw), "{raw:?} should be taken");
            assert_eq!(arcade.session().feedback, Feedback::Correct, "{raw:?}");
            arcade.update(FEEDBACK_DELAY_MS);
        }
        assert_eq!(arcade.session().correct_count, 3);

        // Inner whitespace does not parse
        assert!(!arcade.submit_answer("4 2"));
        assert!(!arcade.session().is_processing);

        // A negative number is an answer, just never the right one
        assert!(arcade.submit_answer("-42"));
        assert_eq!(arcade.session().feedback, Feedback::Wrong);
        assert_eq!(arcade.session().hearts, MAX_HEARTS - 1);
    }

    #[test]
    fn test_clock_advances_with_nothing_scheduled() {
        let mut arcade = Arcade::new(NullAudio, 1);
        arcade.update(5_000);
        assert_eq!(arcade.now_ms(), 5_000);

        // Deferrals armed later are relative to the advanced clock
        assert!(arcade.start_game());
        arcade.update(TIMER_TICK_MS - 1);
        assert_eq!(arcade.session().timer, 0);
        arcade.update(1);
        assert_eq!(arcade.session().timer, 1);
        assert_eq!(arcade.now_ms(), 5_000 + TIMER_TICK_MS);
    }

    #[test]
    fn test_locked_during_feedback() {
        let mut arcade = with_questions(vec![Question::new(6, 7), Question::new(2, 3)]);
        assert!(arcade.submit_answer("41"));
        assert!(!arcade.submit_answer("42"));
        assert!(!arcade.append_digit(4));
        assert!(!arcade.backspace());
        assert_eq!(arcade.session().wrong_count, 1);
        assert_eq!(arcade.session().correct_count, 0);
    }

    #[test]
    fn test_advance_after_feedback_delay() {
        let mut arcade = with_questions(vec![Question::new(6, 7), Question::new(2, 3)]);
        arcade.drain_events();
        arcade.submit_answer("42");

        arcade.update(FEEDBACK_DELAY_MS - 1);
        assert_eq!(arcade.session().current_index, 0);
        assert_eq!(arcade.session().feedback, Feedback::Correct);

        arcade.update(1);
        let s = arcade.session();
        assert_eq!(s.current_index, 1);
        assert_eq!(s.feedback, Feedback::None);
        assert!(!s.is_processing);
        assert!(s.user_answer.is_empty());

        arcade.update(REFOCUS_DELAY_MS);
        assert_eq!(
            arcade.drain_events(),
            vec![
                GameEvent::AnswerResolved { correct: true },
                GameEvent::FocusInput
            ]
        );
    }

    #[test]
    fn test_last_heart_ends_game() {
        let mut arcade = with_questions(vec![Question::new(6, 7), Question::new(2, 3)]);
        arcade.session.hearts = 1;
        arcade.submit_answer("41");
        assert_eq!(arcade.session().hearts, 0);
        assert_eq!(arcade.session().phase, GamePhase::Playing);

        arcade.update(FEEDBACK_DELAY_MS);
        let s = arcade.session();
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.current_index, 0);
        assert_eq!(arcade.audio().cues(), vec![Cue::Wrong, Cue::GameOver]);
    }

    #[test]
    fn test_wrong_on_last_question_with_hearts_completes_level() {
        let mut arcade = with_questions(vec![Question::new(3, 3)]);
        arcade.session.level = 3;
        arcade.submit_answer("8");
        arcade.update(FEEDBACK_DELAY_MS);
        assert_eq!(arcade.session().phase, GamePhase::LevelComplete);
    }

    #[test]
    fn test_final_level_victory() {
        let mut arcade = with_questions(vec![Question::new(10, 9)]);
        arcade.session.level = TOTAL_LEVELS;
        answer_current(&mut arcade);

        assert_eq!(arcade.session().phase, GamePhase::Victory);
        assert!(!arcade.session().play_again_visible);
        assert_eq!(arcade.audio().cues(), vec![Cue::Correct, Cue::Victory]);

        arcade.update(VICTORY_REVEAL_DELAY_MS - 1);
        assert!(!arcade.session().play_again_visible);
        arcade.update(1);
        assert!(arcade.session().play_again_visible);
    }

    #[test]
    fn test_level_three_completes_then_next_level() {
        let mut arcade = with_questions(vec![Question::new(4, 2), Question::new(4, 5)]);
        arcade.session.level = 3;
        arcade.session.hearts = 2;
        answer_current(&mut arcade);
        answer_current(&mut arcade);

        assert_eq!(arcade.session().phase, GamePhase::LevelComplete);
        assert_eq!(
            arcade.audio().cues(),
            vec![Cue::Correct, Cue::Correct, Cue::LevelComplete]
        );

        assert!(arcade.next_level());
        let s = arcade.session();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.level, 4);
        assert_eq!(s.hearts, 3);
        assert_eq!(s.questions.len(), 50);
        assert_eq!((s.correct_count, s.wrong_count, s.timer), (0, 0, 0));
    }

    #[test]
    fn test_next_level_heart_bonus_caps() {
        let mut arcade = with_questions(vec![Question::new(2, 2)]);
        answer_current(&mut arcade);
        assert_eq!(arcade.session().hearts, MAX_HEARTS);
        arcade.next_level();
        assert_eq!(arcade.session().hearts, MAX_HEARTS);
        assert_eq!(arcade.session().level, 2);
    }

    #[test]
    fn test_restart_level_refills_hearts() {
        let mut arcade = with_questions(vec![Question::new(2, 2), Question::new(2, 4)]);
        arcade.session.level = 2;
        arcade.submit_answer("1");
        arcade.update(FEEDBACK_DELAY_MS);
        arcade.submit_answer("1");
        arcade.update(FEEDBACK_DELAY_MS);
        assert_eq!(arcade.session().phase, GamePhase::LevelComplete);
        assert_eq!(arcade.session().hearts, 1);

        assert!(arcade.restart_level());
        let s = arcade.session();
        assert_eq!(s.level, 2);
        assert_eq!(s.hearts, MAX_HEARTS);
        assert_eq!(s.questions.len(), 30);
    }

    #[test]
    fn test_level_commands_need_level_complete() {
        let mut arcade = started();
        assert!(!arcade.next_level());
        assert!(!arcade.restart_level());
        assert!(!arcade.restart_game());
    }

    #[test]
    fn test_restart_game_from_game_over() {
        let mut arcade = with_questions(vec![Question::new(6, 7), Question::new(2, 3)]);
        arcade.session.hearts = 1;
        arcade.submit_answer("0");
        arcade.update(FEEDBACK_DELAY_MS);
        assert_eq!(arcade.session().phase, GamePhase::GameOver);

        assert!(arcade.restart_game());
        let s = arcade.session();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.level, 1);
        assert_eq!(s.hearts, MAX_HEARTS);
        assert_eq!(s.questions.len(), 20);
    }

    #[test]
    fn test_restart_before_reveal_cancels_it() {
        let mut arcade = with_questions(vec![Question::new(10, 1)]);
        arcade.session.level = TOTAL_LEVELS;
        answer_current(&mut arcade);
        assert_eq!(arcade.session().phase, GamePhase::Victory);

        arcade.restart_game();
        arcade.drain_events();
        arcade.update(VICTORY_REVEAL_DELAY_MS * 2);
        assert!(!arcade.session().play_again_visible);
        assert!(!arcade.drain_events().contains(&GameEvent::PlayAgainRevealed));
    }

    #[test]
    fn test_timer_ticks_only_while_playing() {
        let mut arcade = with_questions(vec![Question::new(2, 2), Question::new(2, 3)]);
        arcade.update(3_000);
        assert_eq!(arcade.session().timer, 3);

        // Keeps running through the feedback window
        arcade.submit_answer("4");
        arcade.update(FEEDBACK_DELAY_MS);
        arcade.update(1_000 - FEEDBACK_DELAY_MS);
        assert_eq!(arcade.session().timer, 4);

        arcade.submit_answer("6");
        arcade.update(FEEDBACK_DELAY_MS);
        assert_eq!(arcade.session().phase, GamePhase::LevelComplete);
        let frozen = arcade.session().timer;
        arcade.update(10_000);
        assert_eq!(arcade.session().timer, frozen);
    }

    #[test]
    fn test_timer_resets_on_next_level() {
        let mut arcade = with_questions(vec![Question::new(2, 2)]);
        arcade.update(5_500);
        answer_current(&mut arcade);
        assert_eq!(arcade.session().timer, 6);

        arcade.next_level();
        assert_eq!(arcade.session().timer, 0);
        arcade.update(999);
        assert_eq!(arcade.session().timer, 0);
        arcade.update(1);
        assert_eq!(arcade.session().timer, 1);
    }

    #[test]
    fn test_stale_deferral_dropped() {
        let mut arcade = with_questions(vec![Question::new(2, 2), Question::new(2, 3)]);
        let old_epoch = arcade.epoch;
        arcade.timers.schedule_once(10, Deferral::ResolveAnswer { correct: false }, old_epoch - 1);
        arcade.update(10);
        assert_eq!(arcade.session().hearts, MAX_HEARTS);
        assert_eq!(arcade.session().current_index, 0);
    }

    #[test]
    fn test_keypad_editing() {
        let mut arcade = with_questions(vec![Question::new(6, 7), Question::new(2, 3)]);
        assert!(arcade.append_digit(4));
        assert!(arcade.append_digit(2));
        assert!(arcade.append_digit(0));
        assert!(!arcade.append_digit(1));
        assert_eq!(arcade.session().user_answer, "420");

        assert!(arcade.backspace());
        assert_eq!(arcade.session().user_answer, "42");
        assert!(!arcade.append_digit(10));

        assert!(arcade.press(PadKey::Submit));
        assert_eq!(arcade.session().feedback, Feedback::Correct);
        assert_eq!(
            arcade.audio().cues(),
            vec![
                Cue::Click,
                Cue::Click,
                Cue::Click,
                Cue::Click,
                Cue::Click,
                Cue::Click,
                Cue::Correct
            ]
        );
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut arcade = started();
        assert!(!arcade.backspace());
        assert!(arcade.session().user_answer.is_empty());
    }

    #[test]
    fn test_submit_empty_buffer_ignored() {
        let mut arcade = started();
        assert!(!arcade.submit());
        assert!(!arcade.session().is_processing);
    }

    #[test]
    fn test_editing_ignored_on_menu() {
        let mut arcade = Arcade::new(RecordingAudio::default(), 1);
        assert!(!arcade.append_digit(3));
        assert!(!arcade.submit_answer("3"));
        assert!(arcade.audio().calls.is_empty());
    }

    #[test]
    fn test_toggle_mute_twice() {
        let mut arcade = with_questions(vec![Question::new(6, 7), Question::new(2, 3)]);
        let before = arcade.audio().calls.len();

        assert!(arcade.toggle_mute());
        arcade.append_digit(4);
        arcade.append_digit(2);
        arcade.submit();
        assert_eq!(arcade.audio().calls[before..], [Call::StopLoop]);
        assert_eq!(arcade.session().feedback, Feedback::Correct);

        assert!(!arcade.toggle_mute());
        assert!(!arcade.is_muted());
        assert_eq!(arcade.audio().calls.last(), Some(&Call::StartLoop));
    }

    #[test]
    fn test_mute_on_menu_does_not_start_music() {
        let mut arcade = Arcade::new(RecordingAudio::default(), 1);
        arcade.toggle_mute();
        arcade.toggle_mute();
        assert_eq!(arcade.audio().calls, vec![Call::StopLoop]);
    }

    #[test]
    fn test_start_muted_skips_music() {
        let settings = Settings {
            start_muted: true,
            seed: Some(77),
            ..Settings::default()
        };
        let mut arcade = Arcade::with_settings(RecordingAudio::default(), &settings, 1);
        assert_eq!(arcade.seed(), 77);
        arcade.start_game();
        assert_eq!(arcade.audio().calls, vec![Call::Resume]);
        assert!(arcade.snapshot().muted);
    }

    #[test]
    fn test_full_run_to_victory() {
        let mut arcade = started();
        for level in 1..=TOTAL_LEVELS {
            assert_eq!(arcade.session().level, level);
            while arcade.session().phase == GamePhase::Playing {
                answer_current(&mut arcade);
            }
            if level < TOTAL_LEVELS {
                assert_eq!(arcade.session().phase, GamePhase::LevelComplete);
                arcade.next_level();
            }
        }
        assert_eq!(arcade.session().phase, GamePhase::Victory);
        assert_eq!(arcade.session().level, TOTAL_LEVELS);
    }
}
