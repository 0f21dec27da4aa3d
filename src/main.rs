//! Multiplication Arcade entry point
//!
//! Handles platform-specific initialization and drives the quiz core: DOM
//! wiring and a requestAnimationFrame clock on the web, a line-based terminal
//! runner natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent};

    use multiplication_arcade::audio::WebAudio;
    use multiplication_arcade::consts::MAX_HEARTS;
    use multiplication_arcade::input::{KeyCommand, PadKey};
    use multiplication_arcade::quiz::{Arcade, Feedback, GameEvent, GamePhase, LevelReport};
    use multiplication_arcade::{Settings, format_clock};

    /// Game instance holding all state
    struct Game {
        arcade: Arcade<WebAudio>,
        last_time: f64,
        /// Sub-millisecond remainder carried between frames
        carry_ms: f64,
        last_report: Option<LevelReport>,
    }

    impl Game {
        fn new(settings: &Settings, seed: u64) -> Self {
            Self {
                arcade: Arcade::with_settings(WebAudio::new(settings), settings, seed),
                last_time: 0.0,
                carry_ms: 0.0,
                last_report: None,
            }
        }

        /// Advance the quiz clock by real elapsed time. No clamping: the level
        /// clock measures wall time.
        fn update(&mut self, time: f64) {
            if self.last_time > 0.0 {
                let elapsed = (time - self.last_time).max(0.0) + self.carry_ms;
                let whole = elapsed.floor();
                self.carry_ms = elapsed - whole;
                self.arcade.update(whole as u64);
            }
            self.last_time = time;
        }

        /// Apply queued core events to the page
        fn handle_events(&mut self, document: &Document) {
            for event in self.arcade.drain_events() {
                match event {
                    GameEvent::FocusInput => {
                        if let Some(el) = document
                            .get_element_by_id("answer")
                            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                        {
                            let _ = el.focus();
                        }
                    }
                    GameEvent::LevelComplete { report } => self.last_report = Some(report),
                    GameEvent::LevelStarted { level } => {
                        log::info!("Level {} on screen", level);
                    }
                    _ => {}
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let snap = self.arcade.snapshot();

            set_visible(document, "menu", snap.phase == GamePhase::Menu);
            set_visible(document, "play", snap.phase == GamePhase::Playing);
            set_visible(document, "level-complete", snap.phase == GamePhase::LevelComplete);
            set_visible(document, "game-over", snap.phase == GamePhase::GameOver);
            set_visible(document, "victory", snap.phase == GamePhase::Victory);
            set_visible(document, "play-again-btn", snap.play_again_visible);

            set_text(document, "hud-level", &snap.level.to_string());
            let hearts: String = (0..MAX_HEARTS)
                .map(|i| if i < snap.hearts { '♥' } else { '♡' })
                .collect();
            set_text(document, "hud-hearts", &hearts);
            set_text(document, "hud-timer", &format_clock(snap.timer));
            set_text(
                document,
                "hud-progress",
                &format!("{}/{}", snap.question_number, snap.question_total),
            );
            set_text(document, "mute-btn", if snap.muted { "🔇" } else { "🔊" });

            if let Some(question) = snap.question {
                set_text(document, "question", &format!("{} = ?", question));
            }
            set_text(document, "answer", &snap.user_answer);

            if let Some(el) = document.get_element_by_id("feedback") {
                let (class, text) = match snap.feedback {
                    Feedback::None => ("feedback hidden", ""),
                    Feedback::Correct => ("feedback correct", "Correct!"),
                    Feedback::Wrong => ("feedback wrong", "Oops!"),
                };
                let _ = el.set_attribute("class", class);
                el.set_text_content(Some(text));
            }

            if let Some(report) = self.last_report {
                set_text(document, "lc-level", &report.level.to_string());
                set_text(document, "lc-correct", &report.correct.to_string());
                set_text(document, "lc-wrong", &report.wrong.to_string());
                set_text(document, "lc-time", &format_clock(report.seconds));
                set_text(document, "lc-accuracy", &format!("{}%", report.accuracy_percent()));
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Multiplication Arcade starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(&settings, seed)));
        log::info!("Game initialized with seed: {}", game.borrow().arcade.seed());

        setup_buttons(&document, game.clone());
        setup_keyboard(game.clone());

        game.borrow().update_hud(&document);
        request_animation_frame(game);

        log::info!("Multiplication Arcade running!");
    }

    /// Wire a button click to an arcade command
    fn on_click(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        mut action: impl FnMut(&mut Arcade<WebAudio>) + 'static,
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut game.borrow_mut().arcade);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "start-btn", game.clone(), |a| {
            a.start_game();
        });
        on_click(document, "next-level-btn", game.clone(), |a| {
            a.next_level();
        });
        on_click(document, "restart-level-btn", game.clone(), |a| {
            a.restart_level();
        });
        on_click(document, "restart-game-btn", game.clone(), |a| {
            a.restart_game();
        });
        on_click(document, "play-again-btn", game.clone(), |a| {
            a.restart_game();
        });
        on_click(document, "mute-btn", game.clone(), |a| {
            a.toggle_mute();
        });

        // Number pad
        for digit in 0..=9u8 {
            on_click(document, &format!("key-{}", digit), game.clone(), move |a| {
                a.press(PadKey::Digit(digit));
            });
        }
        on_click(document, "key-back", game.clone(), |a| {
            a.press(PadKey::Backspace);
        });
        on_click(document, "key-enter", game, |a| {
            a.press(PadKey::Submit);
        });
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.repeat() {
                return;
            }
            if let Some(cmd) = KeyCommand::from_key(&event.key()) {
                if cmd.apply(&mut game.borrow_mut().arcade) {
                    event.prevent_default();
                }
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let mut g = game.borrow_mut();
            g.update(time);
            g.handle_events(&document);
            g.update_hud(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Multiplication Arcade (native) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufRead, Write};
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use multiplication_arcade::consts::{FEEDBACK_DELAY_MS, REFOCUS_DELAY_MS};
    use multiplication_arcade::quiz::{Arcade, Feedback, GamePhase, Snapshot};
    use multiplication_arcade::{NullAudio, Settings, format_clock};

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }

    fn prompt(snap: &Snapshot) -> String {
        match snap.phase {
            GamePhase::Menu => "Press enter to start".to_string(),
            GamePhase::Playing => match snap.question {
                Some(q) => format!(
                    "[L{} {} {}/{} hearts {}] {} = ",
                    snap.level,
                    format_clock(snap.timer),
                    snap.question_number,
                    snap.question_total,
                    snap.hearts,
                    q
                ),
                None => String::new(),
            },
            GamePhase::LevelComplete => format!(
                "Level {} complete! {} right, {} wrong. (n)ext level or (r)estart level: ",
                snap.level, snap.correct_count, snap.wrong_count
            ),
            GamePhase::GameOver => "Game over. (g) to play again: ".to_string(),
            GamePhase::Victory => "You beat all the levels! (g) to play again: ".to_string(),
        }
    }

    pub fn run() {
        let settings = Settings::load();
        let mut arcade = Arcade::with_settings(NullAudio, &settings, clock_seed());
        log::info!("Seed: {}", arcade.seed());

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut last = Instant::now();

        loop {
            print!("{}", prompt(&arcade.snapshot()));
            if stdout.flush().is_err() {
                return;
            }

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            }
            let elapsed = last.elapsed().as_millis() as u64;
            last = Instant::now();
            arcade.update(elapsed);
            log::debug!("Clock at {} ms", arcade.now_ms());

            let line = line.trim();
            match (arcade.session().phase, line) {
                (_, "q") => return,
                (_, "m") => {
                    let muted = arcade.toggle_mute();
                    println!("{}", if muted { "Muted" } else { "Unmuted" });
                }
                (GamePhase::Menu, _) => {
                    arcade.start_game();
                }
                (GamePhase::LevelComplete, "n") => {
                    arcade.next_level();
                }
                (GamePhase::LevelComplete, "r") => {
                    arcade.restart_level();
                }
                (GamePhase::GameOver | GamePhase::Victory, "g") => {
                    arcade.restart_game();
                }
                (GamePhase::Playing, answer) => {
                    if arcade.submit_answer(answer) {
                        match arcade.session().feedback {
                            Feedback::Correct => println!("Correct!"),
                            Feedback::Wrong => println!(
                                "Oops! {}",
                                arcade
                                    .session()
                                    .current_question()
                                    .map(|q| format!("{} = {}", q, q.answer()))
                                    .unwrap_or_default()
                            ),
                            Feedback::None => {}
                        }
                        // Play out the feedback window rather than waiting for it
                        arcade.update(FEEDBACK_DELAY_MS + REFOCUS_DELAY_MS);
                    }
                }
                _ => {}
            }
            arcade.drain_events();
        }
    }
}
