//! Audio system using Web Audio API
//!
//! Procedurally generated cues and a chiptune loop - no external files needed!

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, Cue};
use crate::settings::Settings;

/// Background loop: one note per beat, square-wave arpeggio (C major / A minor)
const LOOP_NOTES: [f32; 16] = [
    261.63, 329.63, 392.00, 523.25, 392.00, 329.63, 261.63, 329.63, 220.00, 261.63, 329.63,
    440.00, 329.63, 261.63, 220.00, 261.63,
];
const LOOP_BEAT_MS: i32 = 200;

/// Web Audio implementation of `AudioSink`
pub struct WebAudio {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    /// Interval driving the background loop, with the closure it calls
    music: Option<(i32, Closure<dyn FnMut()>)>,
}

impl WebAudio {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            music_volume: settings.music_volume,
            music: None,
        }
    }

    fn sfx_level(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    // === Cue generators ===

    /// Key click - short tick
    fn play_click(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 800.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.04)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.05).ok();
    }

    /// Correct - two rising blips
    fn play_correct(ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 880.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Square) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Wrong - low buzz sliding down
    fn play_wrong(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Level complete - triumphant fanfare
    fn play_level_complete(ctx: &AudioContext, vol: f32) {
        for (i, freq) in [523.25, 659.25, 783.99, 1046.5].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.5).ok();
            }
        }
    }

    /// Game over - sad descending
    fn play_game_over(ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Victory - long celebratory run
    fn play_victory(ctx: &AudioContext, vol: f32) {
        let run = [523.25, 659.25, 783.99, 1046.5, 783.99, 1046.5, 1318.5];
        for (i, freq) in run.iter().enumerate() {
            let delay = i as f64 * 0.12;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }
    }
}

impl AudioSink for WebAudio {
    fn request_resume(&mut self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn play_cue(&mut self, cue: Cue) {
        let vol = self.sfx_level();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Click => Self::play_click(ctx, vol),
            Cue::Correct => Self::play_correct(ctx, vol),
            Cue::Wrong => Self::play_wrong(ctx, vol),
            Cue::LevelComplete => Self::play_level_complete(ctx, vol),
            Cue::GameOver => Self::play_game_over(ctx, vol),
            Cue::Victory => Self::play_victory(ctx, vol),
        }
    }

    fn start_loop(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Some(ctx) = self.ctx.clone() else { return };
        let vol = self.master_volume * self.music_volume;
        if vol <= 0.0 {
            return;
        }
        let Some(window) = web_sys::window() else { return };

        let mut step = 0usize;
        let closure = Closure::<dyn FnMut()>::new(move || {
            let freq = LOOP_NOTES[step % LOOP_NOTES.len()];
            step += 1;
            if let Some((osc, gain)) = create_osc(&ctx, freq, OscillatorType::Square) {
                let t = ctx.current_time();
                gain.gain().set_value_at_time(vol * 0.08, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, t + 0.18)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.19).ok();
            }
        });

        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            LOOP_BEAT_MS,
        ) {
            Ok(handle) => self.music = Some((handle, closure)),
            Err(e) => log::warn!("Failed to start music loop: {:?}", e),
        }
    }

    fn stop_loop(&mut self) {
        if let Some((handle, _closure)) = self.music.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}

impl Drop for WebAudio {
    fn drop(&mut self) {
        self.stop_loop();
    }
}

/// Create an oscillator with gain envelope
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}
