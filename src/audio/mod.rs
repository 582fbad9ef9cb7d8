//! Sound effects
//!
//! Procedurally generated, so no audio files are needed. Each effect is a
//! short list of oscillator tones; `web::AudioManager` plays them through the
//! Web Audio API.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use crate::sim::{FailReason, GameEvent, Stage};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Stone leaves the pouch
    Launch,
    /// Balloon popped
    Pop,
    /// Stone flew off without hitting anything
    Miss,
    /// Guess was wrong, chances remain
    WrongGuess,
    /// Word guessed
    Success,
    /// Round failed
    Fail,
}

/// Oscillator shape (mirrors the Web Audio oscillator types we use)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator note with an exponential decay envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    /// Hz at note start
    pub freq: f32,
    /// Hz the pitch glides to over the note (same as `freq` for a flat note)
    pub freq_end: f32,
    /// Seconds after the effect starts
    pub delay: f64,
    /// Seconds until the envelope has decayed
    pub duration: f64,
    /// Peak gain before volume scaling
    pub gain: f32,
}

impl Tone {
    const fn flat(wave: Wave, freq: f32, delay: f64, duration: f64, gain: f32) -> Self {
        Self {
            wave,
            freq,
            freq_end: freq,
            delay,
            duration,
            gain,
        }
    }

    const fn glide(wave: Wave, freq: f32, freq_end: f32, duration: f64, gain: f32) -> Self {
        Self {
            wave,
            freq,
            freq_end,
            delay: 0.0,
            duration,
            gain,
        }
    }
}

impl SoundEffect {
    /// The sound a sim event makes, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::StoneLaunched { .. } => Some(SoundEffect::Launch),
            GameEvent::BalloonPopped { .. } => Some(SoundEffect::Pop),
            GameEvent::StoneLost => Some(SoundEffect::Miss),
            GameEvent::GuessWrong { .. } => Some(SoundEffect::WrongGuess),
            GameEvent::GuessCorrect => Some(SoundEffect::Success),
            GameEvent::OutOfChances => Some(SoundEffect::Fail),
            GameEvent::StageChanged(Stage::Failed(FailReason::OutOfShots)) => {
                Some(SoundEffect::Fail)
            }
            // Out of chances already played its sound when the guess went in
            GameEvent::StageChanged(_) | GameEvent::Restarted => None,
        }
    }

    /// Notes that make up the effect
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Launch => LAUNCH,
            SoundEffect::Pop => POP,
            SoundEffect::Miss => MISS,
            SoundEffect::WrongGuess => WRONG_GUESS,
            SoundEffect::Success => SUCCESS,
            SoundEffect::Fail => FAIL,
        }
    }
}

use Wave::*;

/// Whoosh up
const LAUNCH: &[Tone] = &[Tone::glide(Triangle, 200.0, 600.0, 0.2, 0.3)];
/// Short bright snap over a low thump
const POP: &[Tone] = &[
    Tone::glide(Square, 1400.0, 300.0, 0.06, 0.25),
    Tone::glide(Sine, 180.0, 60.0, 0.1, 0.5),
];
const MISS: &[Tone] = &[Tone::glide(Sine, 150.0, 60.0, 0.12, 0.3)];
const WRONG_GUESS: &[Tone] = &[
    Tone::flat(Sawtooth, 300.0, 0.0, 0.15, 0.2),
    Tone::flat(Sawtooth, 220.0, 0.15, 0.25, 0.2),
];
/// Rising arpeggio
const SUCCESS: &[Tone] = &[
    Tone::flat(Triangle, 500.0, 0.0, 0.25, 0.25),
    Tone::flat(Triangle, 600.0, 0.08, 0.25, 0.25),
    Tone::flat(Triangle, 800.0, 0.16, 0.25, 0.25),
    Tone::flat(Triangle, 1000.0, 0.24, 0.4, 0.25),
];
/// Sad descending
const FAIL: &[Tone] = &[
    Tone::flat(Sine, 400.0, 0.0, 0.3, 0.3),
    Tone::flat(Sine, 350.0, 0.2, 0.3, 0.3),
    Tone::flat(Sine, 300.0, 0.4, 0.3, 0.3),
    Tone::flat(Sine, 200.0, 0.6, 0.5, 0.3),
];
