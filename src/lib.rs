//! Sniffer - a slingshot word-guessing game
//!
//! Core modules:
//! - `sim`: Deterministic game core (physics, collisions, stages, guessing)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences and configuration loading
//! - `autoplay`: Bot that plays a round through the public input operations
//! - `renderer`: Canvas 2D drawing and HUD text
//! - `audio`: Procedural Web Audio sound effects

pub mod audio;
pub mod autoplay;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (one animation frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (origin top-left, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 380.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    /// One balloon per letter of the secret word
    pub const BALLOON_COUNT: usize = crate::sim::words::WORD_LEN;
    pub const BALLOON_RADIUS: f32 = 36.0;
    pub const BALLOON_Y: f32 = 90.0;

    pub const STONE_RADIUS: f32 = 12.0;

    /// Slingshot pouch at rest, between the two arms
    pub const POUCH_REST: Vec2 = Vec2::new(PLAYFIELD_WIDTH / 2.0, 290.0);
    /// Pointer must land this close to the pouch to start a drag
    pub const POUCH_GRAB_RADIUS: f32 = 30.0;
    /// Maximum pull distance from rest
    pub const MAX_PULL: f32 = 80.0;
    /// Launch velocity per pixel of pull (px/tick)
    pub const LAUNCH_SCALE: f32 = 0.25;
    /// Added to vertical velocity every tick (px/tick²)
    pub const GRAVITY: f32 = 0.5;

    pub const MAX_SHOTS: u32 = 7;
    pub const BASE_GUESS_CHANCES: u32 = 2;
    /// Cap on leftover shots converted into extra guesses
    pub const MAX_CARRYOVER: u32 = 2;

    /// Delays (seconds) so the last pop / wrong guess can render first
    pub const GUESS_STAGE_DELAY: f32 = 0.6;
    pub const OUT_OF_SHOTS_DELAY: f32 = 0.4;
    pub const OUT_OF_CHANCES_DELAY: f32 = 1.2;
}

/// Horizontal centers for `count` balloons spread edge to edge across `width`
pub fn balloon_xs(count: usize, width: f32, radius: f32) -> Vec<f32> {
    if count <= 1 {
        return vec![width / 2.0; count];
    }
    let spacing = (width - 2.0 * radius) / (count - 1) as f32;
    (0..count).map(|i| spacing * i as f32 + radius).collect()
}

/// Rescale `v` so its length is at most `max_len`, keeping its direction
#[inline]
pub fn clamp_to_radius(v: Vec2, max_len: f32) -> Vec2 {
    let len = v.length();
    if len > max_len && len > 0.0 {
        v * (max_len / len)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balloon_xs_span_playfield() {
        let xs = balloon_xs(5, 380.0, 36.0);
        assert_eq!(xs.len(), 5);
        assert!((xs[0] - 36.0).abs() < 1e-4);
        assert!((xs[4] - 344.0).abs() < 1e-4);
        assert!((xs[2] - 190.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_preserves_direction() {
        let v = Vec2::new(300.0, 400.0);
        let c = clamp_to_radius(v, 80.0);
        assert!((c.length() - 80.0).abs() < 1e-3);
        assert!((c.x / c.y - 0.75).abs() < 1e-4);

        // Short vectors pass through untouched
        let short = Vec2::new(10.0, -20.0);
        assert_eq!(clamp_to_radius(short, 80.0), short);
    }
}
