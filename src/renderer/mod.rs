//! Presentation layer
//!
//! Maps a `Snapshot` onto a 2D canvas. The sim never depends on anything in
//! here; the host feeds events in and calls `render` once per frame.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod hud;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;

use crate::Tuning;

/// Colors, matching the page stylesheet
pub mod palette {
    pub const BALLOON: &str = "#5bc0eb";
    pub const BALLOON_POPPED: &str = "#ffe066";
    pub const OUTLINE: &str = "#333";
    pub const FRAME: &str = "#654321";
    pub const BAND: &str = "#b5651d";
    pub const POUCH: &str = "#888";
    pub const STONE: &str = "#333";
}

/// Slingshot arm tips relative to the pouch rest point
pub const ANCHOR_OFFSET: Vec2 = Vec2::new(70.0, -30.0);
/// Drawn pouch radius
pub const POUCH_DRAW_RADIUS: f32 = 16.0;

/// Seconds a pop ring stays visible
pub const POP_RING_LIFETIME: f32 = 0.35;

/// Expanding ring drawn where a balloon popped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopRing {
    pub pos: Vec2,
    pub base_radius: f32,
    pub age: f32,
}

impl PopRing {
    pub fn new(pos: Vec2, base_radius: f32) -> Self {
        Self {
            pos,
            base_radius,
            age: 0.0,
        }
    }

    /// 0 at birth, 1 when expired
    pub fn progress(&self) -> f32 {
        (self.age / POP_RING_LIFETIME).clamp(0.0, 1.0)
    }

    pub fn radius(&self) -> f32 {
        self.base_radius * (1.0 + 0.6 * self.progress())
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }

    pub fn is_alive(&self) -> bool {
        self.age < POP_RING_LIFETIME
    }
}

/// Left and right arm tips for a pouch resting at `rest`
pub fn anchors(rest: Vec2) -> (Vec2, Vec2) {
    (
        rest + Vec2::new(-ANCHOR_OFFSET.x, ANCHOR_OFFSET.y),
        rest + ANCHOR_OFFSET,
    )
}

/// Where the slingshot is drawn, taken from the round's tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slingshot {
    pub rest: Vec2,
    pub left: Vec2,
    pub right: Vec2,
    /// Radius of the stone sitting in the pouch
    pub stone_radius: f32,
}

impl Slingshot {
    pub fn new(tuning: &Tuning) -> Self {
        let (left, right) = anchors(tuning.pouch_rest);
        Self {
            rest: tuning.pouch_rest,
            left,
            right,
            stone_radius: tuning.stone_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_ring_fades_and_grows() {
        let mut ring = PopRing::new(Vec2::ZERO, 36.0);
        assert_eq!(ring.alpha(), 1.0);
        assert_eq!(ring.radius(), 36.0);

        ring.age = POP_RING_LIFETIME / 2.0;
        assert!(ring.alpha() > 0.0 && ring.alpha() < 1.0);
        assert!(ring.radius() > 36.0);

        ring.age = POP_RING_LIFETIME;
        assert!(!ring.is_alive());
        assert_eq!(ring.alpha(), 0.0);
    }

    #[test]
    fn test_slingshot_follows_tuning() {
        let tuning = Tuning {
            stone_radius: 20.0,
            pouch_rest: Vec2::new(150.0, 300.0),
            ..Default::default()
        };
        let sling = Slingshot::new(&tuning);
        assert_eq!(sling.stone_radius, 20.0);
        assert_eq!(sling.rest, tuning.pouch_rest);
        assert_eq!((sling.left, sling.right), anchors(tuning.pouch_rest));

        // The pouch stone matches the stone a launch creates
        let mut state = crate::sim::GameState::with_tuning(1, tuning).unwrap();
        assert!(state.fling(sling.rest + Vec2::new(0.0, 40.0)));
        assert_eq!(state.stone.map(|s| s.radius), Some(sling.stone_radius));
    }

    #[test]
    fn test_anchors_straddle_rest() {
        let rest = Vec2::new(190.0, 290.0);
        let (l, r) = anchors(rest);
        assert_eq!(l, Vec2::new(120.0, 260.0));
        assert_eq!(r, Vec2::new(260.0, 260.0));
    }
}
