//! Slingshot drag gesture
//!
//! Pointer down near the pouch grabs it, moves drag it (never further than
//! `max_pull` from rest), release fires the stone opposite the pull.

use glam::Vec2;

use super::state::{GameEvent, GameState, Pouch, Stage, Stone};
use crate::clamp_to_radius;

/// Where the pouch sits for a pointer at `pointer`
#[inline]
pub fn pouch_position(rest: Vec2, pointer: Vec2, max_pull: f32) -> Vec2 {
    rest + clamp_to_radius(pointer - rest, max_pull)
}

/// Launch velocity for a pouch released at `pouch`
#[inline]
pub fn launch_velocity(rest: Vec2, pouch: Vec2, scale: f32) -> Vec2 {
    -(pouch - rest) * scale
}

impl GameState {
    /// Whether a new shot may be taken right now
    pub fn can_launch(&self) -> bool {
        self.stage == Stage::Aiming
            && self.shots_left > 0
            && self.stone.is_none()
            && !self.transition_pending()
    }

    /// Pointer down. Grabs the pouch if the pointer is on it.
    pub fn drag_start(&mut self, pointer: Vec2) -> bool {
        if !self.can_launch() {
            return false;
        }
        if pointer.distance(self.pouch.pos) >= self.tuning.grab_radius {
            return false;
        }
        self.pouch.dragging = true;
        true
    }

    /// Pointer move while dragging
    pub fn drag_move(&mut self, pointer: Vec2) -> bool {
        if !self.pouch.dragging || self.stage != Stage::Aiming {
            return false;
        }
        let t = &self.tuning;
        self.pouch.pos = pouch_position(t.pouch_rest, pointer, t.max_pull);
        true
    }

    /// Pointer up (or leave/cancel). Fires the stone if the drag was live.
    pub fn drag_end(&mut self) -> bool {
        if !self.pouch.dragging {
            return false;
        }
        let rest = self.tuning.pouch_rest;
        let release = self.pouch.pos;
        self.pouch = Pouch::at_rest(rest);

        if !self.can_launch() {
            return false;
        }

        let vel = launch_velocity(rest, release, self.tuning.launch_scale);
        self.stone = Some(Stone {
            pos: release,
            vel,
            radius: self.tuning.stone_radius,
        });
        self.shots_left -= 1;
        log::debug!("Launched {vel} ({} shot(s) left)", self.shots_left);
        self.events.push(GameEvent::StoneLaunched { vel });
        true
    }

    /// Drag from the pouch to `pointer` and release in one go
    pub fn fling(&mut self, pointer: Vec2) -> bool {
        let grab = self.pouch.pos;
        self.drag_start(grab) && self.drag_move(pointer) && self.drag_end()
    }
}
