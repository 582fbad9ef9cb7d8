//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (balloon index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod guess;
pub mod launcher;
pub mod schedule;
pub mod state;
pub mod tick;
pub mod words;

pub use collision::{circles_overlap, first_hit};
pub use guess::{GuessOutcome, GuessSlots};
pub use launcher::{launch_velocity, pouch_position};
pub use schedule::{Scheduler, TimerToken, Transition};
pub use state::{
    Balloon, FailReason, GameEvent, GameState, Pouch, RngState, Snapshot, Stage, Stone,
};
pub use tick::{StoneStep, step_stone, tick};
