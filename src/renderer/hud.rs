//! HUD text shared by the browser page and the CLI

use crate::sim::{FailReason, GameState, GuessOutcome, Stage};

/// Element ids and selectors the browser host looks up
pub mod dom {
    pub const CANVAS: &str = "canvas";
    pub const GUESS_FORM: &str = "guess-form";
    /// One input per balloon, in balloon order
    pub const GUESS_SLOT_SELECTOR: &str = ".guess-slot";
    pub const RESTART_BUTTON: &str = "restart-btn";
    pub const HUD_COUNTERS: &str = "hud-counters";
    pub const HUD_LETTERS: &str = "hud-letters";
    pub const RESULT: &str = "result";
}

/// Result line under the playfield, if there is one
pub fn status_message(state: &GameState) -> Option<&'static str> {
    if state.solved {
        return Some("🎉 Correct! Well done!");
    }
    match (state.stage, state.last_outcome) {
        (Stage::Failed(FailReason::OutOfShots), _) => Some("Mission Failed! Out of shots."),
        (Stage::Failed(FailReason::OutOfChances), _) | (_, Some(GuessOutcome::OutOfChances)) => {
            Some("Mission Failed! Out of chances.")
        }
        (Stage::Guessing, Some(GuessOutcome::Wrong { .. })) => Some("❌ Try again!"),
        _ => None,
    }
}

/// Counter line above the playfield
pub fn counters(state: &GameState) -> String {
    match state.stage {
        Stage::Aiming => format!(
            "Shots left: {}  Letters: {}/{}",
            state.shots_left,
            state.burst_count(),
            state.balloons.len()
        ),
        Stage::Guessing if state.carried_chances > 0 => format!(
            "Guesses left: {} (Carried over: {})",
            state.guess_chances, state.carried_chances
        ),
        Stage::Guessing => format!("Guesses left: {}", state.guess_chances),
        Stage::Failed(_) => format!("The word was {}", state.secret),
    }
}

/// Collected letters in balloon order, `_` for the ones still up
pub fn collected_line(state: &GameState) -> String {
    state
        .collected
        .iter()
        .map(|c| c.unwrap_or('_').to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
