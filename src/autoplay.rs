//! Demo bot
//!
//! Plays a round through the same operations a player uses. Shots are planned
//! by simulating candidate pulls with the real stone step, so a planned hit
//! is the hit the tick will produce. Guesses are built-in words that are
//! anagrams of the collected letters.

use glam::Vec2;

use crate::consts::SIM_DT;
use crate::sim::words::{self, WORDS};
use crate::sim::{
    Balloon, GameState, GuessOutcome, Stage, Stone, StoneStep, launch_velocity, pouch_position,
    step_stone, tick,
};
use crate::Tuning;

/// Pull directions tried per ring (pulls point downward, so shots go up)
const ANGLE_STEPS: u32 = 90;
/// Pull lengths tried, as fractions of the max pull
const PULL_FRACTIONS: [f32; 4] = [1.0, 0.875, 0.75, 0.625];
/// Give up on a simulated flight after this many ticks
const MAX_FLIGHT_TICKS: u32 = 2_000;

/// Key that toggles the demo bot in the browser
pub const DEMO_TOGGLE_KEY: &str = "d";

/// Whether a key press toggles the demo bot
///
/// Keys typed into a text field never do, so a `d` in a guess stays a letter.
pub fn is_demo_toggle(key: &str, repeat: bool, in_text_field: bool) -> bool {
    key == DEMO_TOGGLE_KEY && !repeat && !in_text_field
}

/// A planned shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// Pointer position to drag the pouch to
    pub pointer: Vec2,
    /// Balloon the stone will pop
    pub target: usize,
    /// Ticks until the pop
    pub ticks: u32,
}

/// Fly a stone with the simulation's own step until it hits or is lost
pub fn simulate(tuning: &Tuning, balloons: &[Balloon], pos: Vec2, vel: Vec2) -> (StoneStep, u32) {
    let mut stone = Stone {
        pos,
        vel,
        radius: tuning.stone_radius,
    };
    for n in 1..=MAX_FLIGHT_TICKS {
        match step_stone(&mut stone, balloons, tuning) {
            StoneStep::Flying => {}
            outcome => return (outcome, n),
        }
    }
    (StoneStep::Lost, MAX_FLIGHT_TICKS)
}

/// Search pulls for one that pops a balloon, preferring the lowest index
pub fn plan_shot(state: &GameState) -> Option<Shot> {
    let t = &state.tuning;
    let mut best: Option<Shot> = None;

    for fraction in PULL_FRACTIONS {
        let len = t.max_pull * fraction;
        for step in 0..=ANGLE_STEPS {
            let angle = std::f32::consts::PI * step as f32 / ANGLE_STEPS as f32;
            let pointer = t.pouch_rest + Vec2::from_angle(angle) * len;
            let pouch = pouch_position(t.pouch_rest, pointer, t.max_pull);
            let vel = launch_velocity(t.pouch_rest, pouch, t.launch_scale);

            if let (StoneStep::Hit(target), ticks) = simulate(t, &state.balloons, pouch, vel) {
                let better = best.is_none_or(|b| target < b.target);
                if better {
                    best = Some(Shot {
                        pointer,
                        target,
                        ticks,
                    });
                }
            }
        }
    }
    best
}

/// Built-in words whose letters match the collected ones
pub fn candidate_words(collected: &[Option<char>]) -> Vec<&'static str> {
    if collected.iter().any(Option::is_none) {
        return Vec::new();
    }
    let key = words::letter_key(collected.iter().flatten().copied());
    WORDS
        .iter()
        .copied()
        .filter(|w| words::letter_key(w.chars()) == key)
        .collect()
}

/// What the bot did on one call to `act`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Shoot(Shot),
    /// No pull pops anything; shoot straight up anyway
    Blind,
    Guess(GuessOutcome),
    Wait,
}

/// Summary of a finished round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub word: String,
    pub solved: bool,
    pub shots_used: u32,
    pub carried: u32,
    pub guesses_used: u32,
    pub ticks: u64,
}

/// Bot state: the guesses already spent this round
#[derive(Debug, Clone, Default)]
pub struct Autoplayer {
    tried: Vec<String>,
    round: u32,
}

impl Autoplayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take at most one action
    pub fn act(&mut self, state: &mut GameState) -> Action {
        if state.round != self.round {
            self.round = state.round;
            self.tried.clear();
        }

        match state.stage {
            Stage::Aiming if state.can_launch() => {
                if let Some(shot) = plan_shot(state) {
                    if state.fling(shot.pointer) {
                        return Action::Shoot(shot);
                    }
                }
                let up = state.tuning.pouch_rest + Vec2::new(0.0, state.tuning.max_pull);
                state.fling(up);
                Action::Blind
            }
            Stage::Guessing if state.accepts_guess() && !state.transition_pending() => {
                let guess = candidate_words(&state.collected)
                    .into_iter()
                    .map(str::to_string)
                    .find(|w| !self.tried.contains(w))
                    .unwrap_or_else(|| state.collected.iter().flatten().collect());
                for (i, c) in guess.chars().enumerate() {
                    state.set_slot(i, &c.to_string());
                }
                self.tried.push(guess);
                Action::Guess(state.submit_slots())
            }
            _ => Action::Wait,
        }
    }

    /// Play until the round is over or `max_ticks` pass
    pub fn play_round(&mut self, state: &mut GameState, max_ticks: u64) -> RoundSummary {
        let start = state.time_ticks;
        while !state.is_finished() && state.time_ticks - start < max_ticks {
            self.act(state);
            tick(state, SIM_DT);
        }
        RoundSummary {
            word: state.secret.clone(),
            solved: state.solved,
            shots_used: state.shots_used(),
            carried: state.carried_chances,
            guesses_used: self.tried.len() as u32,
            ticks: state.time_ticks - start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_plan_hits_what_it_promises() {
        let mut state = GameState::new(21);
        let shot = plan_shot(&state).expect("a reachable balloon");
        assert!(state.fling(shot.pointer));
        for _ in 0..shot.ticks {
            tick(&mut state, SIM_DT);
        }
        assert!(state.balloons[shot.target].burst);
        assert_eq!(state.burst_count(), 1);
    }

    #[test]
    fn test_every_balloon_is_reachable() {
        let state = GameState::new(4);
        for target in 0..state.balloons.len() {
            let mut only = state.clone();
            for (i, b) in only.balloons.iter_mut().enumerate() {
                b.burst = i != target;
            }
            let shot = plan_shot(&only).expect("reachable");
            assert_eq!(shot.target, target);
        }
    }

    #[test]
    fn test_candidates_are_anagrams() {
        let collected: Vec<Option<char>> = "TNALP".chars().map(Some).collect();
        assert_eq!(candidate_words(&collected), vec!["PLANT"]);

        let partial = vec![Some('P'), None, Some('A'), Some('N'), Some('T')];
        assert!(candidate_words(&partial).is_empty());
    }

    #[test]
    fn test_bot_solves_rounds() {
        for seed in [1, 2, 3, 17, 99] {
            let mut state = GameState::new(seed);
            let mut bot = Autoplayer::new();
            let summary = bot.play_round(&mut state, 10_000);
            assert!(summary.solved, "seed {seed}: {summary:?}");
            assert_eq!(summary.shots_used, BALLOON_COUNT as u32);
            assert_eq!(summary.carried, MAX_CARRYOVER);
            assert_eq!(summary.word, state.secret);
        }
    }

    #[test]
    fn test_demo_key_ignored_while_typing_a_guess() {
        assert!(is_demo_toggle("d", false, false));
        assert!(!is_demo_toggle("d", false, true));
        assert!(!is_demo_toggle("d", true, false));
        assert!(!is_demo_toggle("D", false, false));

        // Typing DREAM into the guess row leaves the player in control
        let mut state = GameState::new(5);
        state.stage = Stage::Guessing;
        let mut demo: Option<Autoplayer> = None;
        for c in "dream".chars() {
            if is_demo_toggle(&c.to_string(), false, true) {
                demo = Some(Autoplayer::new());
            }
            assert!(state.type_letter(c));
        }
        assert!(demo.is_none());
        assert_eq!(state.guess.joined(), "DREAM");
        assert!(!state.solved);
        assert_eq!(state.last_outcome, None);
    }

    #[test]
    fn test_bot_follows_restart() {
        let mut state = GameState::new(5);
        let mut bot = Autoplayer::new();
        bot.play_round(&mut state, 10_000);
        assert!(state.restart());
        let summary = bot.play_round(&mut state, 10_000);
        assert!(summary.solved);
        assert_eq!(summary.guesses_used, 1);
    }
}
