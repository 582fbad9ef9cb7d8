//! Game state and core simulation types
//!
//! Everything the round needs lives in `GameState`, so a seed plus a
//! sequence of inputs always reproduces the same game.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::guess::{GuessOutcome, GuessSlots};
use super::schedule::Scheduler;
use super::words;
use crate::{ConfigError, Tuning, balloon_xs};

/// Coarse stage of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Slingshot active, balloons left to pop
    Aiming,
    /// All balloons popped, typing the word
    Guessing,
    /// Round lost; waits for restart
    Failed(FailReason),
}

/// Why a round was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailReason {
    OutOfShots,
    OutOfChances,
}

/// A balloon carrying one letter of the secret word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    pub pos: Vec2,
    pub radius: f32,
    pub letter: char,
    /// Flipped once, on the first stone hit; never cleared until restart
    pub burst: bool,
}

/// The stone in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stone {
    pub pos: Vec2,
    /// px per tick
    pub vel: Vec2,
    pub radius: f32,
}

/// The slingshot pouch the player drags
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pouch {
    pub pos: Vec2,
    pub dragging: bool,
}

impl Pouch {
    pub fn at_rest(rest: Vec2) -> Self {
        Self {
            pos: rest,
            dragging: false,
        }
    }
}

/// Things that happened since the host last drained events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    StoneLaunched { vel: Vec2 },
    BalloonPopped { index: usize, letter: char },
    /// Stone left the playfield without hitting anything
    StoneLost,
    StageChanged(Stage),
    GuessCorrect,
    GuessWrong { chances_left: u32 },
    OutOfChances,
    Restarted,
}

/// RNG state wrapper for serialization
///
/// Each round draws from its own PCG stream, so restarts stay reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Renderable view of the playfield
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub balloons: &'a [Balloon],
    pub stone: Option<&'a Stone>,
    pub pouch: &'a Pouch,
    pub stage: Stage,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: Tuning,

    /// Uppercase secret word of the current round
    pub secret: String,
    /// Balloons in left-to-right order
    pub balloons: Vec<Balloon>,
    pub stone: Option<Stone>,
    pub pouch: Pouch,
    /// Letter of each popped balloon, indexed like `balloons`
    pub collected: Vec<Option<char>>,

    pub stage: Stage,
    pub shots_left: u32,
    pub guess_chances: u32,
    /// Extra guesses earned from leftover shots
    pub carried_chances: u32,
    pub guess: GuessSlots,
    /// Set once the word is guessed; the round is over
    pub solved: bool,
    pub last_outcome: Option<GuessOutcome>,

    pub schedule: Scheduler,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Rounds started, including the first
    pub round: u32,

    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            pouch: Pouch::at_rest(tuning.pouch_rest),
            shots_left: tuning.max_shots,
            guess_chances: tuning.base_guess_chances,
            tuning,
            secret: String::new(),
            balloons: Vec::new(),
            stone: None,
            collected: Vec::new(),
            stage: Stage::Aiming,
            carried_chances: 0,
            guess: GuessSlots::new(words::WORD_LEN),
            solved: false,
            last_outcome: None,
            schedule: Scheduler::new(),
            time_ticks: 0,
            round: 0,
            events: Vec::new(),
        };
        state.deal_round();
        state
    }

    /// Pick a word, scatter its letters over fresh balloons, reset counters
    pub(crate) fn deal_round(&mut self) {
        let mut rng = self.rng_state.to_rng();
        let word = words::pick_word(&mut rng);
        let letters = words::scramble(word, &mut rng);

        let t = &self.tuning;
        let xs = balloon_xs(letters.len(), t.playfield_width, t.balloon_radius);
        self.balloons = letters
            .iter()
            .zip(xs)
            .map(|(&letter, x)| Balloon {
                pos: Vec2::new(x, t.balloon_y),
                radius: t.balloon_radius,
                letter,
                burst: false,
            })
            .collect();

        self.secret = word.to_string();
        self.collected = vec![None; self.balloons.len()];
        self.stone = None;
        self.pouch = Pouch::at_rest(t.pouch_rest);
        self.stage = Stage::Aiming;
        self.shots_left = t.max_shots;
        self.guess_chances = t.base_guess_chances;
        self.carried_chances = 0;
        self.guess = GuessSlots::new(letters.len());
        self.solved = false;
        self.last_outcome = None;
        self.round += 1;
    }

    /// Start a new round. Only allowed once guessing has begun or the round failed.
    pub fn restart(&mut self) -> bool {
        if self.stage == Stage::Aiming {
            return false;
        }
        self.schedule.cancel_all();
        self.rng_state.stream += 1;
        self.deal_round();
        log::info!("Round {} started", self.round);
        self.events.push(GameEvent::Restarted);
        true
    }

    /// Number of popped balloons
    pub fn burst_count(&self) -> usize {
        self.balloons.iter().filter(|b| b.burst).count()
    }

    pub fn all_burst(&self) -> bool {
        self.balloons.iter().all(|b| b.burst)
    }

    /// A delayed stage change is waiting to fire
    pub fn transition_pending(&self) -> bool {
        self.schedule.has_pending()
    }

    /// Round over: solved or failed
    pub fn is_finished(&self) -> bool {
        self.solved || matches!(self.stage, Stage::Failed(_))
    }

    /// Shots fired this round
    pub fn shots_used(&self) -> u32 {
        self.tuning.max_shots.saturating_sub(self.shots_left)
    }

    /// View for the presentation layer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            balloons: &self.balloons,
            stone: self.stone.as_ref(),
            pouch: &self.pouch,
            stage: self.stage,
        }
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        if self.stage != stage {
            log::info!("Stage {:?} -> {:?}", self.stage, stage);
            self.stage = stage;
            self.events.push(GameEvent::StageChanged(stage));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_game_layout() {
        let state = GameState::new(12345);
        assert_eq!(state.stage, Stage::Aiming);
        assert_eq!(state.balloons.len(), BALLOON_COUNT);
        assert_eq!(state.collected, vec![None; BALLOON_COUNT]);
        assert_eq!(state.shots_left, MAX_SHOTS);
        assert_eq!(state.guess_chances, BASE_GUESS_CHANCES);
        assert_eq!(state.carried_chances, 0);
        assert!(state.stone.is_none());
        assert_eq!(state.pouch, Pouch::at_rest(POUCH_REST));
        assert!(state.balloons.iter().all(|b| !b.burst && b.pos.y == BALLOON_Y));
        assert!(words::WORDS.contains(&state.secret.as_str()));
    }

    #[test]
    fn test_balloon_letters_are_the_secret() {
        let state = GameState::new(9);
        let on_balloons = words::letter_key(state.balloons.iter().map(|b| b.letter));
        assert_eq!(on_balloons, words::letter_key(state.secret.chars()));
    }

    #[test]
    fn test_same_seed_same_round() {
        let a = GameState::new(777);
        let b = GameState::new(777);
        assert_eq!(a.secret, b.secret);
        assert_eq!(a.balloons, b.balloons);
    }

    #[test]
    fn test_restart_not_allowed_while_aiming() {
        let mut state = GameState::new(1);
        assert!(!state.restart());
        assert_eq!(state.round, 1);
    }

    #[test]
    fn test_rng_state_is_plain_numbers() {
        let rng_state = RngState { seed: 31, stream: 4 };
        let json = serde_json::to_string(&rng_state).unwrap();
        assert_eq!(json, r#"{"seed":31,"stream":4}"#);

        let back: RngState = serde_json::from_str(&json).unwrap();
        let a = words::pick_word(&mut rng_state.to_rng());
        let b = words::pick_word(&mut back.to_rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut state = GameState::new(1);
        state.stage = Stage::Failed(FailReason::OutOfShots);
        state.shots_left = 0;
        state.balloons[0].burst = true;
        state.collected[0] = Some(state.balloons[0].letter);

        assert!(state.restart());
        assert_eq!(state.stage, Stage::Aiming);
        assert_eq!(state.shots_left, MAX_SHOTS);
        assert_eq!(state.round, 2);
        assert_eq!(state.burst_count(), 0);
        assert!(state.collected.iter().all(Option::is_none));
        assert!(state.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let state = GameState::new(3);
        let snap = state.snapshot();
        assert_eq!(snap.balloons.len(), state.balloons.len());
        assert!(snap.stone.is_none());
        assert_eq!(snap.stage, Stage::Aiming);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"Aiming\""));
    }

    #[test]
    fn test_with_tuning_rejects_invalid() {
        let tuning = Tuning {
            max_shots: 0,
            ..Default::default()
        };
        assert!(GameState::with_tuning(1, tuning).is_err());
    }
}
