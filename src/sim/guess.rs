//! Guess entry and submission
//!
//! The guess is typed into a row of single-letter slots. Typing fills the
//! focused slot and moves focus right; deleting on an empty slot moves focus
//! left. Anything that is not a letter is dropped silently.

use serde::{Deserialize, Serialize};

use super::schedule::Transition;
use super::state::{FailReason, GameEvent, GameState, Stage};
use super::words;

/// Fixed-length row of letter slots with a focus cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessSlots {
    letters: Vec<Option<char>>,
    cursor: usize,
}

impl GuessSlots {
    pub fn new(len: usize) -> Self {
        Self {
            letters: vec![None; len],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Index of the focused slot
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn letters(&self) -> &[Option<char>] {
        &self.letters
    }

    pub fn is_complete(&self) -> bool {
        self.letters.iter().all(Option::is_some)
    }

    /// Filled slots joined in order
    pub fn joined(&self) -> String {
        self.letters.iter().flatten().collect()
    }

    /// Move focus to `index` (ignored when out of range)
    pub fn focus(&mut self, index: usize) {
        if index < self.letters.len() {
            self.cursor = index;
        }
    }

    /// Type into the focused slot. Returns false if `c` is not a letter.
    pub fn type_letter(&mut self, c: char) -> bool {
        let index = self.cursor;
        self.put(index, c)
    }

    /// Mirror a text field's value into slot `index`
    ///
    /// The last letter wins, so typing over a filled field replaces it. An
    /// empty value clears the slot.
    pub fn set_slot(&mut self, index: usize, text: &str) -> bool {
        if index >= self.letters.len() {
            return false;
        }
        if text.is_empty() {
            self.letters[index] = None;
            self.cursor = index;
            return true;
        }
        match text.chars().rev().find(|c| c.is_ascii_alphabetic()) {
            Some(c) => self.put(index, c),
            None => false,
        }
    }

    /// Delete: clear the focused slot, or step back when it is already empty
    pub fn backspace(&mut self) {
        let Some(slot) = self.letters.get_mut(self.cursor) else {
            return;
        };
        if slot.is_some() {
            *slot = None;
        } else if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn clear(&mut self) {
        self.letters.fill(None);
        self.cursor = 0;
    }

    fn put(&mut self, index: usize, c: char) -> bool {
        if !c.is_ascii_alphabetic() || index >= self.letters.len() {
            return false;
        }
        self.letters[index] = Some(c.to_ascii_uppercase());
        if index + 1 < self.letters.len() {
            self.cursor = index + 1;
        } else {
            self.cursor = index;
        }
        true
    }
}

/// Result of a guess submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    Correct,
    /// Wrong, but chances remain
    Wrong { chances_left: u32 },
    /// Wrong on the last chance; the round fails shortly
    OutOfChances,
    /// Not accepted: not guessing, already solved, or no chances left
    Ignored,
}

impl GameState {
    /// Whether the guess row accepts input right now
    pub fn accepts_guess(&self) -> bool {
        self.stage == Stage::Guessing && !self.solved && self.guess_chances > 0
    }

    pub fn type_letter(&mut self, c: char) -> bool {
        self.accepts_guess() && self.guess.type_letter(c)
    }

    pub fn set_slot(&mut self, index: usize, text: &str) -> bool {
        self.accepts_guess() && self.guess.set_slot(index, text)
    }

    pub fn focus_slot(&mut self, index: usize) {
        if self.accepts_guess() {
            self.guess.focus(index);
        }
    }

    pub fn backspace(&mut self) {
        if self.accepts_guess() {
            self.guess.backspace();
        }
    }

    /// Submit whatever is in the slots
    pub fn submit_slots(&mut self) -> GuessOutcome {
        let guess = self.guess.joined();
        self.submit_guess(&guess)
    }

    /// Compare `guess` with the secret word
    ///
    /// Case-insensitive, non-letters stripped, length must match exactly.
    pub fn submit_guess(&mut self, guess: &str) -> GuessOutcome {
        if !self.accepts_guess() {
            return GuessOutcome::Ignored;
        }

        let outcome = if words::normalize(guess) == self.secret {
            self.solved = true;
            log::info!("Solved '{}' with {} chance(s) left", self.secret, self.guess_chances);
            self.events.push(GameEvent::GuessCorrect);
            GuessOutcome::Correct
        } else if self.guess_chances > 1 {
            self.guess_chances -= 1;
            log::debug!("Wrong guess, {} chance(s) left", self.guess_chances);
            self.events.push(GameEvent::GuessWrong {
                chances_left: self.guess_chances,
            });
            GuessOutcome::Wrong {
                chances_left: self.guess_chances,
            }
        } else {
            self.guess_chances = 0;
            log::info!("Out of chances, word was '{}'", self.secret);
            self.events.push(GameEvent::OutOfChances);
            let delay = self.tuning.out_of_chances_delay;
            self.schedule
                .schedule(Transition::EnterFailed(FailReason::OutOfChances), delay);
            GuessOutcome::OutOfChances
        };

        self.last_outcome = Some(outcome);
        outcome
    }
}
