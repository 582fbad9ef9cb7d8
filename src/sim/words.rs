//! Built-in secret words and letter helpers

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// Every secret word has this many letters (one balloon each)
pub const WORD_LEN: usize = 5;

/// Popular five-letter words
pub const WORDS: &[&str] = &[
    "PLANT", "BRAVE", "SWEET", "GRACE", "SHINE", "EARTH", "SMART", "TIGER", //
    "CLOUD", "MUSIC", "PEACH", "BRAIN", "LUCKY", "NOBLE", "SMILE", "WATER", //
    "STONE", "LIGHT", "DREAM", "PEARL", "BLOOM", "GIANT", "PRIZE", "STORY", //
    "YOUTH", "TREND", "UNITY", "VIVID", "WORLD", "ZEBRA", "QUEST", "ROBIN",
];

/// Pick a secret word
pub fn pick_word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or(WORDS[0])
}

/// The letters of `word` in shuffled order
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> Vec<char> {
    let mut letters: Vec<char> = word.chars().collect();
    letters.shuffle(rng);
    letters
}

/// Uppercase ASCII letters of `input`, everything else dropped
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Sorted uppercase letters, for multiset comparisons
pub fn letter_key(letters: impl IntoIterator<Item = char>) -> Vec<char> {
    let mut key: Vec<char> = letters.into_iter().map(|c| c.to_ascii_uppercase()).collect();
    key.sort_unstable();
    key
}
