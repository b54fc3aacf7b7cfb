//! Secret word, guessed letters and the win/lose rule.

use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Words a puzzle is drawn from.
pub const WORDS: [&str; 8] = [
    "APTOS",
    "BLOCKCHAIN",
    "WALLET",
    "TRANSACTION",
    "MOVE",
    "NODE",
    "SMART",
    "CONTRACT",
];

/// Missed guesses that lose the game.
pub const MAX_MISTAKES: usize = 6;

/// Where a puzzle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum HangmanStatus {
    /// Letters remain and misses are left.
    #[display("Playing")]
    Playing,
    /// Every letter of the word is revealed.
    #[display("Solved")]
    Won,
    /// Six guesses missed.
    #[display("Hanged")]
    Lost,
}

/// Result of an accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// The letter is in the word.
    Hit {
        /// The guessed letter, uppercase.
        letter: char,
        /// How many times it occurs.
        count: usize,
    },
    /// The letter is not in the word.
    Miss {
        /// The guessed letter, uppercase.
        letter: char,
    },
}

/// A rejected guess or word. Rejection never changes the puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum HangmanError {
    /// Input is not an ASCII letter.
    #[display("{:?} is not a letter", _0)]
    NotALetter(char),
    /// The letter was guessed before.
    #[display("{} was already guessed", _0)]
    AlreadyGuessed(char),
    /// The puzzle is finished.
    #[display("Game is over: {}", _0)]
    GameOver(HangmanStatus),
    /// A secret word must be non-empty ASCII letters.
    #[display("{:?} is not a valid secret word", _0)]
    InvalidWord(String),
}

impl std::error::Error for HangmanError {}

/// One hangman puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hangman {
    word: String,
    guessed: BTreeSet<char>,
}

impl Hangman {
    /// Creates a puzzle for `word`, case-insensitive.
    pub fn new(word: &str) -> Result<Self, HangmanError> {
        let upper = word.trim().to_ascii_uppercase();
        if upper.is_empty() || !upper.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(HangmanError::InvalidWord(word.to_string()));
        }
        Ok(Self {
            word: upper,
            guessed: BTreeSet::new(),
        })
    }

    /// Creates a puzzle with a word drawn uniformly from [`WORDS`].
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            word: WORDS[rng.random_range(0..WORDS.len())].to_string(),
            guessed: BTreeSet::new(),
        }
    }

    /// The secret word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Letters guessed so far, hits and misses.
    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    /// Guessed letters that are not in the word.
    pub fn mistakes(&self) -> usize {
        self.guessed
            .iter()
            .filter(|c| !self.word.contains(**c))
            .count()
    }

    /// Misses left before the game is lost.
    pub fn remaining_mistakes(&self) -> usize {
        MAX_MISTAKES.saturating_sub(self.mistakes())
    }

    /// Solved, hanged, or still playing.
    pub fn status(&self) -> HangmanStatus {
        if self.word.chars().all(|c| self.guessed.contains(&c)) {
            HangmanStatus::Won
        } else if self.mistakes() >= MAX_MISTAKES {
            HangmanStatus::Lost
        } else {
            HangmanStatus::Playing
        }
    }

    /// The word with unguessed letters as `_`, space separated.
    pub fn masked(&self) -> String {
        self.word
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { '_' })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Guesses one letter, case-insensitive.
    #[instrument(level = "debug", skip(self), fields(masked = %self.masked()))]
    pub fn guess(&mut self, letter: char) -> Result<GuessOutcome, HangmanError> {
        let status = self.status();
        if status != HangmanStatus::Playing {
            return Err(HangmanError::GameOver(status));
        }
        if !letter.is_ascii_alphabetic() {
            return Err(HangmanError::NotALetter(letter));
        }

        let letter = letter.to_ascii_uppercase();
        if !self.guessed.insert(letter) {
            return Err(HangmanError::AlreadyGuessed(letter));
        }

        let count = self.word.chars().filter(|c| *c == letter).count();
        let outcome = if count > 0 {
            GuessOutcome::Hit { letter, count }
        } else {
            GuessOutcome::Miss { letter }
        };
        debug!(?outcome, mistakes = self.mistakes(), "Guess accepted");
        Ok(outcome)
    }

    /// Starts over with a fresh random word.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        *self = Self::random(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn puzzle(word: &str) -> Hangman {
        Hangman::new(word).unwrap()
    }

    #[test]
    fn test_new_validates_word() {
        assert_eq!(puzzle("move").word(), "MOVE");
        assert!(matches!(Hangman::new(""), Err(HangmanError::InvalidWord(_))));
        assert!(matches!(Hangman::new("no way"), Err(HangmanError::InvalidWord(_))));
    }

    #[test]
    fn test_hits_count_every_occurrence() {
        let mut game = puzzle("WALLET");
        assert_eq!(
            game.guess('l'),
            Ok(GuessOutcome::Hit {
                letter: 'L',
                count: 2
            })
        );
        assert_eq!(game.guess('z'), Ok(GuessOutcome::Miss { letter: 'Z' }));
        assert_eq!(game.masked(), "_ _ L L _ _");
        assert_eq!(game.mistakes(), 1);
        assert_eq!(game.remaining_mistakes(), 5);
    }

    #[test]
    fn test_rejected_guesses_change_nothing() {
        let mut game = puzzle("NODE");
        game.guess('N').unwrap();
        let before = game.clone();
        assert_eq!(game.guess('n'), Err(HangmanError::AlreadyGuessed('N')));
        assert_eq!(game.guess('3'), Err(HangmanError::NotALetter('3')));
        assert_eq!(game, before);
    }

    #[test]
    fn test_solving_wins() {
        let mut game = puzzle("NODE");
        for c in ['N', 'O', 'D'] {
            game.guess(c).unwrap();
            assert_eq!(game.status(), HangmanStatus::Playing);
        }
        game.guess('E').unwrap();
        assert_eq!(game.status(), HangmanStatus::Won);
        assert_eq!(
            game.guess('X'),
            Err(HangmanError::GameOver(HangmanStatus::Won))
        );
    }

    #[test]
    fn test_six_misses_lose() {
        let mut game = puzzle("NODE");
        for c in ['A', 'B', 'C', 'F', 'G'] {
            game.guess(c).unwrap();
        }
        assert_eq!(game.status(), HangmanStatus::Playing);
        game.guess('H').unwrap();
        assert_eq!(game.status(), HangmanStatus::Lost);
        assert_eq!(game.remaining_mistakes(), 0);
        assert_eq!(
            game.guess('N'),
            Err(HangmanError::GameOver(HangmanStatus::Lost))
        );
    }

    #[test]
    fn test_random_words_come_from_the_list() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let game = Hangman::random(&mut rng);
            assert!(WORDS.contains(&game.word()));
            assert!(game.guessed().is_empty());
        }
    }
}
