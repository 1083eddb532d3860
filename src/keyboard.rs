//! On-screen keyboard: layouts and the best feedback seen per letter.

use crate::feedback::LetterFeedback;

const ALPHABET_LEN: usize = 26;

/// Physical arrangement of the letter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Qwerty,
    Azerty,
}

impl Layout {
    /// Letter rows, top to bottom, in lowercase.
    #[must_use]
    pub fn rows(self) -> [&'static str; 3] {
        match self {
            Self::Qwerty => ["qwertyuiop", "asdfghjkl", "zxcvbnm"],
            Self::Azerty => ["azertyuiop", "qsdfghjklm", "wxcvbn"],
        }
    }
}

/// Best feedback seen for each letter across the guesses of one round.
///
/// Entries only ever move up the `Absent < Present < Correct` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    letters: [Option<LetterFeedback>; ALPHABET_LEN],
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn index(letter: char) -> Option<usize> {
        let lower = letter.to_ascii_lowercase();
        lower
            .is_ascii_lowercase()
            .then(|| (lower as u8 - b'a') as usize)
    }

    /// Feedback recorded for `letter`, or `None` if it has not been guessed.
    #[must_use]
    pub fn get(&self, letter: char) -> Option<LetterFeedback> {
        Self::index(letter).and_then(|i| self.letters[i])
    }

    /// Folds one submitted guess into the aggregate.
    pub fn record(&mut self, guess: &str, feedback: &[LetterFeedback]) {
        for (letter, &fb) in guess.chars().zip(feedback) {
            if let Some(i) = Self::index(letter) {
                let slot = &mut self.letters[i];
                if slot.is_none_or(|current| fb > current) {
                    *slot = Some(fb);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.letters = [None; ALPHABET_LEN];
    }
}
