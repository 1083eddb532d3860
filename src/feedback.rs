//! Per-letter evaluation of a guess against the secret word.

use crate::WORD_LENGTH;

/// Classification of one letter of a submitted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LetterFeedback {
    /// Letter not in the secret word (gray)
    Absent,
    /// Letter occurs in the secret word at another position (yellow)
    Present,
    /// Letter in the correct position (green)
    Correct,
}

impl LetterFeedback {
    /// Single-character mark used by the console front-end.
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '.',
        }
    }
}

/// Evaluates each position of `guess` independently against `secret`.
///
/// Repeated letters are not accounted for: a guess letter is `Present` whenever
/// the secret contains it anywhere, even if that occurrence is already matched
/// `Correct` at another position.
#[must_use]
pub fn evaluate_guess(guess: &str, secret: &str) -> [LetterFeedback; WORD_LENGTH] {
    let mut feedback = [LetterFeedback::Absent; WORD_LENGTH];
    let secret_bytes = secret.as_bytes();
    for (i, &letter) in guess.as_bytes().iter().take(WORD_LENGTH).enumerate() {
        feedback[i] = if secret_bytes.get(i) == Some(&letter) {
            LetterFeedback::Correct
        } else if secret_bytes.contains(&letter) {
            LetterFeedback::Present
        } else {
            LetterFeedback::Absent
        };
    }
    feedback
}

/// True when every position is `Correct`.
#[must_use]
pub fn is_solved(feedback: &[LetterFeedback]) -> bool {
    feedback.iter().all(|f| *f == LetterFeedback::Correct)
}
