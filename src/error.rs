use thiserror::Error;

use crate::WORD_LENGTH;

/// Reasons a submitted guess is turned away. None of these end the round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("guess must be exactly {} letters", WORD_LENGTH)]
    IncompleteGuess,
    #[error("unknown word: {0}")]
    UnknownWord(String),
    #[error("the round is over, start a new game")]
    GameOver,
}

/// Failures while loading the word list at start-up.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("could not read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("word list is not a JSON array of strings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("word list contains no usable {}-letter words", WORD_LENGTH)]
    Empty,
}
