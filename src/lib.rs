// Library interface for wordle-game
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod keyboard;
pub mod logging;
pub mod session;
pub mod tui;
pub mod wordbank;

/// Letters in every word.
pub const WORD_LENGTH: usize = 5;
/// Attempts allowed per round.
pub const MAX_GUESSES: usize = 6;

// Re-export commonly used items for easier testing
pub use error::{DictionaryError, GuessError};
pub use feedback::{LetterFeedback, evaluate_guess};
pub use game_state::{BoardView, GameInterface, KeySymbol, Notice, UserAction, game_loop};
pub use session::{GameSession, GameStatus, GuessOutcome, SubmittedGuess};
pub use wordbank::{
    Dictionary, RandomPicker, SecretPicker, load_embedded_wordbank, load_wordbank_from_file,
    load_wordbank_from_str,
};
