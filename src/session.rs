//! The guess-evaluation and game-progress state machine.
//!
//! # State Machine
//! - `InProgress` → `Won` | `Lost` | `Revealed`
//! - `reset()` returns any state to `InProgress` with a fresh secret word.

use crate::error::GuessError;
use crate::feedback::{LetterFeedback, evaluate_guess, is_solved};
use crate::keyboard::KeyboardState;
use crate::wordbank::{Dictionary, RandomPicker, SecretPicker};
use crate::{MAX_GUESSES, WORD_LENGTH, debug_log, info_log};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
    Revealed,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// One accepted guess and how each of its letters scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedGuess {
    pub word: String,
    pub feedback: [LetterFeedback; WORD_LENGTH],
}

/// What `submit_guess` hands back for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    /// Row the guess was written to.
    pub row: usize,
    pub feedback: [LetterFeedback; WORD_LENGTH],
    pub status: GameStatus,
}

pub struct GameSession<P = RandomPicker> {
    dictionary: Dictionary,
    picker: P,
    secret: String,
    buffer: String,
    current_row: usize,
    history: Vec<SubmittedGuess>,
    keyboard: KeyboardState,
    status: GameStatus,
    rounds: usize,
}

impl GameSession<RandomPicker> {
    /// Starts a round with a uniformly random secret word.
    #[must_use]
    pub fn new(dictionary: Dictionary) -> Self {
        Self::with_picker(dictionary, RandomPicker)
    }
}

impl<P: SecretPicker> GameSession<P> {
    #[must_use]
    pub fn with_picker(dictionary: Dictionary, mut picker: P) -> Self {
        let secret = picker.pick(&dictionary).to_string();
        info_log!("New session with {} words", dictionary.len());
        debug_log!("Secret word drawn: {}", secret);
        Self {
            dictionary,
            picker,
            secret,
            buffer: String::with_capacity(WORD_LENGTH),
            current_row: 0,
            history: Vec::with_capacity(MAX_GUESSES),
            keyboard: KeyboardState::new(),
            status: GameStatus::InProgress,
            rounds: 1,
        }
    }

    /// Types one letter into the guess buffer. Ignored when the round is over,
    /// the buffer is full or `ch` is not an ASCII letter.
    pub fn append_letter(&mut self, ch: char) -> bool {
        if self.status.is_terminal()
            || !ch.is_ascii_alphabetic()
            || self.buffer.len() >= WORD_LENGTH
        {
            return false;
        }
        self.buffer.push(ch.to_ascii_lowercase());
        true
    }

    /// Removes the last typed letter, if any.
    pub fn delete_letter(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.buffer.pop().is_some()
    }

    /// Evaluates the buffer as a guess for the current row.
    ///
    /// Rejected guesses leave the session untouched, buffer included.
    pub fn submit_guess(&mut self) -> Result<GuessOutcome, GuessError> {
        if self.status.is_terminal() {
            return Err(GuessError::GameOver);
        }
        if self.buffer.len() != WORD_LENGTH {
            return Err(GuessError::IncompleteGuess);
        }
        if !self.dictionary.contains(&self.buffer) {
            info_log!("Rejected unknown word '{}'", self.buffer);
            return Err(GuessError::UnknownWord(self.buffer.clone()));
        }

        let feedback = evaluate_guess(&self.buffer, &self.secret);
        let row = self.current_row;
        self.keyboard.record(&self.buffer, &feedback);
        self.history.push(SubmittedGuess {
            word: self.buffer.clone(),
            feedback,
        });

        if is_solved(&feedback) {
            self.status = GameStatus::Won;
        } else if row + 1 == MAX_GUESSES {
            self.current_row = MAX_GUESSES;
            self.status = GameStatus::Lost;
        } else {
            self.current_row += 1;
            self.buffer.clear();
        }
        info_log!("Guess on row {} scored, status now {:?}", row, self.status);

        Ok(GuessOutcome {
            row,
            feedback,
            status: self.status,
        })
    }

    /// Ends the round and discloses the secret word. Returns `None` and does
    /// nothing if the round is already over.
    pub fn reveal_answer(&mut self) -> Option<&str> {
        if self.status.is_terminal() {
            return None;
        }
        self.status = GameStatus::Revealed;
        info_log!("Answer revealed on row {}", self.current_row);
        Some(self.secret.as_str())
    }

    /// Starts a new round with a freshly drawn secret word.
    pub fn reset(&mut self) {
        self.secret = self.picker.pick(&self.dictionary).to_string();
        self.buffer.clear();
        self.history.clear();
        self.keyboard.clear();
        self.current_row = 0;
        self.status = GameStatus::InProgress;
        self.rounds += 1;
        info_log!("Round {} started", self.rounds);
        debug_log!("Secret word drawn: {}", self.secret);
    }

    /// Text to show once the round is over.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Won => Some(format!(
                "Well done! Solved in {} of {MAX_GUESSES}.",
                self.history.len()
            )),
            GameStatus::Lost | GameStatus::Revealed => {
                Some(format!("The word was: {}", self.secret.to_uppercase()))
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn current_row(&self) -> usize {
        self.current_row
    }

    #[must_use]
    pub fn history(&self) -> &[SubmittedGuess] {
        &self.history
    }

    #[must_use]
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Number of rounds started in this session, the first included.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    #[cfg(test)]
    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::LetterFeedback::{Absent, Correct, Present};

    /// Hands out secrets from a fixed list, cycling.
    struct ScriptedPicker {
        secrets: Vec<&'static str>,
        next: usize,
    }

    impl ScriptedPicker {
        fn new(secrets: &[&'static str]) -> Self {
            Self {
                secrets: secrets.to_vec(),
                next: 0,
            }
        }
    }

    impl SecretPicker for ScriptedPicker {
        fn pick<'a>(&mut self, dictionary: &'a Dictionary) -> &'a str {
            let wanted = self.secrets[self.next % self.secrets.len()];
            self.next += 1;
            dictionary
                .words()
                .iter()
                .find(|w| w.as_str() == wanted)
                .unwrap()
        }
    }

    fn session(secrets: &[&'static str]) -> GameSession<ScriptedPicker> {
        let dict = Dictionary::from_words([
            "apple", "grape", "mango", "lemon", "melon", "peach", "lilac", "berry",
        ])
        .unwrap();
        GameSession::with_picker(dict, ScriptedPicker::new(secrets))
    }

    fn type_word<P: SecretPicker>(session: &mut GameSession<P>, word: &str) {
        for c in word.chars() {
            session.append_letter(c);
        }
    }

    fn guess<P: SecretPicker>(
        session: &mut GameSession<P>,
        word: &str,
    ) -> Result<GuessOutcome, GuessError> {
        while session.delete_letter() {}
        type_word(session, word);
        session.submit_guess()
    }

    #[test]
    fn test_new_session_state() {
        let s = session(&["apple"]);
        assert_eq!(s.status(), GameStatus::InProgress);
        assert_eq!(s.current_row(), 0);
        assert_eq!(s.buffer(), "");
        assert!(s.history().is_empty());
        assert_eq!(s.secret(), "apple");
        assert_eq!(s.message(), None);
        assert_eq!(s.rounds(), 1);
    }

    #[test]
    fn test_append_letter_lowercases_and_clamps() {
        let mut s = session(&["apple"]);
        assert!(s.append_letter('A'));
        type_word(&mut s, "pplex");
        assert_eq!(s.buffer(), "apple");
        assert!(!s.append_letter('z'));
        assert_eq!(s.buffer().len(), WORD_LENGTH);
    }

    #[test]
    fn test_append_letter_rejects_non_letters() {
        let mut s = session(&["apple"]);
        assert!(!s.append_letter('3'));
        assert!(!s.append_letter(' '));
        assert!(!s.append_letter('é'));
        assert_eq!(s.buffer(), "");
    }

    #[test]
    fn test_delete_letter() {
        let mut s = session(&["apple"]);
        assert!(!s.delete_letter());
        type_word(&mut s, "ap");
        assert!(s.delete_letter());
        assert_eq!(s.buffer(), "a");
    }

    #[test]
    fn test_incomplete_guess_rejected() {
        let mut s = session(&["apple"]);
        type_word(&mut s, "appl");
        assert_eq!(s.submit_guess(), Err(GuessError::IncompleteGuess));
        assert_eq!(s.buffer(), "appl");
        assert_eq!(s.current_row(), 0);
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_unknown_word_leaves_state_unchanged() {
        let mut s = session(&["apple"]);
        guess(&mut s, "grape").unwrap();
        type_word(&mut s, "zzzzz");
        assert_eq!(
            s.submit_guess(),
            Err(GuessError::UnknownWord("zzzzz".to_string()))
        );
        assert_eq!(s.buffer(), "zzzzz");
        assert_eq!(s.current_row(), 1);
        assert_eq!(s.status(), GameStatus::InProgress);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.keyboard().get('z'), None);
    }

    #[test]
    fn test_grape_against_apple_advances_row() {
        let mut s = session(&["apple"]);
        let outcome = guess(&mut s, "grape").unwrap();
        assert_eq!(outcome.row, 0);
        assert_eq!(outcome.feedback, [Absent, Absent, Present, Present, Correct]);
        assert_eq!(outcome.status, GameStatus::InProgress);
        assert_eq!(s.current_row(), 1);
        assert_eq!(s.buffer(), "");
        assert_eq!(s.history()[0].word, "grape");
    }

    #[test]
    fn test_exact_guess_wins() {
        let mut s = session(&["apple"]);
        let outcome = guess(&mut s, "apple").unwrap();
        assert_eq!(outcome.feedback, [Correct; WORD_LENGTH]);
        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(s.current_row(), 0);
        assert_eq!(
            s.message().as_deref(),
            Some("Well done! Solved in 1 of 6.")
        );
    }

    #[test]
    fn test_win_on_last_row() {
        let mut s = session(&["apple"]);
        for word in ["grape", "mango", "lemon", "melon", "peach"] {
            guess(&mut s, word).unwrap();
        }
        assert_eq!(s.current_row(), MAX_GUESSES - 1);
        let outcome = guess(&mut s, "apple").unwrap();
        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(outcome.row, MAX_GUESSES - 1);
    }

    #[test]
    fn test_sixth_wrong_guess_loses() {
        let mut s = session(&["apple"]);
        for word in ["grape", "mango", "lemon", "melon", "peach"] {
            let outcome = guess(&mut s, word).unwrap();
            assert_eq!(outcome.status, GameStatus::InProgress);
            assert!(s.current_row() < MAX_GUESSES);
        }
        assert_eq!(s.current_row(), 5);
        let outcome = guess(&mut s, "berry").unwrap();
        assert_eq!(outcome.status, GameStatus::Lost);
        assert_eq!(s.current_row(), MAX_GUESSES);
        assert_eq!(s.message().as_deref(), Some("The word was: APPLE"));
    }

    #[test]
    fn test_repeated_guesses_are_allowed() {
        let mut s = session(&["apple"]);
        guess(&mut s, "grape").unwrap();
        guess(&mut s, "grape").unwrap();
        assert_eq!(s.current_row(), 2);
    }

    #[test]
    fn test_terminal_status_blocks_input() {
        let mut s = session(&["apple"]);
        guess(&mut s, "apple").unwrap();
        assert!(!s.append_letter('a'));
        assert!(!s.delete_letter());
        assert_eq!(s.submit_guess(), Err(GuessError::GameOver));
        assert_eq!(s.reveal_answer(), None);
        assert_eq!(s.status(), GameStatus::Won);
    }

    #[test]
    fn test_reveal_answer() {
        let mut s = session(&["mango"]);
        type_word(&mut s, "apple");
        assert_eq!(s.reveal_answer(), Some("mango"));
        assert_eq!(s.status(), GameStatus::Revealed);
        // The pending buffer is never evaluated.
        assert!(s.history().is_empty());
        assert_eq!(s.message().as_deref(), Some("The word was: MANGO"));
        assert_eq!(s.reveal_answer(), None);
    }

    #[test]
    fn test_reset_from_every_status() {
        let mut s = session(&["apple", "grape"]);

        // In progress
        type_word(&mut s, "gra");
        s.reset();
        assert_eq!(s.secret(), "grape");

        // Won
        guess(&mut s, "grape").unwrap();
        assert_eq!(s.status(), GameStatus::Won);
        s.reset();
        assert_eq!(s.status(), GameStatus::InProgress);

        // Revealed
        s.reveal_answer();
        s.reset();

        // Lost
        for word in ["lemon", "melon", "peach", "lilac", "berry", "mango"] {
            guess(&mut s, word).unwrap();
        }
        assert_eq!(s.status(), GameStatus::Lost);
        s.reset();

        assert_eq!(s.status(), GameStatus::InProgress);
        assert_eq!(s.current_row(), 0);
        assert_eq!(s.buffer(), "");
        assert!(s.history().is_empty());
        assert_eq!(s.keyboard(), &KeyboardState::new());
        assert_eq!(s.rounds(), 5);
    }

    #[test]
    fn test_keyboard_tracks_best_feedback() {
        let mut s = session(&["apple"]);
        guess(&mut s, "grape").unwrap();
        assert_eq!(s.keyboard().get('a'), Some(Present));
        guess(&mut s, "lilac").unwrap();
        assert_eq!(s.keyboard().get('l'), Some(Present));
        assert_eq!(s.keyboard().get('e'), Some(Correct));
        assert_eq!(s.keyboard().get('g'), Some(Absent));
    }
}
