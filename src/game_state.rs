use crate::error::GuessError;
use crate::keyboard::KeyboardState;
use crate::session::{GameSession, GameStatus, SubmittedGuess};
use crate::wordbank::SecretPicker;
use crate::{debug_log, info_log};

/// A discrete key symbol; each maps to exactly one session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySymbol {
    Letter(char),
    Delete,
    Submit,
    Reveal,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Key(KeySymbol),
    /// Draw the board again without touching the session.
    Redraw,
    Quit,
}

/// One-line message shown to the player after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A guess was turned away; the player keeps editing.
    Rejected(String),
    /// The round ended (won, lost or revealed).
    RoundOver(String),
    Info(String),
}

impl Notice {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Rejected(text) | Self::RoundOver(text) | Self::Info(text) => text,
        }
    }
}

/// Everything a front-end needs to redraw the board.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub history: &'a [SubmittedGuess],
    pub buffer: &'a str,
    pub current_row: usize,
    pub status: GameStatus,
    pub keyboard: &'a KeyboardState,
    /// 1-based number of the round being played.
    pub round: usize,
}

impl<'a> BoardView<'a> {
    pub fn from_session<P: SecretPicker>(session: &'a GameSession<P>) -> Self {
        Self {
            history: session.history(),
            buffer: session.buffer(),
            current_row: session.current_row(),
            status: session.status(),
            keyboard: session.keyboard(),
            round: session.rounds(),
        }
    }
}

/// Front-end seam: something that can draw the board and produce actions.
pub trait GameInterface {
    /// Redraw the board. `notice` is a one-line message for the player, such
    /// as a rejected guess or the end-of-round text.
    fn render(&mut self, view: &BoardView<'_>, notice: Option<&Notice>);

    /// Next action, or `None` when nothing usable arrived this time.
    fn read_action(&mut self) -> Option<UserAction>;
}

/// Applies one key to the session and returns the notice to display, if any.
pub fn apply_key<P: SecretPicker>(session: &mut GameSession<P>, key: KeySymbol) -> Option<Notice> {
    match key {
        KeySymbol::Letter(c) => {
            session.append_letter(c);
            None
        }
        KeySymbol::Delete => {
            session.delete_letter();
            None
        }
        KeySymbol::Submit => match session.submit_guess() {
            Ok(outcome) => {
                debug_log!("apply_key() - Guess scored: {:?}", outcome);
                session.message().map(Notice::RoundOver)
            }
            Err(GuessError::GameOver) => session.message().map(Notice::RoundOver),
            Err(e) => Some(Notice::Rejected(capitalize(&e.to_string()))),
        },
        KeySymbol::Reveal => {
            session.reveal_answer();
            session.message().map(Notice::RoundOver)
        }
        KeySymbol::Reset => {
            session.reset();
            Some(Notice::Info(format!("Round {} started.", session.rounds())))
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drives the session until the interface asks to quit.
///
/// Returns the number of rounds that were started.
pub fn game_loop<P, I>(session: &mut GameSession<P>, interface: &mut I) -> usize
where
    P: SecretPicker,
    I: GameInterface + ?Sized,
{
    info_log!("game_loop() - Starting");
    let mut notice: Option<Notice> = None;
    interface.render(&BoardView::from_session(session), None);

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - Action received: {:?}", action);

        match action {
            UserAction::Quit => {
                info_log!("game_loop() - Quit after {} rounds", session.rounds());
                break;
            }
            UserAction::Redraw => {
                interface.render(&BoardView::from_session(session), notice.as_ref());
            }
            UserAction::Key(key) => {
                notice = apply_key(session, key);
                interface.render(&BoardView::from_session(session), notice.as_ref());
            }
        }
    }

    session.rounds()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::Dictionary;
    use std::collections::VecDeque;

    struct FirstWord;

    impl SecretPicker for FirstWord {
        fn pick<'a>(&mut self, dictionary: &'a Dictionary) -> &'a str {
            &dictionary.words()[0]
        }
    }

    /// Replays a fixed action list and records every notice rendered.
    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        notices: Vec<Option<Notice>>,
        statuses: Vec<GameStatus>,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<Option<UserAction>>) -> Self {
            Self {
                actions: actions.into(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn render(&mut self, view: &BoardView<'_>, notice: Option<&Notice>) {
            self.notices.push(notice.cloned());
            self.statuses.push(view.status);
        }

        fn read_action(&mut self) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Quit))
        }
    }

    fn session() -> GameSession<FirstWord> {
        let dict = Dictionary::from_words(["apple", "grape", "mango"]).unwrap();
        GameSession::with_picker(dict, FirstWord)
    }

    fn keys(word: &str) -> Vec<Option<UserAction>> {
        word.chars()
            .map(|c| Some(UserAction::Key(KeySymbol::Letter(c))))
            .collect()
    }

    #[test]
    fn test_game_loop_immediate_quit() {
        let mut s = session();
        let mut ui = ScriptedInterface::new(vec![Some(UserAction::Quit)]);
        assert_eq!(game_loop(&mut s, &mut ui), 1);
        assert_eq!(ui.notices, vec![None]);
    }

    #[test]
    fn test_game_loop_skips_empty_polls() {
        let mut s = session();
        let mut actions = vec![None, None];
        actions.extend(keys("a"));
        let mut ui = ScriptedInterface::new(actions);
        game_loop(&mut s, &mut ui);
        assert_eq!(ui.notices.len(), 2);
        assert_eq!(s.buffer(), "a");
    }

    #[test]
    fn test_game_loop_win() {
        let mut s = session();
        let mut actions = keys("apple");
        actions.push(Some(UserAction::Key(KeySymbol::Submit)));
        let mut ui = ScriptedInterface::new(actions);
        game_loop(&mut s, &mut ui);
        assert_eq!(s.status(), GameStatus::Won);
        assert_eq!(
            ui.notices.last().unwrap(),
            &Some(Notice::RoundOver("Well done! Solved in 1 of 6.".to_string()))
        );
    }

    #[test]
    fn test_game_loop_reports_rejections() {
        let mut s = session();
        let mut actions = keys("appl");
        actions.push(Some(UserAction::Key(KeySymbol::Submit)));
        actions.extend(keys("z"));
        actions.push(Some(UserAction::Key(KeySymbol::Submit)));
        let mut ui = ScriptedInterface::new(actions);
        game_loop(&mut s, &mut ui);
        assert!(ui.notices.contains(&Some(Notice::Rejected(
            "Guess must be exactly 5 letters".to_string()
        ))));
        assert_eq!(
            ui.notices.last().unwrap(),
            &Some(Notice::Rejected("Unknown word: applz".to_string()))
        );
        assert_eq!(s.buffer(), "applz");
    }

    #[test]
    fn test_game_loop_reveal_and_reset() {
        let mut s = session();
        let mut ui = ScriptedInterface::new(vec![
            Some(UserAction::Key(KeySymbol::Reveal)),
            Some(UserAction::Key(KeySymbol::Submit)),
            Some(UserAction::Key(KeySymbol::Reset)),
        ]);
        assert_eq!(game_loop(&mut s, &mut ui), 2);
        let texts: Vec<Option<&str>> = ui
            .notices
            .iter()
            .map(|n| n.as_ref().map(Notice::text))
            .collect();
        assert_eq!(texts[1], Some("The word was: APPLE"));
        assert_eq!(texts[2], Some("The word was: APPLE"));
        assert_eq!(texts[3], Some("Round 2 started."));
        assert_eq!(ui.statuses.last(), Some(&GameStatus::InProgress));
    }

    #[test]
    fn test_game_loop_redraw_repeats_last_notice() {
        let mut s = session();
        let mut ui = ScriptedInterface::new(vec![
            Some(UserAction::Key(KeySymbol::Reveal)),
            Some(UserAction::Redraw),
        ]);
        game_loop(&mut s, &mut ui);
        assert_eq!(ui.notices.len(), 3);
        assert_eq!(ui.notices[1], ui.notices[2]);
        assert_eq!(s.status(), GameStatus::Revealed);
    }

    #[test]
    fn test_apply_key_delete() {
        let mut s = session();
        apply_key(&mut s, KeySymbol::Letter('a'));
        apply_key(&mut s, KeySymbol::Letter('b'));
        assert_eq!(apply_key(&mut s, KeySymbol::Delete), None);
        assert_eq!(s.buffer(), "a");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("unknown word"), "Unknown word");
        assert_eq!(capitalize(""), "");
    }
}
