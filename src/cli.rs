use crate::feedback::LetterFeedback;
use crate::game_state::{BoardView, GameInterface, KeySymbol, Notice, UserAction};
use crate::keyboard::{KeyboardState, Layout};
use crate::session::GameStatus;
use crate::{MAX_GUESSES, WORD_LENGTH, debug_log};
use clap::{Parser, ValueEnum};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Terminal word-guessing game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON array of 5-letter words (defaults to the built-in list)
    #[arg(short = 'w', long = "words")]
    pub words_path: Option<PathBuf>,

    /// Play line by line instead of on the full-screen board
    #[arg(short, long)]
    pub plain: bool,

    /// Keyboard layout drawn under the board
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Qwerty)]
    pub layout: LayoutArg,

    /// Log file location (defaults to the user cache directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Keyboard layout names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Qwerty,
    Azerty,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Qwerty => Layout::Qwerty,
            LayoutArg::Azerty => Layout::Azerty,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

#[derive(Debug, PartialEq, Eq)]
enum LineInput {
    Guess(String),
    Reveal,
    NewGame,
    Exit,
    Invalid(String),
    Empty,
}

fn parse_line(line: &str) -> LineInput {
    let input = line.trim().to_lowercase();
    match input.as_str() {
        "" => LineInput::Empty,
        ":quit" | ":exit" | "exit" => LineInput::Exit,
        ":new" | ":reset" | "next" => LineInput::NewGame,
        ":reveal" | "?" => LineInput::Reveal,
        _ if !input.chars().all(|c| c.is_ascii_alphabetic()) => {
            LineInput::Invalid(format!("Only letters are allowed: '{}'", line.trim()))
        }
        _ if input.len() > WORD_LENGTH => {
            LineInput::Invalid(format!("Guess must be exactly {WORD_LENGTH} letters"))
        }
        _ => LineInput::Guess(input),
    }
}

fn format_row(word: &str, marks: &str) -> String {
    let letters: Vec<String> = word
        .chars()
        .map(|c| c.to_ascii_uppercase().to_string())
        .collect();
    format!("{}   {}", letters.join(" "), marks)
}

fn format_marks(feedback: &[LetterFeedback]) -> String {
    let marks: Vec<String> = feedback.iter().map(|f| f.to_char().to_string()).collect();
    marks.join(" ")
}

fn format_keyboard(keyboard: &KeyboardState, layout: Layout) -> Vec<String> {
    let mut groups = [
        ("Correct", Vec::new()),
        ("Present", Vec::new()),
        ("Absent ", Vec::new()),
    ];
    for letter in layout.rows().concat().chars() {
        let slot = match keyboard.get(letter) {
            Some(LetterFeedback::Correct) => 0,
            Some(LetterFeedback::Present) => 1,
            Some(LetterFeedback::Absent) => 2,
            None => continue,
        };
        groups[slot].1.push(letter.to_ascii_uppercase().to_string());
    }
    groups
        .iter()
        .filter(|(_, letters)| !letters.is_empty())
        .map(|(label, letters)| format!("{label}: {}", letters.join(" ")))
        .collect()
}

/// Formats the board as plain text lines.
#[must_use]
pub fn format_board(view: &BoardView<'_>, layout: Layout) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, guess) in view.history.iter().enumerate() {
        lines.push(format!(
            "{:>2}  {}",
            i + 1,
            format_row(&guess.word, &format_marks(&guess.feedback))
        ));
    }
    if view.status == GameStatus::InProgress && view.current_row < MAX_GUESSES {
        let pending: String = view
            .buffer
            .chars()
            .chain(std::iter::repeat('_'))
            .take(WORD_LENGTH)
            .collect();
        let row = format!("{:>2}  {}", view.current_row + 1, format_row(&pending, ""));
        lines.push(row.trim_end().to_string());
    }
    lines.extend(format_keyboard(view.keyboard, layout));
    lines
}

/// Line-based implementation of the `GameInterface` trait.
///
/// Each line is a whole guess or a `:command`; guesses are replayed into the
/// session as individual key symbols.
pub struct CliInterface<R: BufRead, W: Write = io::Stdout> {
    reader: R,
    writer: W,
    layout: Layout,
    pending: VecDeque<KeySymbol>,
    buffer_len: usize,
    status: GameStatus,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self::with_writer(reader, io::stdout())
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn with_writer(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            layout: Layout::default(),
            pending: VecDeque::new(),
            buffer_len: 0,
            status: GameStatus::InProgress,
        }
    }

    #[must_use]
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            if let Err(e) = writeln!(self.writer, "{}", line.as_ref()) {
                log::warn!("Failed to write to console: {e}");
                return;
            }
        }
    }

    fn prompt(&mut self) {
        let prompt = if self.status.is_terminal() {
            "\nRound over. Type ':new' for another game or ':quit' to exit:".to_string()
        } else {
            format!(
                "\nEnter your guess ({WORD_LENGTH} letters, ':reveal' to give up, ':new' for a new game, ':quit' to exit):"
            )
        };
        self.write_lines([prompt]);
    }

    fn queue_guess(&mut self, word: &str) {
        self.pending
            .extend(std::iter::repeat_n(KeySymbol::Delete, self.buffer_len));
        self.pending.extend(word.chars().map(KeySymbol::Letter));
        self.pending.push_back(KeySymbol::Submit);
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn render(&mut self, view: &BoardView<'_>, notice: Option<&Notice>) {
        self.buffer_len = view.buffer.len();
        self.status = view.status;
        if !self.pending.is_empty() {
            return;
        }
        let lines = format_board(view, self.layout);
        self.write_lines(lines);
        if let Some(notice) = notice {
            self.write_lines([notice.text()]);
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        if let Some(key) = self.pending.pop_front() {
            return Some(UserAction::Key(key));
        }

        self.prompt();
        if let Err(e) = self.writer.flush() {
            log::warn!("Failed to flush console: {e}");
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => return Some(UserAction::Quit),
            Ok(_) => {}
            Err(e) => {
                log::error!("Failed to read from console: {e}");
                return Some(UserAction::Quit);
            }
        }

        let input = parse_line(&line);
        debug_log!("CliInterface::read_action() - Parsed line as {:?}", input);
        match input {
            LineInput::Exit => {
                self.write_lines(["Exiting."]);
                Some(UserAction::Quit)
            }
            LineInput::NewGame => Some(UserAction::Key(KeySymbol::Reset)),
            LineInput::Reveal => Some(UserAction::Key(KeySymbol::Reveal)),
            LineInput::Guess(word) => {
                self.queue_guess(&word);
                self.pending.pop_front().map(UserAction::Key)
            }
            LineInput::Invalid(message) => {
                self.write_lines([message]);
                None
            }
            LineInput::Empty => None,
        }
    }
}
