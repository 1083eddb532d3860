//! TUI (Terminal User Interface) module for the word game
//!
//! This module provides the full-screen board using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: owns the terminal, implements `GameInterface`
//! - `map_key`: pure translation from key events to `UserAction`s
//! - `draw_frame`: pure rendering of a `BoardView` into a frame
//!
//! # Screen
//! Title, the guess grid, the on-screen keyboard, the message line and the
//! key help, top to bottom.

use crate::feedback::LetterFeedback;
use crate::game_state::{BoardView, GameInterface, KeySymbol, Notice, UserAction};
use crate::keyboard::Layout as KeyboardLayout;
use crate::session::GameStatus;
use crate::{MAX_GUESSES, WORD_LENGTH, debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const KEYBOARD_ROWS: u16 = 3;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum TileState {
    Empty,
    Entered,
    Scored(LetterFeedback),
}

impl TileState {
    /// (background, foreground)
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Scored(LetterFeedback::Correct) => (Color::Green, Color::Black),
            Self::Scored(LetterFeedback::Present) => (Color::Yellow, Color::Black),
            Self::Scored(LetterFeedback::Absent) => (Color::Gray, Color::White),
        }
    }

    fn style(self) -> Style {
        let (bg, fg) = self.colors();
        let style = Style::default().fg(fg).bg(bg);
        if self == Self::Entered {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

/// Translates a key event into an action for the current status.
///
/// Only key presses count. Alt/Control chords are ignored except Ctrl-C,
/// which quits because raw mode swallows the signal.
#[must_use]
pub fn map_key(key: KeyEvent, status: GameStatus) -> Option<UserAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c' | 'C')).then_some(UserAction::Quit);
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    let symbol = match key.code {
        KeyCode::Esc => return Some(UserAction::Quit),
        KeyCode::Enter => KeySymbol::Submit,
        KeyCode::Backspace => KeySymbol::Delete,
        KeyCode::Tab => KeySymbol::Reveal,
        KeyCode::F(5) => KeySymbol::Reset,
        KeyCode::Char('n' | 'N') if status.is_terminal() => KeySymbol::Reset,
        KeyCode::Char(c) if c.is_ascii_alphabetic() => KeySymbol::Letter(c),
        _ => return None,
    };
    Some(UserAction::Key(symbol))
}

/// Context for rendering the UI - groups related parameters.
pub struct RenderContext<'a> {
    pub view: &'a BoardView<'a>,
    pub notice: Option<&'a Notice>,
    pub layout: KeyboardLayout,
}

/// Render the complete UI layout using the provided context.
pub fn draw_frame(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                   // Title
            Constraint::Length(MAX_GUESSES as u16 * ROW_SPACING + 2), // Game board
            Constraint::Length(KEYBOARD_ROWS * ROW_SPACING + 2),     // Keyboard
            Constraint::Length(3),                                   // Message
            Constraint::Length(3),                                   // Instructions
            Constraint::Min(0),
        ])
        .split(f.area());

    render_title(f, chunks[0], ctx.view);
    render_board(f, chunks[1], ctx.view);
    render_keyboard(f, chunks[2], ctx.view, ctx.layout);
    render_message(f, chunks[3], ctx.notice);
    render_instructions(f, chunks[4], ctx.view.status);
}

fn render_title(f: &mut Frame, area: Rect, view: &BoardView) {
    let title = Paragraph::new(format!("WORDLE  ·  round {}", view.round))
        .style(HEADER_STYLE)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
    if y >= area.y + area.height {
        return;
    }
    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(
        paragraph,
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn tile_spans<'a>(tiles: impl Iterator<Item = (char, TileState)>) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    for (letter, state) in tiles {
        spans.push(Span::styled(
            format!(" {} ", letter.to_ascii_uppercase()),
            state.style(),
        ));
        spans.push(Span::raw(" "));
    }
    spans.pop();
    spans
}

#[allow(clippy::cast_possible_truncation)]
fn render_board(f: &mut Frame, area: Rect, view: &BoardView) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for row in 0..MAX_GUESSES {
        let y = inner.y + row as u16 * ROW_SPACING;
        let spans = if let Some(guess) = view.history.get(row) {
            tile_spans(
                guess
                    .word
                    .chars()
                    .zip(guess.feedback.iter().map(|fb| TileState::Scored(*fb))),
            )
        } else if row == view.current_row && view.status == GameStatus::InProgress {
            let mut letters = view.buffer.chars();
            tile_spans((0..WORD_LENGTH).map(|_| match letters.next() {
                Some(c) => (c, TileState::Entered),
                None => (' ', TileState::Empty),
            }))
        } else {
            tile_spans((0..WORD_LENGTH).map(|_| (' ', TileState::Empty)))
        };
        render_line(f, inner, y, spans);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_keyboard(f: &mut Frame, area: Rect, view: &BoardView, layout: KeyboardLayout) {
    let block = Block::default().title("Keyboard").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (i, row) in layout.rows().iter().enumerate() {
        let y = inner.y + i as u16 * ROW_SPACING;
        let spans = tile_spans(row.chars().map(|c| {
            let state = view
                .keyboard
                .get(c)
                .map_or(TileState::Empty, TileState::Scored);
            (c, state)
        }));
        render_line(f, inner, y, spans);
    }
}

fn render_message(f: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let line = match notice {
        Some(Notice::Rejected(text)) => Line::from(Span::styled(text.as_str(), ERROR_STYLE)),
        Some(Notice::RoundOver(text)) => Line::from(Span::styled(text.as_str(), SUCCESS_STYLE)),
        Some(Notice::Info(text)) => Line::from(Span::styled(text.as_str(), MESSAGE_STYLE)),
        None => Line::from(""),
    };
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, status: GameStatus) {
    let text = if status.is_terminal() {
        "N / F5: New game | ESC: Quit"
    } else {
        "Type letters | ENTER: Submit | BACKSPACE: Delete | TAB: Reveal answer | F5: New game | ESC: Quit"
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Runs `restore` when a setup step failed after raw mode was enabled.
fn restore_on_error<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    result.inspect_err(|e| {
        log::error!("Terminal setup failed, restoring: {e}");
        restore();
    })
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        log::error!("Failed to disable raw mode: {e}");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
        log::error!("Failed to leave alternate screen: {e}");
    }
}

/// Main TUI interface component.
///
/// Manages the terminal and translates crossterm events into actions.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    layout: KeyboardLayout,
    status: GameStatus,
}

impl TuiInterface {
    pub fn new(layout: KeyboardLayout) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let terminal = restore_on_error(Self::enter_screen(), restore_terminal)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            layout,
            status: GameStatus::InProgress,
        })
    }

    fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }
}

impl GameInterface for TuiInterface {
    fn render(&mut self, view: &BoardView<'_>, notice: Option<&Notice>) {
        self.status = view.status;
        let ctx = RenderContext {
            view,
            notice,
            layout: self.layout,
        };
        if let Err(e) = self.terminal.draw(|f| draw_frame(f, &ctx)) {
            log::error!("Draw error: {e}");
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        match event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS)) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                log::error!("Event poll failed, quitting: {e}");
                return Some(UserAction::Quit);
            }
        }

        match event::read() {
            Ok(Event::Key(key)) => {
                let action = map_key(key, self.status);
                debug_log!(
                    "read_action() - Key {:?} with {:?} mapped to {:?}",
                    key.code,
                    key.modifiers,
                    action
                );
                action
            }
            Ok(Event::Resize(_, _)) => Some(UserAction::Redraw),
            Ok(other) => {
                debug_log!("read_action() - Ignoring event: {:?}", other);
                None
            }
            Err(e) => {
                log::error!("Event read failed, quitting: {e}");
                Some(UserAction::Quit)
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
