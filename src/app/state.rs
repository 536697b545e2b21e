//! Application state definitions

use super::command::{Command, ParseResult, parse_command};
use super::input::Action;
use crate::bank::Question;
use crate::session::{Phase, SessionEngine};

/// Which screen is currently displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Banks are still being read
    Loading,
    /// Banks failed to load; nothing else works
    Error(String),
    /// A question is on screen
    Question,
    /// Session finished, topic report on screen
    Summary,
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Command line shows status messages
    #[default]
    Normal,
    /// Accepting : commands
    Command,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    pub mode: CommandMode,
    pub input: String,
    /// Cursor position in characters
    pub cursor: usize,
    /// Status/error message shown in normal mode
    pub message: Option<String>,
    pub is_error: bool,
}

impl CommandLineState {
    pub fn enter_command_mode(&mut self) {
        self.mode = CommandMode::Command;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
    }

    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn is_input_mode(&self) -> bool {
        self.mode == CommandMode::Command
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }
}

/// Full application state
#[derive(Debug)]
pub struct AppState {
    pub engine: SessionEngine,

    /// Set when the question banks could not be loaded
    pub load_error: Option<String>,

    /// Option under the j/k cursor (index into the option list)
    pub highlighted: usize,

    pub command_line: CommandLineState,
}

impl AppState {
    pub fn new(engine: SessionEngine) -> Self {
        Self { engine, load_error: None, highlighted: 0, command_line: CommandLineState::default() }
    }

    pub fn screen(&self) -> Screen {
        if let Some(err) = &self.load_error {
            return Screen::Error(err.clone());
        }
        match self.engine.phase() {
            Phase::Loading => Screen::Loading,
            Phase::InProgress => Screen::Question,
            Phase::Finished => Screen::Summary,
        }
    }

    fn current_options(&self) -> usize {
        self.engine.current_question().map_or(0, |q| q.prompt.options.len())
    }

    /// Start a fresh session and reset the option cursor
    pub fn restart(&mut self) {
        self.engine.start_session();
        self.highlighted = 0;
    }

    /// Apply a normal-mode action; returns true if the app should exit
    pub fn apply(&mut self, action: Action) -> bool {
        match self.screen() {
            Screen::Loading => {}
            Screen::Error(_) => return action == Action::Back,
            Screen::Question => self.apply_question(action),
            Screen::Summary => {
                if matches!(action, Action::Restart | Action::Confirm) {
                    self.restart();
                }
            }
        }

        if action == Action::CommandMode {
            self.command_line.enter_command_mode();
        }
        false
    }

    fn apply_question(&mut self, action: Action) {
        let options = self.current_options();

        match action {
            Action::Up => self.highlighted = self.highlighted.saturating_sub(1),
            Action::Down => {
                if self.highlighted + 1 < options {
                    self.highlighted += 1;
                }
            }
            Action::Choose(letter) => {
                let index = (letter as usize).wrapping_sub('A' as usize);
                if index < options && !self.engine.is_submitted() {
                    self.highlighted = index;
                    self.engine.select_option(letter);
                }
            }
            Action::Confirm => {
                if self.engine.is_submitted() {
                    self.advance();
                } else {
                    if self.engine.selection().is_none() {
                        if let Some(letter) = Question::option_letter(self.highlighted) {
                            if self.highlighted < options {
                                self.engine.select_option(letter);
                            }
                        }
                    }
                    if self.engine.selection().is_some() {
                        self.engine.submit();
                    }
                }
            }
            Action::Hint => self.engine.request_hint(),
            Action::Next => {
                if self.engine.is_submitted() {
                    self.advance();
                }
            }
            _ => {}
        }
    }

    fn advance(&mut self) {
        self.engine.next_question();
        self.highlighted = 0;
    }

    /// Run the command typed on the command line; returns true if the app should exit
    pub fn execute_command(&mut self) -> bool {
        let input = std::mem::take(&mut self.command_line.input);
        self.command_line.exit_input_mode();

        match parse_command(&input) {
            ParseResult::Ok(Command::Quit) => return true,
            ParseResult::Ok(Command::Nop) => self.command_line.message = None,
            ParseResult::Ok(Command::Restart) => {
                if self.load_error.is_none() {
                    self.restart();
                    self.command_line.set_message("New session started");
                }
            }
            ParseResult::Ok(Command::Reset) => {
                self.engine.reset_progress();
                self.command_line.set_message("Progress cleared");
            }
            ParseResult::Ok(Command::Report(note)) => {
                if self.engine.report_issue(&note) {
                    self.command_line.set_message("Thanks, report saved");
                } else {
                    self.command_line.set_error("No question to report on");
                }
            }
            ParseResult::UnknownCommand(cmd) => {
                self.command_line.set_error(format!("Unknown command: {}", cmd));
            }
            ParseResult::MissingArgument(cmd) => {
                self.command_line.set_error(format!("Missing argument for :{}", cmd));
            }
        }
        false
    }
}
