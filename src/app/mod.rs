//! Application state and event handling

pub mod command;
pub mod input;
pub mod state;

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::bank::Repository;
use crate::config::Config;
use crate::progress::{FeedbackLog, ProgressStore};
use crate::session::SessionEngine;
use crate::theme::Theme;
use crate::ui;
use state::AppState;

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = config.data_dir()?;
        let engine = SessionEngine::new(ProgressStore::new(&data_dir), FeedbackLog::new(&data_dir))
            .with_session_size(config.session_size);
        let terminal = Self::setup_terminal()?;

        Ok(Self { config, state: AppState::new(engine), terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let theme = Theme::by_name(&self.config.theme);

        // Show the loading screen while banks are read
        self.terminal.draw(|frame| ui::draw(frame, &self.state, &theme))?;
        self.load_questions().await;

        loop {
            self.terminal.draw(|frame| ui::draw(frame, &self.state, &theme))?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key.code) {
                        break;
                    }
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Load the question banks and start the first session
    async fn load_questions(&mut self) {
        match Repository::load(&self.config.bank_index).await {
            Ok(repository) => {
                self.state.engine.attach_repository(repository);
                self.state.restart();
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.state.load_error = Some(e.to_string());
            }
        }
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.state.command_line.is_input_mode() {
            if key == KeyCode::Enter {
                return self.state.execute_command();
            }

            let command_line = &mut self.state.command_line;
            match key {
                KeyCode::Esc => command_line.exit_input_mode(),
                KeyCode::Backspace => {
                    if command_line.input.is_empty() {
                        command_line.exit_input_mode();
                    } else {
                        command_line.delete_char();
                    }
                }
                KeyCode::Left => command_line.move_left(),
                KeyCode::Right => command_line.move_right(),
                KeyCode::Char(c) => command_line.insert_char(c),
                _ => {}
            }
            return false;
        }

        match input::key_to_action(key) {
            Some(action) => self.state.apply(action),
            None => false,
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = self.restore_terminal().context("Failed to restore terminal") {
            tracing::warn!("{:#}", e);
        }
    }
}
