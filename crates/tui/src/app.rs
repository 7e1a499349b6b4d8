//! Application state and update logic

use anyhow::Result;
use common::Filter;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use events_client::EventApi;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::time::Duration;
use tracing::warn;

use crate::form::{FormCommand, FormController, SubmitOutcome};
use crate::store::{Action, EventStore};
use crate::ui;

/// Oldest activity entries are dropped past this count
const MAX_LOG_ENTRIES: usize = 200;

/// Log entry with level
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Active input mode
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

/// Main application state
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Events shown in the table
    pub store: EventStore,
    /// Add-event dialog
    pub form: FormController,
    /// Current list filter
    pub filter: Filter,
    /// Selected table row
    pub selected: usize,
    /// Activity log
    pub logs: Vec<LogEntry>,
    /// Log scroll position
    pub log_scroll: usize,
    /// Current input mode
    pub input_mode: InputMode,
    /// Events endpoint, for display
    pub backend_url: String,
    api: Box<dyn EventApi>,
}

impl App {
    /// Create a new App talking to `api`
    pub fn new(api: Box<dyn EventApi>, backend_url: impl Into<String>) -> Self {
        let mut app = Self {
            running: true,
            store: EventStore::new(),
            form: FormController::new(),
            filter: Filter::All,
            selected: 0,
            logs: Vec::new(),
            log_scroll: 0,
            input_mode: InputMode::Normal,
            backend_url: backend_url.into(),
            api,
        };

        app.log_info("Playbill started");
        app.log_info("Press [A] to add an event, [H] for help");

        app
    }

    /// Get current timestamp
    fn now() -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }

    /// Add a log entry with level
    fn log_with_level(&mut self, message: impl Into<String>, level: LogLevel) {
        self.logs.push(LogEntry {
            timestamp: Self::now(),
            message: message.into(),
            level,
        });
        if self.logs.len() > MAX_LOG_ENTRIES {
            let excess = self.logs.len() - MAX_LOG_ENTRIES;
            self.logs.drain(..excess);
        }
        // Auto-scroll to bottom (keep last 5 visible)
        if self.logs.len() > 5 {
            self.log_scroll = self.logs.len().saturating_sub(5);
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log_with_level(message, LogLevel::Info);
    }

    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log_with_level(message, LogLevel::Success);
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log_with_level(message, LogLevel::Warning);
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log_with_level(message, LogLevel::Error);
    }

    /// Fetches the list for the current filter and replaces the store contents.
    ///
    /// On failure the previous list is kept and the error is reported.
    pub async fn load_events(&mut self) {
        match self.api.list_events(self.filter).await {
            Ok(events) => {
                let count = events.len();
                self.store.dispatch(Action::Load(events));
                self.selected = 0;
                if count == 0 {
                    self.log_warning(format!("No events [{}]", self.filter.label()));
                } else {
                    self.log_success(format!("Loaded {} event(s) [{}]", count, self.filter.label()));
                }
            }
            Err(err) => {
                warn!("Failed to list events: {}", err);
                self.log_error(format!("Could not load events: {}", err));
            }
        }
    }

    /// Run the main event loop
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while self.running {
            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code).await;
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle keyboard input
    async fn handle_key(&mut self, key: KeyCode) {
        if self.form.is_open() {
            self.handle_form_key(key).await;
            return;
        }

        match &self.input_mode {
            InputMode::Normal => self.handle_normal_key(key).await,
            InputMode::Help => {
                // Any key exits help
                self.input_mode = InputMode::Normal;
            }
        }
    }

    /// Handle keys in normal mode
    async fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            // Quit
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            // Open the add dialog
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.form.open();
            }
            // Next filter
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.filter = self.filter.next();
                self.log_info(format!("Filter: {}", self.filter.label()));
                self.load_events().await;
            }
            // Reload
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.load_events().await;
            }
            // Help
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                self.input_mode = InputMode::Help;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.store.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.store.len().saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Handle keys while the add dialog is open
    async fn handle_form_key(&mut self, key: KeyCode) {
        match self.form.handle_key(key) {
            FormCommand::Submit => {
                let outcome = self.form.submit(self.api.as_ref(), &mut self.store).await;
                if let SubmitOutcome::Created(id) = outcome {
                    self.selected = self.store.len().saturating_sub(1);
                    self.log_success(format!("Added event #{}", id));
                }
            }
            FormCommand::Closed | FormCommand::None => {}
        }
    }
}
