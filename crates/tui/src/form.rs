//! Add-event dialog state and submission

use common::validation::{Field, FieldErrors, FieldValues};
use common::{EventId, EventType};
use crossterm::event::KeyCode;
use events_client::EventApi;
use tracing::{error, info};

use crate::store::{Action, EventStore};

/// What the app should do after a key was handled by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCommand {
    None,
    Submit,
    Closed,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are set on the form
    Invalid,
    /// Backend stored the event; the form is reset and closed
    Created(EventId),
    /// The create call failed; the form is left as it was
    Failed,
}

/// Owns the dialog: visibility, field values, errors and focus
#[derive(Debug)]
pub struct FormController {
    open: bool,
    values: FieldValues,
    errors: FieldErrors,
    focus: Field,
    /// Fields are re-validated on change once a submit has been attempted
    submitted: bool,
}

impl Default for FormController {
    fn default() -> Self {
        Self {
            open: false,
            values: FieldValues::default(),
            errors: FieldErrors::default(),
            focus: Field::Title,
            submitted: false,
        }
    }
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides the dialog. Entered values are kept for the next open.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Clears values, errors and focus
    pub fn reset(&mut self) {
        let open = self.open;
        *self = Self::default();
        self.open = open;
    }

    pub fn focus_next(&mut self) {
        self.focus = Self::step(self.focus, 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = Self::step(self.focus, Field::all().len() - 1);
    }

    fn step(field: Field, by: usize) -> Field {
        let all = Field::all();
        let pos = all.iter().position(|f| *f == field).unwrap_or(0);
        all[(pos + by) % all.len()]
    }

    /// Types a character into the focused text field
    pub fn input_char(&mut self, c: char) {
        if let Some(text) = self.values.text_mut(self.focus) {
            text.push(c);
            self.revalidate(self.focus);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.values.text_mut(self.focus) {
            text.pop();
            self.revalidate(self.focus);
        }
    }

    /// Moves the type selector through unset, opera, ballet
    pub fn cycle_type(&mut self, forward: bool) {
        let options: Vec<Option<EventType>> = std::iter::once(None)
            .chain(EventType::all().iter().copied().map(Some))
            .collect();
        let pos = options
            .iter()
            .position(|o| *o == self.values.kind)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % options.len()
        } else {
            (pos + options.len() - 1) % options.len()
        };
        self.values.kind = options[next];
        self.revalidate(Field::Type);
    }

    fn revalidate(&mut self, field: Field) {
        if !self.submitted {
            return;
        }
        match self.values.check(field) {
            Ok(()) => self.errors.remove(field),
            Err(message) => self.errors.insert(field, message),
        }
    }

    /// Handles a key while the dialog is open
    pub fn handle_key(&mut self, key: KeyCode) -> FormCommand {
        match key {
            KeyCode::Esc => {
                self.close();
                return FormCommand::Closed;
            }
            KeyCode::Enter => return FormCommand::Submit,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Left if self.focus == Field::Type => self.cycle_type(false),
            KeyCode::Right | KeyCode::Char(' ') if self.focus == Field::Type => {
                self.cycle_type(true)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) if !c.is_control() => self.input_char(c),
            _ => {}
        }
        FormCommand::None
    }

    /// Validates and, if every field passes, creates the event.
    ///
    /// On success the created record is dispatched to `store` and the form
    /// is reset and closed. A failed call is only logged; the dialog stays
    /// open with its input.
    pub async fn submit(&mut self, api: &dyn EventApi, store: &mut EventStore) -> SubmitOutcome {
        self.submitted = true;

        let draft = match self.values.validate() {
            Ok(draft) => {
                self.errors.clear();
                draft
            }
            Err(errors) => {
                self.errors = errors;
                return SubmitOutcome::Invalid;
            }
        };

        match api.create_event(&draft).await {
            Ok(event) => {
                let id = event.id.clone();
                info!("Added event {} '{}'", id, event.title());
                store.dispatch(Action::Add(event));
                self.reset();
                self.close();
                SubmitOutcome::Created(id)
            }
            Err(err) => {
                error!("Can not add: {}", err);
                SubmitOutcome::Failed
            }
        }
    }
}
