//! Field rules for the add-event form
//!
//! Each field is required. Text fields additionally carry a format rule that
//! is only checked once the value is non-empty. Validation is advisory: the
//! backend may still reject a draft that passes here.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::event::{EventDraft, EventType};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid name pattern"));

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(January|February|March|April|May|June|July|August|September|October|November|December) [0-9]{1,2}$",
    )
    .expect("valid date pattern")
});

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("valid time pattern"));

/// Form fields in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Date,
    Time,
    Composer,
    Cover,
    Type,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::Title,
            Field::Date,
            Field::Time,
            Field::Composer,
            Field::Cover,
            Field::Type,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Date => "Date",
            Field::Time => "Time",
            Field::Composer => "Composer",
            Field::Cover => "Cover",
            Field::Type => "Type",
        }
    }

    /// Message shown when the field is left empty
    pub fn required_message(&self) -> &'static str {
        match self {
            Field::Title => "Title is required",
            Field::Date => "Date is required",
            Field::Time => "Time is required",
            Field::Composer => "Composer is required",
            Field::Cover => "Cover is required",
            Field::Type => "Type is required",
        }
    }

    /// Format rule and its message, if the field has one
    fn pattern(&self) -> Option<(&'static Regex, &'static str)> {
        match self {
            Field::Title => Some((&*NAME_RE, "Title should contain only letters")),
            Field::Date => Some((&*DATE_RE, "Date should be in 'Month DD' format")),
            Field::Time => Some((&*TIME_RE, "Time should be in 'HH:MM' format")),
            Field::Composer => Some((&*NAME_RE, "Composer should be a name")),
            Field::Cover | Field::Type => None,
        }
    }

    /// Whether the field is free text (as opposed to the type selector)
    pub fn is_text(&self) -> bool {
        !matches!(self, Field::Type)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checks a single text value against a field's rules
pub fn check_text(field: Field, value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err(field.required_message());
    }
    match field.pattern() {
        Some((re, message)) if !re.is_match(value) => Err(message),
        _ => Ok(()),
    }
}

/// Raw values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    pub title: String,
    pub date: String,
    pub time: String,
    pub composer: String,
    pub cover: String,
    pub kind: Option<EventType>,
}

impl FieldValues {
    /// Text of a free-text field; `None` for the type selector
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => Some(&self.title),
            Field::Date => Some(&self.date),
            Field::Time => Some(&self.time),
            Field::Composer => Some(&self.composer),
            Field::Cover => Some(&self.cover),
            Field::Type => None,
        }
    }

    /// Mutable text of a free-text field; `None` for the type selector
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::Date => Some(&mut self.date),
            Field::Time => Some(&mut self.time),
            Field::Composer => Some(&mut self.composer),
            Field::Cover => Some(&mut self.cover),
            Field::Type => None,
        }
    }

    /// Checks one field of these values
    pub fn check(&self, field: Field) -> Result<(), &'static str> {
        match self.text(field) {
            Some(text) => check_text(field, text),
            None => self.kind.map(|_| ()).ok_or(field.required_message()),
        }
    }

    /// Checks every field, returning a draft only when all pass
    pub fn validate(&self) -> Result<EventDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        for field in Field::all() {
            if let Err(message) = self.check(*field) {
                errors.insert(*field, message);
            }
        }

        match (errors.is_empty(), self.kind) {
            (true, Some(kind)) => Ok(EventDraft {
                title: self.title.clone(),
                date: self.date.clone(),
                time: self.time.clone(),
                cover: self.cover.clone(),
                composer: self.composer.clone(),
                kind,
            }),
            _ => Err(errors),
        }
    }
}

/// Per-field error messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
