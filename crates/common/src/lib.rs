//! Shared types for Playbill
//!
//! The event data model, list filters, field validation rules and
//! configuration loading used by the client, the TUI and the dev backend.

pub mod config;
pub mod error;
pub mod event;
pub mod validation;

pub use error::ConfigError;
pub use event::{Event, EventDraft, EventId, EventType, Filter};
