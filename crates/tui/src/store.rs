//! Shared event list
//!
//! The list is only changed through [`EventStore::dispatch`].

use common::Event;
use tracing::debug;

/// Updates accepted by the store
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the list with a fresh listing
    Load(Vec<Event>),
    /// Append a newly created event
    Add(Event),
}

#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Load(events) => {
                debug!("Store loaded {} events", events.len());
                self.events = events;
            }
            Action::Add(event) => {
                debug!("Store appended event {}", event.id);
                self.events.push(event);
            }
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
