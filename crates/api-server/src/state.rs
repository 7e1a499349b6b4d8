use anyhow::{anyhow, Result};
use common::{Event, EventDraft, EventId, Filter};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Shape of a seed file: `{"events": [...]}`, as used by json-server
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    events: Vec<Event>,
}

/// Stored events in insertion order
#[derive(Debug)]
pub struct EventBook {
    events: Vec<Event>,
    /// `None` once `u64::MAX` has been handed out
    next_id: Option<u64>,
}

impl Default for EventBook {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            next_id: Some(1),
        }
    }
}

impl EventBook {
    /// Creates a book holding `events`; new ids continue after the highest numeric id
    pub fn with_events(events: Vec<Event>) -> Result<Self> {
        let max_id = events
            .iter()
            .filter_map(|e| match e.id {
                EventId::Number(n) => Some(n),
                EventId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        let next_id = max_id
            .checked_add(1)
            .ok_or_else(|| anyhow!("No event ids left after seeded id {}", max_id))?;

        Ok(Self {
            events,
            next_id: Some(next_id),
        })
    }

    /// Stores a draft under the next id and returns the stored record.
    ///
    /// Fails without storing anything once the numeric id space is used up.
    pub fn insert(&mut self, draft: EventDraft) -> Result<Event> {
        let id = self.next_id.ok_or_else(|| anyhow!("No event ids left"))?;
        self.next_id = id.checked_add(1);

        let event = Event::new(EventId::Number(id), draft);
        self.events.push(event.clone());
        Ok(event)
    }

    pub fn list(&self, filter: Filter) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| filter.matches(e.kind()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Shared router state
#[derive(Clone, Default)]
pub struct AppState {
    pub book: Arc<RwLock<EventBook>>,
}

impl AppState {
    pub fn new(book: EventBook) -> Self {
        Self {
            book: Arc::new(RwLock::new(book)),
        }
    }

    /// Builds state from a json-server style seed file
    pub fn from_seed_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read seed file {}: {}", path.display(), e))?;
        let seed: SeedFile = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse seed file {}: {}", path.display(), e))?;

        let book = EventBook::with_events(seed.events)
            .map_err(|e| anyhow!("Invalid seed file {}: {}", path.display(), e))?;
        if book.is_empty() {
            warn!("Seed file {} holds no events", path.display());
        } else {
            info!("Seeded {} events from {}", book.len(), path.display());
        }
        Ok(Self::new(book))
    }
}
