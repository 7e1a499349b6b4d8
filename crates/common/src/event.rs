//! Event records as exchanged with the events backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of performance an event describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Opera,
    Ballet,
}

impl EventType {
    /// Returns all event types in display order
    pub fn all() -> &'static [EventType] {
        &[EventType::Opera, EventType::Ballet]
    }

    /// Wire value used in JSON bodies and query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Opera => "opera",
            EventType::Ballet => "ballet",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Opera => "Opera",
            EventType::Ballet => "Ballet",
        }
    }

    /// Parses a wire value, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        EventType::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier assigned by the backend.
///
/// json-server style backends hand out either numbers or short strings,
/// so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Number(n) => write!(f, "{}", n),
            EventId::Text(s) => f.write_str(s),
        }
    }
}

/// The user-entered fields of an event, sent as the body of a create call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    /// "Month DD", e.g. "March 5"
    pub date: String,
    /// "HH:MM"
    pub time: String,
    /// Image URL or label
    pub cover: String,
    pub composer: String,
    #[serde(rename = "type")]
    pub kind: EventType,
}

/// An event as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(flatten)]
    pub draft: EventDraft,
}

impl Event {
    pub fn new(id: EventId, draft: EventDraft) -> Self {
        Self { id, draft }
    }

    pub fn title(&self) -> &str {
        &self.draft.title
    }

    pub fn kind(&self) -> EventType {
        self.draft.kind
    }
}

/// Narrows an event listing by type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Only(EventType),
}

impl Filter {
    /// Returns all filters in cycling order
    pub fn all() -> [Filter; 3] {
        [
            Filter::All,
            Filter::Only(EventType::Opera),
            Filter::Only(EventType::Ballet),
        ]
    }

    /// Value for the `type` query parameter, `None` for [`Filter::All`]
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            Filter::All => None,
            Filter::Only(kind) => Some(kind.as_str()),
        }
    }

    /// Whether an event passes this filter
    pub fn matches(&self, kind: EventType) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => *wanted == kind,
        }
    }

    /// The filter after this one, wrapping around
    pub fn next(&self) -> Filter {
        let all = Filter::all();
        let pos = all.iter().position(|f| f == self).unwrap_or(0);
        all[(pos + 1) % all.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Only(kind) => kind.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft {
            title: "La Traviata".into(),
            date: "March 5".into(),
            time: "19:30".into(),
            cover: "https://example.com/traviata.jpg".into(),
            composer: "Giuseppe Verdi".into(),
            kind: EventType::Opera,
        }
    }

    #[test]
    fn test_draft_uses_type_key() {
        let json = serde_json::to_value(draft()).unwrap();
        assert_eq!(json["type"], "opera");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_event_accepts_numeric_and_string_ids() {
        let numeric: Event = serde_json::from_str(
            r#"{"id":7,"title":"Giselle","date":"May 12","time":"18:00",
                "cover":"giselle.png","composer":"Adolphe Adam","type":"ballet"}"#,
        )
        .unwrap();
        assert_eq!(numeric.id, EventId::Number(7));
        assert_eq!(numeric.kind(), EventType::Ballet);

        let text: Event = serde_json::from_str(
            r#"{"id":"a1f3","title":"Giselle","date":"May 12","time":"18:00",
                "cover":"giselle.png","composer":"Adolphe Adam","type":"ballet",
                "venue":"ignored"}"#,
        )
        .unwrap();
        assert_eq!(text.id.to_string(), "a1f3");
    }

    #[test]
    fn test_event_without_id_is_rejected() {
        let json = serde_json::to_string(&draft()).unwrap();
        assert!(serde_json::from_str::<Event>(&json).is_err());
    }

    #[test]
    fn test_filter_query_and_cycle() {
        assert_eq!(Filter::All.query_value(), None);
        assert_eq!(Filter::Only(EventType::Ballet).query_value(), Some("ballet"));
        assert_eq!(Filter::All.next(), Filter::Only(EventType::Opera));
        assert_eq!(Filter::Only(EventType::Ballet).next(), Filter::All);
        assert!(Filter::Only(EventType::Opera).matches(EventType::Opera));
        assert!(!Filter::Only(EventType::Opera).matches(EventType::Ballet));
    }

    #[test]
    fn test_event_type_parse() {
        assert_eq!(EventType::parse("Opera"), Some(EventType::Opera));
        assert_eq!(EventType::parse("musical"), None);
    }
}
