//! Search lifecycle events.
//!
//! Every search publishes a started and a completed event through an
//! `EventSink`. Events are immutable and dispatched synchronously on the
//! calling thread.

use crate::core::search::SearchAction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new unique event ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Event metadata common to all events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub id: EventId,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// Sequence number within the event stream (assigned by the sink).
    pub sequence: Option<u64>,
}

impl EventMetadata {
    /// Creates new metadata with current timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: EventId::new(),
            timestamp: Utc::now(),
            sequence: None,
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload types for search lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchEventPayload {
    /// A search began evaluating its compound query.
    SearchStarted {
        query: String,
        action: SearchAction,
    },
    /// A search finished; `match_count` nodes satisfied the query.
    SearchCompleted {
        query: String,
        action: SearchAction,
        match_count: usize,
    },
}

/// A search lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event payload.
    pub payload: SearchEventPayload,
}

impl SearchEvent {
    /// Creates a new event with fresh metadata.
    #[must_use]
    pub fn new(payload: SearchEventPayload) -> Self {
        Self {
            metadata: EventMetadata::new(),
            payload,
        }
    }

    /// Returns the event ID.
    #[must_use]
    pub fn id(&self) -> EventId {
        self.metadata.id
    }
}

/// Synchronous receiver for search lifecycle events.
pub trait EventSink: Send + Sync {
    /// Delivers an event. Called on the searching thread.
    fn publish(&self, event: SearchEvent);
}

/// Thread-safe shared handle to any event sink.
pub type SharedEventSink = Arc<dyn EventSink>;

/// In-memory event sink for tests and inspection.
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    events: RwLock<Vec<SearchEvent>>,
}

impl InMemoryEventSink {
    /// Creates a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all captured events in publish order.
    #[must_use]
    pub fn events(&self) -> Vec<SearchEvent> {
        self.events.read().expect("lock poisoned").clone()
    }

    /// Returns the number of captured events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().expect("lock poisoned").len()
    }

    /// Checks whether no events were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[allow(clippy::significant_drop_tightening)]
impl EventSink for InMemoryEventSink {
    fn publish(&self, mut event: SearchEvent) {
        let mut events = self.events.write().expect("lock poisoned");
        event.metadata.sequence = Some(events.len() as u64);
        events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_assigns_sequence_numbers() {
        let sink = InMemoryEventSink::new();

        sink.publish(SearchEvent::new(SearchEventPayload::SearchStarted {
            query: "Name contains \"a\"".to_string(),
            action: SearchAction::Select,
        }));
        sink.publish(SearchEvent::new(SearchEventPayload::SearchCompleted {
            query: "Name contains \"a\"".to_string(),
            action: SearchAction::Select,
            match_count: 2,
        }));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].metadata.sequence, Some(0));
        assert_eq!(events[1].metadata.sequence, Some(1));
    }

    #[test]
    fn event_serialization_round_trip() {
        let event = SearchEvent::new(SearchEventPayload::SearchCompleted {
            query: "* contains \"x\"".to_string(),
            action: SearchAction::Filter,
            match_count: 0,
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("search_completed"));

        let restored: SearchEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.payload, event.payload);
        assert_eq!(restored.id(), event.id());
    }
}
