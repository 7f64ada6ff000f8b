//! Work events as recorded in the store.

use serde::{Deserialize, Serialize};

use crate::event_type::EventType;

/// A stored event. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned, monotonically increasing identifier.
    pub id: i64,
    /// Free-text message; may be empty.
    pub message: String,
    /// Start, stop or marker.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Unix timestamp in seconds.
    pub time: i64,
    /// Name of the project this event belongs to.
    pub project: String,
}

/// An event that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub message: String,
    pub event_type: EventType,
    pub time: i64,
    pub project: String,
}

impl NewEvent {
    pub fn new(
        event_type: EventType,
        message: impl Into<String>,
        time: i64,
        project: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            event_type,
            time,
            project: project.into(),
        }
    }

    /// Attaches a store-assigned id.
    #[must_use]
    pub fn with_id(self, id: i64) -> Event {
        Event {
            id,
            message: self.message,
            event_type: self.event_type,
            time: self.time,
            project: self.project,
        }
    }
}
