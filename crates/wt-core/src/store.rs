//! The storage seam the session controller works against.

use crate::event::{Event, NewEvent};
use crate::types::ProjectName;

/// Durable event log plus the active-project pointer.
///
/// Implementations must order each project's events by time, then by
/// insertion, and must never mutate or delete stored events.
pub trait EventStore {
    /// Storage failure. Never retried by callers in this crate.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Appends an event and returns it with its assigned id.
    fn insert_event(&mut self, event: &NewEvent) -> Result<Event, Self::Error>;

    /// Most recent `start` in `project` with no later `stop` in that project.
    fn get_open_start(&self, project: &str) -> Result<Option<Event>, Self::Error>;

    /// The project new events are scoped to.
    fn get_active_project(&self) -> Result<String, Self::Error>;

    fn set_active_project(&mut self, project: &ProjectName) -> Result<(), Self::Error>;
}
