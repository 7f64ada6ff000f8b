//! Session control: turning a start or stop request into exactly one event.
//!
//! Each project runs an independent two-state machine:
//!
//! | state     | start request              | stop request       |
//! |-----------|----------------------------|--------------------|
//! | `Idle`    | write `start` → `Running`  | write `stop`       |
//! | `Running` | write `marker`             | write `stop` → `Idle` |
//!
//! The state is never stored. It is derived from the log on every call via
//! [`EventStore::get_open_start`], so it cannot drift from the events.
//! A stop while idle is recorded as-is ("dangling stop") and is not an error.

use chrono::Utc;

use crate::event::{Event, NewEvent};
use crate::event_type::EventType;
use crate::store::EventStore;
use crate::types::ProjectName;

/// What the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    Stop,
}

/// Per-project session state, derived from the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No open start.
    Idle,
    /// An open start exists.
    Running,
}

impl SessionState {
    fn from_open_start(open_start: Option<&Event>) -> Self {
        if open_start.is_some() {
            Self::Running
        } else {
            Self::Idle
        }
    }

    fn after(self, written: EventType) -> Self {
        match written {
            EventType::Start => Self::Running,
            EventType::Stop => Self::Idle,
            EventType::Marker => self,
        }
    }
}

/// Picks the event type an intent produces in the given state.
pub const fn decide(intent: Intent, state: SessionState) -> EventType {
    match (intent, state) {
        (Intent::Start, SessionState::Idle) => EventType::Start,
        (Intent::Start, SessionState::Running) => EventType::Marker,
        (Intent::Stop, _) => EventType::Stop,
    }
}

/// Outcome of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// The event that was written.
    pub event: Event,
    /// State of the project before the write.
    pub previous: SessionState,
    /// State of the project after the write.
    pub current: SessionState,
}

/// Applies start/stop requests against an [`EventStore`].
///
/// The active project is read by the caller at the start of an invocation
/// and handed in; requests are scoped to it until [`switch_project`] runs.
///
/// [`switch_project`]: SessionController::switch_project
pub struct SessionController<'a, S> {
    store: &'a mut S,
    project: String,
}

impl<'a, S: EventStore> SessionController<'a, S> {
    pub fn new(store: &'a mut S, project: impl Into<String>) -> Self {
        Self {
            store,
            project: project.into(),
        }
    }

    /// The project requests are recorded in.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Current state of `project`.
    pub fn state(&self, project: &str) -> Result<SessionState, S::Error> {
        let open_start = self.store.get_open_start(project)?;
        Ok(SessionState::from_open_start(open_start.as_ref()))
    }

    /// Records the event for `intent` in the active project, stamped now.
    pub fn request(&mut self, intent: Intent, message: &str) -> Result<Recorded, S::Error> {
        self.request_at(intent, message, Utc::now().timestamp())
    }

    /// Records the event for `intent` in the active project at `time`.
    pub fn request_at(
        &mut self,
        intent: Intent,
        message: &str,
        time: i64,
    ) -> Result<Recorded, S::Error> {
        let project = self.project.clone();
        let previous = self.state(&project)?;
        let event_type = decide(intent, previous);

        if intent == Intent::Start && event_type == EventType::Marker {
            tracing::debug!(%project, "session already running, recording marker");
        } else if intent == Intent::Stop && previous == SessionState::Idle {
            tracing::debug!(%project, "no open session, recording dangling stop");
        }

        let event = self
            .store
            .insert_event(&NewEvent::new(event_type, message, time, project))?;
        tracing::debug!(id = event.id, event_type = %event.event_type, "event recorded");

        Ok(Recorded {
            event,
            previous,
            current: previous.after(event_type),
        })
    }

    /// Makes `name` the active project. Writes no event.
    pub fn switch_project(&mut self, name: &ProjectName) -> Result<(), S::Error> {
        self.store.set_active_project(name)?;
        self.project = name.to_string();
        tracing::debug!(project = %name, "switched active project");
        Ok(())
    }
}
