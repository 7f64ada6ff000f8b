//! Core domain logic for the work tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: the immutable start/stop/marker records kept per project
//! - Session control: deciding which event a start or stop request produces
//! - Summaries: totalling closed start→stop pairs

pub mod event;
pub mod event_type;
pub mod session;
pub mod store;
pub mod summary;
pub mod types;

pub use event::{Event, NewEvent};
pub use event_type::{EventType, UnknownEventType};
pub use session::{Intent, Recorded, SessionController, SessionState, decide};
pub use store::EventStore;
pub use summary::{format_duration, open_session_elapsed, summarize_events};
pub use types::{DEFAULT_PROJECT, ProjectName, ValidationError};
