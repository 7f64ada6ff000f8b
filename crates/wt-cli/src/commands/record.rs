//! Record command: start, marker or stop in the active project.

use std::io::Write;

use anyhow::{Context, Result};
use wt_core::{EventType, Intent, Recorded, SessionController, SessionState};
use wt_db::Database;

/// Runs the record command and reports what was written.
pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    intent: Intent,
    message: &str,
) -> Result<Recorded> {
    let project = db
        .get_active_project()
        .context("failed to read active project")?;
    let recorded = SessionController::new(db, project)
        .request(intent, message)
        .context("failed to record event")?;
    write_outcome(writer, &recorded)?;
    Ok(recorded)
}

fn write_outcome<W: Write>(writer: &mut W, recorded: &Recorded) -> std::io::Result<()> {
    let event = &recorded.event;
    let verb = match event.event_type {
        EventType::Start => "Started work",
        EventType::Marker => "Created marker",
        EventType::Stop => "Stopped work",
    };
    write!(writer, "{verb} [{}]", event.project)?;
    if !event.message.is_empty() {
        write!(writer, ": {}", event.message)?;
    }
    if event.event_type == EventType::Stop && recorded.previous == SessionState::Idle {
        write!(writer, " (no session was running)")?;
    }
    writeln!(writer)
}
