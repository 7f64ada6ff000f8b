//! List command for showing the events of the active project.
//!
//! Prints one row per event, then the total of closed sessions and, if a
//! session is still open, how long it has been running.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone, Utc};
use wt_core::{Event, EventType, format_duration, open_session_elapsed, summarize_events};
use wt_db::Database;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runs the list command against the active project.
pub fn run<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let project = db
        .get_active_project()
        .context("failed to read active project")?;
    let events = db
        .list_events(&project)
        .with_context(|| format!("failed to list events for {project}"))?;
    write_events(writer, &project, &events, Utc::now().timestamp(), &Local)?;
    Ok(())
}

/// Renders `events` with times shown in `tz`.
pub fn write_events<W, Tz>(
    writer: &mut W,
    project: &str,
    events: &[Event],
    now: i64,
    tz: &Tz,
) -> std::io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if events.is_empty() {
        writeln!(writer, "No events recorded for project {project}.")?;
        return Ok(());
    }

    writeln!(writer, "Events for project {project}")?;
    writeln!(writer)?;
    writeln!(writer, "{:<6}  {:<19}  MESSAGE", "TYPE", "TIME")?;
    writeln!(writer, "──────  ───────────────────  ───────")?;
    for event in events {
        let line = format!(
            "{:<6}  {:<19}  {}",
            event.event_type.as_str(),
            format_time(event.time, tz),
            event.message
        );
        writeln!(writer, "{}", line.trim_end())?;
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "Total time worked: {}",
        format_duration(summarize_events(events))
    )?;

    if let Some(elapsed) = open_session_elapsed(events, now) {
        let since = events
            .iter()
            .rev()
            .find(|e| e.event_type == EventType::Start)
            .map(|e| format_time(e.time, tz))
            .unwrap_or_default();
        writeln!(
            writer,
            "Current session: {} (since {since})",
            format_duration(elapsed)
        )?;
    }

    Ok(())
}

fn format_time<Tz>(time: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_opt(time, 0).single().map_or_else(
        || time.to_string(),
        |dt| dt.format(TIME_FORMAT).to_string(),
    )
}
