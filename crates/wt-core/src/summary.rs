//! Duration totals over a project's event sequence.

use crate::event::Event;
use crate::event_type::EventType;

/// Sums the durations of closed start→stop pairs, in seconds.
///
/// `events` must be one project's events in time order. A `start` replaces
/// any earlier unmatched start; a `stop` without a pending start is ignored;
/// markers are skipped. An unterminated start contributes nothing.
///
/// Durations are not clamped: a stop stamped before its start (clock
/// anomaly) yields a negative contribution.
pub fn summarize_events<'a, I>(events: I) -> i64
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut total = 0;
    let mut pending: Option<i64> = None;

    for event in events {
        match event.event_type {
            EventType::Start => pending = Some(event.time),
            EventType::Stop => {
                if let Some(start) = pending.take() {
                    total += event.time - start;
                }
            }
            EventType::Marker => {}
        }
    }

    total
}

/// Seconds since the open session began, if the sequence ends running.
pub fn open_session_elapsed(events: &[Event], now: i64) -> Option<i64> {
    events
        .iter()
        .rev()
        .find(|e| e.event_type != EventType::Marker)
        .filter(|e| e.event_type == EventType::Start)
        .map(|start| now - start.time)
}

/// Formats seconds as `"{h}h {m}m {s}s"`.
pub fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs();
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{sign}{hours}h {minutes}m {seconds}s")
}
