//! Summary command for total time worked per project.

use std::io::Write;

use anyhow::{Context, Result};
use wt_core::format_duration;
use wt_db::Database;

/// Closed-session total for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTotal {
    pub project: String,
    pub seconds: i64,
}

/// Totals for every known project, in name order.
pub fn project_totals(db: &Database) -> Result<Vec<ProjectTotal>> {
    let mut totals = Vec::new();
    for project in db.list_projects().context("failed to list projects")? {
        let seconds = db
            .summarize(&project)
            .with_context(|| format!("failed to summarize {project}"))?;
        totals.push(ProjectTotal { project, seconds });
    }
    Ok(totals)
}

/// Runs the summary command.
pub fn run<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let totals = project_totals(db)?;
    write_summary(writer, &totals)?;
    Ok(())
}

/// Renders per-project totals as a two-column table.
pub fn write_summary<W: Write>(writer: &mut W, totals: &[ProjectTotal]) -> std::io::Result<()> {
    let rows: Vec<(&str, String)> = totals
        .iter()
        .map(|t| (t.project.as_str(), format_duration(t.seconds)))
        .collect();
    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0)
        .max("PROJECT".len());
    let total_width = rows
        .iter()
        .map(|(_, total)| total.len())
        .max()
        .unwrap_or(0)
        .max("TOTAL".len());

    writeln!(writer, "{:<name_width$}  TOTAL", "PROJECT")?;
    writeln!(
        writer,
        "{}  {}",
        "─".repeat(name_width),
        "─".repeat(total_width)
    )?;
    for (name, total) in rows {
        writeln!(writer, "{name:<name_width$}  {total}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use wt_core::{EventType, NewEvent, ProjectName};

    #[test]
    fn summary_lists_every_project() {
        let mut db = Database::open_in_memory().unwrap();
        for (event_type, time, project) in [
            (EventType::Start, 100, "default"),
            (EventType::Stop, 150, "default"),
            (EventType::Start, 200, "default"),
            (EventType::Stop, 230, "default"),
            (EventType::Start, 0, "client-website"),
            (EventType::Stop, 5_400, "client-website"),
            (EventType::Start, 10, "side"),
        ] {
            db.insert_event(&NewEvent::new(event_type, "", time, project))
                .unwrap();
        }
        db.set_active_project(&ProjectName::new("empty").unwrap())
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &db).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        PROJECT         TOTAL
        ──────────────  ─────────
        client-website  1h 30m 0s
        default         0h 1m 20s
        empty           0h 0m 0s
        side            0h 0m 0s
        ");
    }

    #[test]
    fn project_totals_match_store() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_event(&NewEvent::new(EventType::Start, "", 100, "default"))
            .unwrap();
        db.insert_event(&NewEvent::new(EventType::Stop, "", 160, "default"))
            .unwrap();

        assert_eq!(
            project_totals(&db).unwrap(),
            vec![ProjectTotal {
                project: "default".to_string(),
                seconds: 60,
            }]
        );
    }
}
