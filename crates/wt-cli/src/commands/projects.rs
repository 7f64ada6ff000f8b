//! Projects command for listing known projects.

use std::io::Write;

use anyhow::{Context, Result};
use wt_db::Database;

/// Runs the projects command. The active project is marked with `*`.
pub fn run<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let active = db
        .get_active_project()
        .context("failed to read active project")?;
    let projects = db.list_projects().context("failed to list projects")?;
    let width = projects.iter().map(|p| p.chars().count()).max().unwrap_or(0);

    for project in &projects {
        let marker = if *project == active { '*' } else { ' ' };
        let count = db
            .count_events(project)
            .with_context(|| format!("failed to count events for {project}"))?;
        let noun = if count == 1 { "event" } else { "events" };
        writeln!(writer, "{marker} {project:<width$}  {count} {noun}")?;
    }

    Ok(())
}
