//! Switch command for changing the active project.

use std::io::Write;

use anyhow::{Context, Result};
use wt_core::{ProjectName, SessionController};
use wt_db::Database;

/// Makes `project` the active project for this and later invocations.
pub fn run<W: Write>(writer: &mut W, db: &mut Database, project: &ProjectName) -> Result<()> {
    let current = db
        .get_active_project()
        .context("failed to read active project")?;
    SessionController::new(db, current)
        .switch_project(project)
        .with_context(|| format!("failed to switch to project {project}"))?;
    writeln!(writer, "Switched to project {project}")?;
    Ok(())
}
