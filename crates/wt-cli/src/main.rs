use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wt_cli::commands::{list, projects, record, summary, switch};
use wt_cli::{Action, Cli, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<wt_db::Database> {
    let config = Config::load_from(config_path)?;
    tracing::debug!(?config, "loaded configuration");

    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    wt_db::Database::open(db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut db = open_database(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    if let Some(project) = &cli.project {
        switch::run(&mut stdout, &mut db, project)?;
    }

    match cli.action() {
        Action::Record(intent) => {
            record::run(&mut stdout, &mut db, intent, &cli.message)?;
        }
        Action::List => list::run(&mut stdout, &db)?,
        Action::Projects => projects::run(&mut stdout, &db)?,
        Action::Summary => summary::run(&mut stdout, &db)?,
        Action::SwitchOnly => {}
    }

    Ok(())
}
