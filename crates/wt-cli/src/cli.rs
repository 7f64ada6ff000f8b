//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use wt_core::{Intent, ProjectName};

/// Personal work-session tracker.
///
/// Run without arguments to start a session (or drop a marker if one is
/// already running), with `-s` to stop it.
#[derive(Debug, Parser)]
#[command(name = "wt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Message for the event.
    #[arg(short, long, default_value = "")]
    pub message: String,

    /// Create a stop event.
    #[arg(short, long, conflicts_with_all = ["projects", "summary", "view"])]
    pub stop: bool,

    /// Switch the active project before doing anything else.
    #[arg(short, long, value_name = "NAME")]
    pub project: Option<ProjectName>,

    /// List known projects.
    #[arg(long, conflicts_with_all = ["summary", "view", "message"])]
    pub projects: bool,

    /// Show total time worked per project.
    #[arg(long, conflicts_with_all = ["view", "message"])]
    pub summary: bool,

    /// Show the events of the active project.
    #[arg(value_enum, conflicts_with = "message")]
    pub view: Option<View>,
}

/// Positional views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// List all events of the active project.
    List,
}

/// What a single invocation does once the project switch (if any) is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Record a start (or marker) or a stop in the active project.
    Record(Intent),
    List,
    Projects,
    Summary,
    /// `-p` on its own: switch and do nothing else.
    SwitchOnly,
}

impl Cli {
    /// Resolves the flags into the action to perform.
    pub fn action(&self) -> Action {
        if self.projects {
            Action::Projects
        } else if self.summary {
            Action::Summary
        } else if self.view == Some(View::List) {
            Action::List
        } else if self.stop {
            Action::Record(Intent::Stop)
        } else if self.project.is_some() && self.message.is_empty() {
            Action::SwitchOnly
        } else {
            Action::Record(Intent::Start)
        }
    }
}
