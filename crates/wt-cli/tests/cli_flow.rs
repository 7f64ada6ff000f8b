//! End-to-end tests that drive the `wt` binary against a temp database.
//!
//! Each test gets its own `HOME` and `WORK_TRACKER_DB_PATH` so nothing from
//! the developer's real configuration leaks in.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use wt_core::EventType;
use wt_db::Database;

fn wt_binary() -> String {
    env!("CARGO_BIN_EXE_wt").to_string()
}

struct Env {
    temp: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    /// Nested on purpose: the CLI creates missing parent directories.
    fn db_path(&self) -> PathBuf {
        self.temp.path().join("data/nested/work_tracker.db")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(wt_binary());
        cmd.env("HOME", self.temp.path())
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("XDG_DATA_HOME")
            .env_remove("RUST_LOG")
            .env("WORK_TRACKER_DB_PATH", self.db_path());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("failed to run wt")
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "wt {args:?} should succeed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    fn db(&self) -> Database {
        Database::open(&self.db_path()).unwrap()
    }
}

fn types(db: &Database, project: &str) -> Vec<EventType> {
    db.list_events(project)
        .unwrap()
        .into_iter()
        .map(|e| e.event_type)
        .collect()
}

/// start → start "lunch" → stop "done" in the default project.
#[test]
fn test_start_marker_stop_flow() {
    let env = Env::new();

    assert_eq!(env.run_ok(&[]), "Started work [default]\n");
    assert_eq!(
        env.run_ok(&["-m", "lunch"]),
        "Created marker [default]: lunch\n"
    );
    assert_eq!(
        env.run_ok(&["-s", "-m", "done"]),
        "Stopped work [default]: done\n"
    );

    let db = env.db();
    let events = db.list_events("default").unwrap();
    assert_eq!(
        types(&db, "default"),
        vec![EventType::Start, EventType::Marker, EventType::Stop]
    );
    assert_eq!(events[0].message, "");
    assert_eq!(events[1].message, "lunch");
    assert_eq!(events[2].message, "done");
    assert!(db.get_open_start("default").unwrap().is_none());
    assert_eq!(
        db.summarize("default").unwrap(),
        events[2].time - events[0].time
    );
}

/// Switching projects scopes new events without touching the old project.
#[test]
fn test_project_switch_flow() {
    let env = Env::new();

    env.run_ok(&[]);
    assert_eq!(env.run_ok(&["-p", "proj2"]), "Switched to project proj2\n");
    assert_eq!(env.run_ok(&[]), "Started work [proj2]\n");

    let db = env.db();
    assert_eq!(types(&db, "default"), vec![EventType::Start]);
    assert_eq!(types(&db, "proj2"), vec![EventType::Start]);
    assert_eq!(db.get_active_project().unwrap(), "proj2");

    let projects = env.run_ok(&["--projects"]);
    assert_eq!(projects, "  default  1 event\n* proj2    1 event\n");
}

#[test]
fn test_project_flag_combines_with_stop() {
    let env = Env::new();

    let output = env.run_ok(&["-p", "client", "-s", "-m", "wrap"]);
    assert_eq!(
        output,
        "Switched to project client\nStopped work [client]: wrap (no session was running)\n"
    );
    assert_eq!(types(&env.db(), "client"), vec![EventType::Stop]);
}

#[test]
fn test_dangling_stop_succeeds() {
    let env = Env::new();

    env.run_ok(&["-s"]);
    env.run_ok(&["-s"]);

    assert_eq!(
        types(&env.db(), "default"),
        vec![EventType::Stop, EventType::Stop]
    );
}

#[test]
fn test_list_and_summary_views() {
    let env = Env::new();

    assert_eq!(
        env.run_ok(&["list"]),
        "No events recorded for project default.\n"
    );

    env.run_ok(&["-m", "kickoff"]);
    let list = env.run_ok(&["list"]);
    assert!(list.starts_with("Events for project default\n"));
    assert!(list.contains("kickoff"));
    assert!(list.contains("Total time worked: 0h 0m 0s"));
    assert!(list.contains("Current session: "));

    env.run_ok(&["-s"]);
    let summary = env.run_ok(&["--summary"]);
    let mut lines = summary.lines();
    assert_eq!(lines.next(), Some("PROJECT  TOTAL"));
    assert!(lines.nth(1).is_some_and(|l| l.starts_with("default  ")));
}

#[test]
fn test_invalid_usage_exits_with_usage_error() {
    let env = Env::new();

    for args in [&["-s", "list"][..], &["-p", ""], &["--bogus"]] {
        let output = env.run(args);
        assert_eq!(output.status.code(), Some(2), "wt {args:?}");
    }
    assert!(!env.db_path().exists(), "usage errors must not touch the store");
}

#[test]
fn test_unopenable_database_fails() {
    let env = Env::new();
    let dir = env.temp.path().join("a-directory");
    std::fs::create_dir_all(&dir).unwrap();

    let output = env
        .command()
        .env("WORK_TRACKER_DB_PATH", &dir)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to open"), "stderr: {stderr}");
}

#[test]
fn test_storage_failures_name_the_operation() {
    let env = Env::new();
    let db_path = env.db_path();
    std::fs::create_dir_all(db_path.parent().unwrap()).unwrap();
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute_batch("CREATE TABLE state (id INTEGER PRIMARY KEY, other TEXT);")
        .unwrap();

    for args in [&["list"][..], &["--projects"], &[]] {
        let output = env.run(args);
        assert!(!output.status.success(), "wt {args:?}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("failed to read active project"),
            "wt {args:?} stderr: {stderr}"
        );
    }
}

#[test]
fn test_config_file_supplies_database_path() {
    let env = Env::new();
    let db_path = env.temp.path().join("from-config.db");
    let config_path = env.temp.path().join("wt.toml");
    std::fs::write(
        &config_path,
        format!("db_path = {:?}\n", db_path.display().to_string()),
    )
    .unwrap();

    let output = env
        .command()
        .env_remove("WORK_TRACKER_DB_PATH")
        .arg("--config")
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    assert!(exists(&db_path));
    assert!(!exists(&env.db_path()));
}

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}
