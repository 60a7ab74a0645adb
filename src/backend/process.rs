//! Backend Process Launching
//!
//! Builds the mode-dependent launch plan and spawns the backend process.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use super::config::{BackendConfig, RunMode};

/// What to do with the child's standard I/O streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoDisposition {
    /// Connect the child's streams to the parent console, so backend logs
    /// show up during development.
    Inherit,
    /// Detach the streams entirely (packaged runs have no console).
    Discard,
}

/// Fully resolved description of how to launch the backend.
///
/// Kept as plain data, separate from the spawn itself, so the
/// mode-conditional wiring can be exercised without creating processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub command: PathBuf,
    pub args: Vec<PathBuf>,
    pub io: IoDisposition,
    /// Suppress the console window the OS would otherwise pop up (Windows).
    pub hide_console: bool,
}

/// Pick the Python interpreter for development runs.
///
/// Prefers a project-local virtualenv under the source root, falls back to
/// whatever `python` is on PATH.
fn resolve_interpreter(source_root: &Path) -> PathBuf {
    let venv_python = if cfg!(target_os = "windows") {
        source_root.join(".venv").join("Scripts").join("python.exe")
    } else {
        source_root.join(".venv").join("bin").join("python")
    };

    if venv_python.exists() {
        return venv_python;
    }

    PathBuf::from("python")
}

/// Build the launch plan for the configured run mode.
///
/// Packaged: the bundled executable is launched directly, with no console
/// window and its I/O discarded. Development: the interpreter is invoked
/// with the entry point as its sole argument and I/O wired to the parent.
pub fn launch_plan(config: &BackendConfig) -> LaunchPlan {
    let backend_path = config.executable_path();

    match config.mode {
        RunMode::Packaged => LaunchPlan {
            command: backend_path,
            args: Vec::new(),
            io: IoDisposition::Discard,
            hide_console: true,
        },
        RunMode::Development => LaunchPlan {
            command: resolve_interpreter(&config.source_root),
            args: vec![backend_path],
            io: IoDisposition::Inherit,
            hide_console: false,
        },
    }
}

/// Spawn the backend according to `plan`.
pub fn spawn(plan: &LaunchPlan) -> io::Result<Child> {
    let mut cmd = Command::new(&plan.command);
    cmd.args(&plan.args);

    match plan.io {
        IoDisposition::Inherit => {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }
        IoDisposition::Discard => {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }
    }

    #[cfg(target_os = "windows")]
    if plan.hide_console {
        use std::os::windows::process::CommandExt;
        cmd.creation_flags(0x08000000); // CREATE_NO_WINDOW
    }

    cmd.spawn()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::config::{BackendConfig, RunMode};

    fn config(mode: RunMode) -> BackendConfig {
        BackendConfig::new(
            mode,
            8000,
            PathBuf::from("/opt/bird-indexer/resources"),
            PathBuf::from("/home/dev/bird-indexer"),
        )
    }

    #[test]
    fn development_plan_runs_interpreter_with_entry_point() {
        let plan = launch_plan(&config(RunMode::Development));
        // No .venv under the synthetic root, so the system interpreter wins
        assert_eq!(plan.command, PathBuf::from("python"));
        assert_eq!(
            plan.args,
            vec![PathBuf::from("/home/dev/bird-indexer/src/api/main.py")]
        );
        assert_eq!(plan.io, IoDisposition::Inherit);
        assert!(!plan.hide_console);
    }

    #[test]
    fn packaged_plan_launches_executable_directly() {
        let plan = launch_plan(&config(RunMode::Packaged));
        assert_eq!(
            plan.command,
            PathBuf::from("/opt/bird-indexer/resources/backend.exe")
        );
        assert!(plan.args.is_empty());
        assert_eq!(plan.io, IoDisposition::Discard);
        assert!(plan.hide_console);
    }

    #[test]
    fn spawn_of_missing_executable_reports_io_error() {
        let plan = LaunchPlan {
            command: std::env::temp_dir().join("bird-indexer-missing-backend.exe"),
            args: Vec::new(),
            io: IoDisposition::Discard,
            hide_console: false,
        };
        assert!(spawn(&plan).is_err());
    }
}
