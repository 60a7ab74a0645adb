//! Backend Configuration
//!
//! Run mode detection and backend path resolution.

use std::env;
use std::path::PathBuf;

/// How the application was launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Self-contained distributable with the backend bundled as an executable.
    Packaged,
    /// Running from source with a live Python backend script.
    Development,
}

impl RunMode {
    /// Detect the run mode once at startup: release builds are packaged,
    /// debug builds run from source.
    pub fn detect() -> Self {
        if cfg!(debug_assertions) {
            RunMode::Development
        } else {
            RunMode::Packaged
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Packaged => "packaged",
            RunMode::Development => "development",
        }
    }
}

/// Everything the supervisor needs to locate and launch the backend.
///
/// Resolved once at startup and injected into the supervisor, so the
/// packaged/development branch is taken in one place instead of being
/// re-derived per operation.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub mode: RunMode,
    /// Port the backend listens on (the UI is configured to reach it there).
    pub port: u16,
    /// Platform resource directory holding the bundled backend executable.
    pub resource_dir: PathBuf,
    /// Repository root holding the backend sources in development.
    pub source_root: PathBuf,
}

impl BackendConfig {
    pub fn new(mode: RunMode, port: u16, resource_dir: PathBuf, source_root: PathBuf) -> Self {
        Self {
            mode,
            port,
            resource_dir,
            source_root,
        }
    }

    /// Resolve the backend location for the configured mode.
    ///
    /// Pure path arithmetic: nothing is checked for existence here. A
    /// missing backend only surfaces later, as a spawn failure.
    pub fn executable_path(&self) -> PathBuf {
        match self.mode {
            RunMode::Packaged => self.resource_dir.join("backend.exe"),
            RunMode::Development => self.source_root.join("src").join("api").join("main.py"),
        }
    }
}

/// Locate the repository root holding the backend sources.
///
/// The repository keeps the Python `src/api/` tree next to this crate's
/// manifest, so that is tried first. Dev servers are sometimes launched
/// from elsewhere in the tree, so the current directory and a few of its
/// parents are probed as a fallback.
pub fn find_source_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    if manifest_dir.join("src").join("api").exists() {
        return manifest_dir;
    }

    if let Ok(cwd) = env::current_dir() {
        if cwd.join("src").join("api").exists() {
            return cwd;
        }
        let mut current = cwd.clone();
        for _ in 0..3 {
            if let Some(parent) = current.parent() {
                if parent.join("src").join("api").exists() {
                    return parent.to_path_buf();
                }
                current = parent.to_path_buf();
            }
        }
    }

    manifest_dir
}
