//! Backend Supervisor
//!
//! Owns the backend process for the whole application lifetime: started once
//! when the app is ready, guaranteed not to outlive the window host.

use std::process::Child;
use std::sync::{Mutex, MutexGuard};

use super::config::{BackendConfig, RunMode};
use super::process::{launch_plan, spawn, LaunchPlan};

/// Lifecycle of the supervised backend process.
///
/// `start` is only valid from `NotStarted`; `stop` is a safe no-op from any
/// state. There is deliberately no restarted state: a backend that fails to
/// spawn stays down, and the UI's own requests surface the outage.
#[derive(Debug)]
enum Lifecycle {
    NotStarted,
    Running(Child),
    Stopped,
}

/// Exclusive owner of the one backend process handle.
pub struct BackendSupervisor {
    lifecycle: Mutex<Lifecycle>,
    config: BackendConfig,
}

impl BackendSupervisor {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            lifecycle: Mutex::new(Lifecycle::NotStarted),
            config,
        }
    }

    pub fn mode(&self) -> RunMode {
        self.config.mode
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.lock(), Lifecycle::Running(_))
    }

    /// Launch the backend for the configured run mode.
    ///
    /// Returns as soon as the spawn request is issued; there is no readiness
    /// handshake with the backend, the UI retries its own connection. A
    /// spawn failure is logged and swallowed so the window host keeps
    /// running with a non-functional backend.
    pub fn start(&self) {
        let mut lifecycle = self.lock();
        if !matches!(*lifecycle, Lifecycle::NotStarted) {
            log::warn!("[Backend] Already started, ignoring");
            return;
        }

        let plan = launch_plan(&self.config);
        log::info!(
            "[Backend] Starting {} ({} mode)",
            plan.command.display(),
            self.config.mode.as_str()
        );

        *lifecycle = Self::launch(plan);
    }

    fn launch(plan: LaunchPlan) -> Lifecycle {
        match spawn(&plan) {
            Ok(child) => {
                log::info!("[Backend] Started (PID: {})", child.id());
                Lifecycle::Running(child)
            }
            Err(e) => {
                log::error!("[Backend] Failed to spawn {}: {}", plan.command.display(), e);
                Lifecycle::Stopped
            }
        }
    }

    /// Request termination of the backend if one is running.
    ///
    /// Idempotent: both the all-windows-closed and the final-quit paths call
    /// this, so a second invocation must be a silent no-op. Termination is
    /// fire-and-forget; exit confirmation is not awaited.
    pub fn stop(&self) {
        let mut lifecycle = self.lock();
        if let Lifecycle::Running(child) = &mut *lifecycle {
            log::info!("[Backend] Stopping (PID: {})", child.id());
            if let Err(e) = child.kill() {
                log::warn!("[Backend] Kill failed: {}", e);
            }
            // Reap immediately if it already exited; otherwise the OS
            // collects it when the host process goes away.
            let _ = child.try_wait();
            *lifecycle = Lifecycle::Stopped;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for BackendSupervisor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::config::{BackendConfig, RunMode};

    /// Packaged config pointing at a resource dir that doesn't exist, so
    /// spawns fail deterministically.
    fn unspawnable_config() -> BackendConfig {
        let missing = std::env::temp_dir().join("bird-indexer-test-resources");
        BackendConfig::new(RunMode::Packaged, 8000, missing.clone(), missing)
    }

    #[test]
    fn stop_before_start_is_a_noop() {
        let supervisor = BackendSupervisor::new(unspawnable_config());
        supervisor.stop();
        assert!(!supervisor.is_running());
    }

    #[test]
    fn spawn_failure_is_nonfatal() {
        let supervisor = BackendSupervisor::new(unspawnable_config());
        supervisor.start();
        assert!(!supervisor.is_running());
        // Still safe to stop after a failed start
        supervisor.stop();
        assert!(!supervisor.is_running());
    }

    #[test]
    fn start_is_only_valid_once() {
        let supervisor = BackendSupervisor::new(unspawnable_config());
        supervisor.start();
        supervisor.start();
        assert!(!supervisor.is_running());
    }

    #[cfg(unix)]
    #[test]
    fn stop_twice_terminates_at_most_once() {
        use crate::backend::process::{IoDisposition, LaunchPlan};
        use std::path::PathBuf;

        let supervisor = BackendSupervisor::new(unspawnable_config());
        let plan = LaunchPlan {
            command: PathBuf::from("/bin/sleep"),
            args: vec![PathBuf::from("30")],
            io: IoDisposition::Discard,
            hide_console: false,
        };
        *supervisor.lock() = BackendSupervisor::launch(plan);
        assert!(supervisor.is_running());

        supervisor.stop();
        assert!(!supervisor.is_running());

        // Second stop must not fail or touch another process
        supervisor.stop();
        assert!(!supervisor.is_running());
    }

    #[cfg(unix)]
    #[test]
    fn drop_stops_a_running_backend() {
        use crate::backend::process::{IoDisposition, LaunchPlan};
        use std::path::PathBuf;

        let supervisor = BackendSupervisor::new(unspawnable_config());
        let plan = LaunchPlan {
            command: PathBuf::from("/bin/sleep"),
            args: vec![PathBuf::from("30")],
            io: IoDisposition::Discard,
            hide_console: false,
        };
        *supervisor.lock() = BackendSupervisor::launch(plan);
        assert!(supervisor.is_running());
        drop(supervisor);
    }
}
