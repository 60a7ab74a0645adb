//! Tauri Commands
//!
//! Exposes backend status and application control to the frontend.

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, State};

use crate::backend::BackendSupervisor;

/// Backend status response
#[derive(Debug, Serialize, Deserialize)]
pub struct BackendStatus {
    pub running: bool,
    pub mode: String, // "packaged" or "development"
    pub port: u16,
}

/// Report whether the supervised backend process is running, so the UI can
/// tell a booting backend apart from a dead one when its requests fail.
#[tauri::command]
pub fn backend_status(state: State<'_, BackendSupervisor>) -> BackendStatus {
    BackendStatus {
        running: state.is_running(),
        mode: state.mode().as_str().to_string(),
        port: state.port(),
    }
}

/// Get app version
#[tauri::command]
pub fn get_app_version(app: AppHandle) -> String {
    app.config()
        .version
        .clone()
        .unwrap_or_else(|| "0.0.0".to_string())
}

/// Quit the application, stopping the backend first.
#[tauri::command]
pub fn quit_app(app: AppHandle, state: State<'_, BackendSupervisor>) {
    state.stop();
    app.exit(0);
}
