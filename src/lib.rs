//! Bird Photo Indexer desktop shell.
//!
//! Hosts the built UI in a native window and supervises the Python backend
//! process on its behalf. The window host bridges application lifecycle
//! events to the supervisor; it never talks to the backend itself.

use std::path::PathBuf;

use tauri::{Manager, RunEvent, WebviewUrl, WebviewWindowBuilder};

pub mod backend;
mod commands;

use backend::config::{find_source_root, BackendConfig, RunMode};
use backend::BackendSupervisor;
use commands::{backend_status, get_app_version, quit_app};

/// Port the FastAPI backend listens on.
const BACKEND_PORT: u16 = 8000;

/// Main window geometry.
const WINDOW_WIDTH: f64 = 1300.0;
const WINDOW_HEIGHT: f64 = 900.0;

/// Create and show the main window loading the UI bundle.
///
/// The page runs in an isolated webview: beyond rendering and the commands
/// declared in the capability set, it cannot reach host-level APIs.
fn create_main_window(app: &tauri::AppHandle) -> tauri::Result<()> {
    WebviewWindowBuilder::new(app, "main", WebviewUrl::App("index.html".into()))
        .title("Bird Photo Indexer")
        .inner_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .build()?;
    Ok(())
}

/// Resolve the platform resource directory holding bundled assets.
fn resolve_resource_dir(app: &tauri::App) -> PathBuf {
    app.path().resource_dir().unwrap_or_else(|_| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::default()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .setup(|app| {
            let mode = RunMode::detect();
            let config = BackendConfig::new(
                mode,
                BACKEND_PORT,
                resolve_resource_dir(app),
                find_source_root(),
            );

            log::info!("[Startup] Run mode: {}", mode.as_str());
            log::info!(
                "[Startup] Backend path: {}",
                config.executable_path().display()
            );

            // Start the backend before the window exists, so the UI's first
            // requests only ever race against backend boot, never against
            // the spawn itself. No readiness handshake: the UI retries its
            // own connection.
            let supervisor = BackendSupervisor::new(config);
            supervisor.start();
            app.manage(supervisor);

            create_main_window(app.handle())?;

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            backend_status,
            get_app_version,
            quit_app
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            // All windows closed: shut the backend down. On macOS the app
            // itself stays resident per platform convention, but the backend
            // is stopped regardless.
            RunEvent::ExitRequested { code: None, api, .. } => {
                app_handle.state::<BackendSupervisor>().stop();
                if cfg!(target_os = "macos") {
                    api.prevent_exit();
                }
            }
            // Final safety net before the process exits. The supervisor's
            // stop is idempotent, so running after the arm above is fine.
            RunEvent::Exit => {
                app_handle.state::<BackendSupervisor>().stop();
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen {
                has_visible_windows,
                ..
            } => {
                if !has_visible_windows {
                    if let Err(e) = create_main_window(app_handle) {
                        log::error!("[Window] Failed to recreate main window: {}", e);
                    }
                }
            }
            _ => {}
        });
}
