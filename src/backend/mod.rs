//! Backend Supervision Module
//!
//! Owns the lifecycle of the Python backend that serves the UI's data:
//! mode-dependent path resolution, launch wiring, and start/stop discipline.

pub mod config;
pub mod process;
pub mod supervisor;

pub use supervisor::BackendSupervisor;
