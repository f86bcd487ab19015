//! Tango application core
//!
//! State, orchestration and preview layout; platform-independent so it can
//! be driven by fake backends.

pub mod config;
pub mod orchestrator;
pub mod preview;
pub mod state;

pub use config::AppConfig;
pub use orchestrator::{CaptureEvent, Orchestrator, SaveDialog, SaveOutcome};
pub use state::{Action, AppState};
