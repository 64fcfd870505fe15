//! # Calc TUI
//!
//! A terminal calculator front-end. Buttons and typing build an expression
//! string; evaluation is delegated to a remote HTTP service.
//!
//! ## Features
//! - 24-button grid (keyboard and mouse)
//! - Editable expression line
//! - Remote evaluation with timeout and cancellation
//! - In-session evaluation history
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (expression/result state)
//! - Network Layer (Tokio runtime, evaluator client)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use error::EvalError;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{action_for, ControlAction, HistoryEntry, CONTROL_LABELS};
pub use network::{EvaluatorClient, NetworkActor};
