//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::InputMode;
use crate::models::HistoryEntry;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Buffers
    pub expression: String,
    pub result: String,

    // Expression field
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Grid
    pub selected_control: usize,

    // Evaluation
    pub is_pending: bool,
    pub error: Option<String>,
    pub last_time_ms: Option<u64>,

    // History
    pub history: Vec<HistoryEntry>,
    pub history_index: Option<usize>,

    // Popups
    pub show_help: bool,

    pub evaluator_url: String,
}
