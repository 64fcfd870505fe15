//! App state - pure data structure with no I/O logic

use std::collections::VecDeque;

use crate::constants::MAX_HISTORY;
use crate::error::EvalError;
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::models::HistoryEntry;

/// An evaluation that has been handed to the network layer
#[derive(Clone, Debug, PartialEq)]
pub struct PendingEvaluation {
    pub id: u64,
    pub expression: String,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Buffers
    pub expression: String,
    pub result: String,

    // Expression field
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Grid
    pub selected_control: usize,

    // Evaluation
    pub next_request_id: u64,
    pub pending: Option<PendingEvaluation>,
    pub error: Option<EvalError>,
    pub last_time_ms: Option<u64>,

    // History, most recent first
    pub history: VecDeque<HistoryEntry>,
    pub history_index: Option<usize>,
    /// Expression being composed before history browsing started
    pub history_draft: Option<String>,

    // Popups
    pub show_help: bool,

    pub evaluator_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            expression: String::new(),
            result: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            selected_control: 0,
            next_request_id: 1,
            pending: None,
            error: None,
            last_time_ms: None,
            history: VecDeque::with_capacity(MAX_HISTORY),
            history_index: None,
            history_draft: None,
            show_help: false,
            evaluator_url: String::new(),
        }
    }

    pub fn with_evaluator_url(mut self, url: impl Into<String>) -> Self {
        self.evaluator_url = url.into();
        self
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a finished evaluation, evicting the oldest past the cap
    pub fn push_history(&mut self, entry: HistoryEntry) {
        if self.history.len() >= MAX_HISTORY {
            self.history.pop_back();
        }
        self.history.push_front(entry);
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            expression: self.expression.clone(),
            result: self.result.clone(),
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            selected_control: self.selected_control,
            is_pending: self.is_pending(),
            error: self.error.as_ref().map(ToString::to_string),
            last_time_ms: self.last_time_ms,
            history: self.history.iter().cloned().collect(),
            history_index: self.history_index,
            show_help: self.show_help,
            evaluator_url: self.evaluator_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let state = AppState::new();
        assert_eq!(state.expression, "");
        assert_eq!(state.result, "");
        assert!(!state.is_pending());
    }

    #[test]
    fn test_ids_increase() {
        let mut state = AppState::new();
        assert_eq!(state.next_id(), 1);
        assert_eq!(state.next_id(), 2);
    }

    #[test]
    fn test_history_is_capped() {
        let mut state = AppState::new();
        for i in 0..MAX_HISTORY + 5 {
            state.push_history(HistoryEntry::new(i.to_string(), i.to_string()));
        }
        assert_eq!(state.history.len(), MAX_HISTORY);
        assert_eq!(state.history[0].expression, (MAX_HISTORY + 4).to_string());
    }

    #[test]
    fn test_render_state_carries_error_text() {
        let mut state = AppState::new().with_evaluator_url("http://localhost:8081/api/calculate");
        state.error = Some(EvalError::Malformed("missing data".into()));
        let render = state.to_render_state();
        assert_eq!(render.error.as_deref(), Some("Malformed response: missing data"));
        assert_eq!(render.evaluator_url, "http://localhost:8081/api/calculate");
    }
}
