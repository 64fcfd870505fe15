//! Command handlers - business logic for processing UI events

use crate::app::state::PendingEvaluation;
use crate::app::AppState;
use crate::constants::GRID_COLUMNS;
use crate::messages::ui_events::{Direction, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{action_for, ControlAction, HistoryEntry, CONTROL_LABELS};

impl AppState {
    // ========================
    // Grid controls
    // ========================

    /// Apply a control by label. Returns a command when the control submits.
    pub fn activate_control(&mut self, label: &str) -> Option<NetworkCommand> {
        match action_for(label) {
            Some(ControlAction::Append(token)) => {
                self.append_token(token);
                None
            }
            Some(ControlAction::Submit) => self.submit(),
            None => {
                tracing::debug!(label, "Ignoring unknown control");
                None
            }
        }
    }

    pub fn activate_index(&mut self, index: usize) -> Option<NetworkCommand> {
        let label = CONTROL_LABELS.get(index)?;
        self.selected_control = index;
        self.activate_control(label)
    }

    pub fn activate_selected(&mut self) -> Option<NetworkCommand> {
        self.activate_index(self.selected_control)
    }

    pub fn append_token(&mut self, token: &str) {
        self.expression.push_str(token);
        self.cursor_position = self.expression.len();
        self.after_edit();
    }

    pub fn move_selection(&mut self, direction: Direction) {
        let rows = CONTROL_LABELS.len() / GRID_COLUMNS;
        let row = self.selected_control / GRID_COLUMNS;
        let col = self.selected_control % GRID_COLUMNS;
        let (row, col) = match direction {
            Direction::Up => (row.saturating_sub(1), col),
            Direction::Down => ((row + 1).min(rows - 1), col),
            Direction::Left => (row, col.saturating_sub(1)),
            Direction::Right => (row, (col + 1).min(GRID_COLUMNS - 1)),
        };
        self.selected_control = row * GRID_COLUMNS + col;
    }

    // ========================
    // Expression field
    // ========================

    /// Replace the expression with the field's new value
    pub fn set_expression(&mut self, value: impl Into<String>) {
        self.expression = value.into();
        if self.cursor_position > self.expression.len()
            || !self.expression.is_char_boundary(self.cursor_position)
        {
            self.cursor_position = self.expression.len();
        }
        self.after_edit();
    }

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.expression.len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position.min(self.expression.len());
        let mut value = self.expression.clone();
        value.insert(cursor_pos, c);
        self.cursor_position = cursor_pos + c.len_utf8();
        self.set_expression(value);
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        let prev_pos = self.expression[..cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        let mut value = self.expression.clone();
        value.remove(prev_pos);
        self.cursor_position = prev_pos;
        self.set_expression(value);
    }

    pub fn clear_input(&mut self) {
        self.cursor_position = 0;
        self.set_expression(String::new());
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.expression[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = &self.expression;
        if self.cursor_position < input.len() {
            self.cursor_position = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
        }
    }

    /// Any edit dismisses a stale error and leaves history browsing
    fn after_edit(&mut self) {
        self.error = None;
        self.history_index = None;
        self.history_draft = None;
    }

    // ========================
    // Evaluation
    // ========================

    /// Hand the current expression to the evaluator.
    ///
    /// Returns `None` while another evaluation is still in flight.
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if let Some(pending) = &self.pending {
            tracing::debug!(id = pending.id, "Evaluation already in flight, ignoring submit");
            return None;
        }

        let id = self.next_id();
        let expression = self.expression.clone();
        tracing::info!(id, expression = %expression, "Submitting expression");

        self.error = None;
        self.pending = Some(PendingEvaluation {
            id,
            expression: expression.clone(),
        });
        Some(NetworkCommand::Evaluate { id, expression })
    }

    pub fn cancel_evaluation(&mut self) -> Option<NetworkCommand> {
        let pending = self.pending.take()?;
        tracing::info!(id = pending.id, "Cancelling evaluation");
        Some(NetworkCommand::Cancel(pending.id))
    }

    /// Fold a network response into state. Responses for anything other
    /// than the pending evaluation are dropped.
    pub fn handle_response(&mut self, response: NetworkResponse) {
        let is_current = self
            .pending
            .as_ref()
            .is_some_and(|p| p.id == response.id());
        if !is_current {
            tracing::debug!(id = response.id(), "Dropping stale response");
            return;
        }
        let expression = self
            .pending
            .take()
            .map(|p| p.expression)
            .unwrap_or_default();

        match response {
            NetworkResponse::Evaluated { value, time_ms, .. } => {
                self.push_history(HistoryEntry::new(expression, value.clone()));
                self.result = value;
                self.error = None;
                self.last_time_ms = Some(time_ms);
            }
            NetworkResponse::Failed { error, time_ms, .. } => {
                tracing::warn!(error = %error, "Evaluation failed");
                self.error = Some(error);
                self.last_time_ms = Some(time_ms);
            }
            NetworkResponse::Cancelled { .. } => {}
        }
    }

    // ========================
    // History
    // ========================

    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let idx = match self.history_index {
            None => 0,
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(i) => i,
        };

        if self.history_index.is_none() {
            self.history_draft = Some(self.expression.clone());
        }
        if let Some(entry) = self.history.get(idx) {
            self.expression = entry.expression.clone();
            self.cursor_position = self.expression.len();
            self.history_index = Some(idx);
        }
    }

    pub fn history_next(&mut self) {
        match self.history_index {
            Some(idx) if idx > 0 => {
                if let Some(entry) = self.history.get(idx - 1) {
                    self.expression = entry.expression.clone();
                    self.cursor_position = self.expression.len();
                    self.history_index = Some(idx - 1);
                }
            }
            Some(_) => {
                // Back to what was being typed
                self.expression = self.history_draft.take().unwrap_or_default();
                self.cursor_position = self.expression.len();
                self.history_index = None;
            }
            None => {}
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
