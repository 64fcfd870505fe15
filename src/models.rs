use serde::{Deserialize, Serialize};

/// Labels of the calculator grid, in display order (row-major, 4 columns)
#[rustfmt::skip]
pub const CONTROL_LABELS: [&str; 24] = [
    "%", "CE", "C", "del",
    "1/x", "x^2", "x^(1/2)", "÷",
    "7", "8", "9", "X",
    "4", "5", "6", "-",
    "1", "2", "3", "+",
    "+/-", "0", ".", "=",
];

/// Label of the submit control
pub const EQUALS: &str = "=";

/// What activating a control does to the expression buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    /// Append this token to the expression
    Append(&'static str),
    /// Send the expression to the evaluator
    Submit,
}

/// Map a control label to its action.
///
/// Returns `None` for labels that are not on the grid.
pub fn action_for(label: &str) -> Option<ControlAction> {
    let index = control_index(label)?;
    let label = CONTROL_LABELS[index];
    let action = match label {
        "X" => ControlAction::Append("*"),
        "÷" => ControlAction::Append("/"),
        EQUALS => ControlAction::Submit,
        other => ControlAction::Append(other),
    };
    Some(action)
}

/// Position of a label in the grid
pub fn control_index(label: &str) -> Option<usize> {
    CONTROL_LABELS.iter().position(|l| *l == label)
}

/// A completed evaluation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        HistoryEntry {
            expression: expression.into(),
            result: result.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}
