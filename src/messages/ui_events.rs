//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Grid
    /// Activate the control with this label
    Activate(&'static str),
    ActivateSelected,
    /// Activate the control at this grid index (mouse click)
    ActivateIndex(usize),
    MoveSelection(Direction),

    // Expression field editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    ClearInput,
    CursorLeft,
    CursorRight,

    // Evaluation
    Submit,
    CancelEvaluation,

    // History
    HistoryPrev,
    HistoryNext,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Selection movement inside the grid
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, input_mode: InputMode, show_help: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('x') => return Some(UiEvent::CancelEvaluation),
            KeyCode::Char('u') if input_mode == InputMode::Editing => {
                return Some(UiEvent::ClearInput)
            }
            KeyCode::Up => return Some(UiEvent::HistoryPrev),
            KeyCode::Down => return Some(UiEvent::HistoryNext),
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => handle_grid_keys(key),
        InputMode::Editing => handle_editing_keys(key),
    }
}

/// Keys while navigating the button grid
fn handle_grid_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('e') | KeyCode::Char('i') => Some(UiEvent::StartEditing),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::ActivateSelected),
        KeyCode::Char(c) => shortcut_label(c).map(UiEvent::Activate),
        KeyCode::Up => Some(UiEvent::MoveSelection(Direction::Up)),
        KeyCode::Down => Some(UiEvent::MoveSelection(Direction::Down)),
        KeyCode::Left => Some(UiEvent::MoveSelection(Direction::Left)),
        KeyCode::Right => Some(UiEvent::MoveSelection(Direction::Right)),
        _ => None,
    }
}

/// Keys while the expression field has focus
fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UiEvent::CharInput(c))
        }
        _ => None,
    }
}

/// Keyboard shortcut for a grid control
fn shortcut_label(c: char) -> Option<&'static str> {
    let label = match c {
        '0' => "0",
        '1' => "1",
        '2' => "2",
        '3' => "3",
        '4' => "4",
        '5' => "5",
        '6' => "6",
        '7' => "7",
        '8' => "8",
        '9' => "9",
        '.' => ".",
        '+' => "+",
        '-' => "-",
        '%' => "%",
        '*' | 'x' => "X",
        '/' => "÷",
        '=' => "=",
        _ => return None,
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_operator_shortcuts() {
        let ev = |c| key_to_ui_event(press(KeyCode::Char(c)), InputMode::Normal, false);
        assert_eq!(ev('*'), Some(UiEvent::Activate("X")));
        assert_eq!(ev('/'), Some(UiEvent::Activate("÷")));
        assert_eq!(ev('='), Some(UiEvent::Activate("=")));
        assert_eq!(ev('7'), Some(UiEvent::Activate("7")));
        assert_eq!(ev('z'), None);
    }

    #[test]
    fn test_editing_mode_takes_raw_chars() {
        let ev = key_to_ui_event(press(KeyCode::Char('q')), InputMode::Editing, false);
        assert_eq!(ev, Some(UiEvent::CharInput('q')));
        let ev = key_to_ui_event(press(KeyCode::Enter), InputMode::Editing, false);
        assert_eq!(ev, Some(UiEvent::Submit));
    }

    #[test]
    fn test_help_swallows_keys() {
        let ev = key_to_ui_event(press(KeyCode::Char('7')), InputMode::Normal, true);
        assert_eq!(ev, Some(UiEvent::CloseHelp));
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(ctrl('c'), InputMode::Editing, true), Some(UiEvent::Quit));
        assert_eq!(key_to_ui_event(ctrl('x'), InputMode::Normal, false), Some(UiEvent::CancelEvaluation));
        assert_eq!(key_to_ui_event(ctrl('u'), InputMode::Editing, false), Some(UiEvent::ClearInput));
    }

    #[test]
    fn test_release_ignored() {
        let mut key = press(KeyCode::Char('1'));
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_ui_event(key, InputMode::Normal, false), None);
    }
}
