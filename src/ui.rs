use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{prelude::*, widgets::*};

use crate::constants::GRID_COLUMNS;
use crate::messages::{RenderState, UiEvent};
use crate::models::{CONTROL_LABELS, EQUALS};

/// Widest the calculator gets, in columns
const MAX_WIDTH: u16 = 48;

/// Screen regions, shared by drawing and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub result: Rect,
    pub expression: Rect,
    pub grid: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let column = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Max(MAX_WIDTH),
            Constraint::Fill(1),
        ])
        .split(area)[1];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title
            Constraint::Length(3),  // Result
            Constraint::Length(3),  // Expression
            Constraint::Min(6),     // Buttons
            Constraint::Length(1),  // Status bar
        ])
        .split(column);

    ScreenLayout {
        title: chunks[0],
        result: chunks[1],
        expression: chunks[2],
        grid: chunks[3],
        status: chunks[4],
    }
}

/// Split the grid area into one equal cell per control, row-major
pub fn grid_cells(grid: Rect) -> Vec<Rect> {
    let rows = CONTROL_LABELS.len() / GRID_COLUMNS;
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(grid);

    row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .split(*row)
                .to_vec()
        })
        .collect()
}

/// Translate a left click into the control or field under it
pub fn mouse_to_ui_event(mouse: MouseEvent, area: Rect, show_help: bool) -> Option<UiEvent> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    let layout = screen_layout(area);
    let point = Position::new(mouse.column, mouse.row);

    if layout.expression.contains(point) {
        return Some(UiEvent::StartEditing);
    }
    grid_cells(layout.grid)
        .iter()
        .position(|cell| cell.contains(point))
        .map(UiEvent::ActivateIndex)
}

/// Style of one button
pub fn control_style(label: &str, selected: bool) -> Style {
    let base = if label == EQUALS {
        Style::default().fg(Color::Black).bg(Color::Cyan).bold()
    } else if label.chars().all(|c| c.is_ascii_digit() || c == '.') {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Yellow)
    };

    if selected {
        base.add_modifier(Modifier::REVERSED)
    } else {
        base
    }
}

/// Renders one button of the grid
pub fn render_control(label: &str, selected: bool, pending: bool) -> Paragraph<'_> {
    let style = if pending && label == EQUALS {
        control_style(label, selected).add_modifier(Modifier::DIM)
    } else {
        control_style(label, selected)
    };
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        )
}

/// Text of the bottom status line
pub fn status_text(state: &RenderState) -> String {
    use crate::messages::ui_events::InputMode;

    if state.is_pending {
        String::from(" Evaluating... (Ctrl+X to cancel) ")
    } else if state.input_mode == InputMode::Editing {
        String::from(" ESC:stop editing | Enter:evaluate | Ctrl+U:clear ")
    } else {
        String::from(" arrows:select | Enter:press | e:edit | ?:help | q:quit ")
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
