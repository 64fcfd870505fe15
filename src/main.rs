//! Calc TUI - Actor-based calculator front-end
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - expression/result state processing events
//! - Network Layer (Tokio) - async calls to the evaluator

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use calc_tui::constants::{APP_NAME, APP_VERSION};
use calc_tui::messages::ui_events::{key_to_ui_event, InputMode};
use calc_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use calc_tui::models::CONTROL_LABELS;
use calc_tui::ui::{self, centered_rect, grid_cells, screen_layout, status_text};
use calc_tui::{AppActor, AppState, Config, EvaluatorClient, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_name = config
        .log_file
        .file_name()
        .context("log_file must name a file")?;
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(url = %config.evaluator_url, timeout_secs = config.timeout_secs, "Starting {} {}", APP_NAME, APP_VERSION);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(EvaluatorClient::from_config(&config), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let state = AppState::new().with_evaluator_url(config.evaluator_url.clone());
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            let ui_event = match event::read()? {
                Event::Key(key) => {
                    key_to_ui_event(key, current_state.input_mode, current_state.show_help)
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    ui::mouse_to_ui_event(mouse, area, current_state.show_help)
                }
                _ => None,
            };

            if let Some(event) = ui_event {
                let quit = matches!(event, UiEvent::Quit);
                let _ = ui_tx.send(event);
                if quit {
                    break;
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();
    let layout = screen_layout(area);

    let title = Paragraph::new(Line::from(APP_NAME).bold().cyan()).alignment(Alignment::Center);
    f.render_widget(title, layout.title);

    draw_result(f, state, layout.result);
    draw_expression(f, state, layout.expression);
    draw_grid(f, state, layout.grid);

    let bar = Paragraph::new(status_text(state)).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, layout.status);

    if state.show_help {
        draw_help_popup(f, state, area);
    }
}

fn draw_result(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(if state.is_pending { " Result [...] " } else { " Result " });

    if let Some(ms) = state.last_time_ms {
        block = block.title_bottom(Line::from(format!(" {}ms ", ms)).right_aligned());
    }

    let content = match &state.error {
        Some(err) => Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(state.result.as_str(), Style::default().bold())),
    };

    let result = Paragraph::new(content)
        .alignment(if state.error.is_some() { Alignment::Left } else { Alignment::Right })
        .block(block);
    f.render_widget(result, area);
}

fn draw_expression(f: &mut Frame, state: &RenderState, area: Rect) {
    let editing = state.input_mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let history_indicator = state
        .history_index
        .map(|i| format!(" [{}/{}]", i + 1, state.history.len()))
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" Expression{} ", history_indicator));

    let input = Paragraph::new(state.expression.as_str())
        .alignment(if editing { Alignment::Left } else { Alignment::Right })
        .block(block);
    f.render_widget(input, area);

    // Cursor
    if editing {
        let offset = state
            .expression
            .get(..state.cursor_position)
            .map(|s| s.chars().count())
            .unwrap_or(0) as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + offset + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_grid(f: &mut Frame, state: &RenderState, area: Rect) {
    let focused = state.input_mode == InputMode::Normal;
    for (index, (label, cell)) in CONTROL_LABELS.iter().zip(grid_cells(area)).enumerate() {
        let selected = focused && index == state.selected_control;
        f.render_widget(ui::render_control(label, selected, state.is_pending), cell);
    }
}

fn draw_help_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(70, 80, area);

    let help_text = format!(
        r#"
 {} {} - Keyboard Shortcuts

 BUTTONS
   0-9 . + - %        Press the matching button
   * or x             Multiply (X)
   /                  Divide (÷)
   =                  Evaluate
   Arrows             Move selection
   Enter / Space      Press selected button
   Mouse click        Press button / edit expression

 EXPRESSION
   e / i              Edit expression
   Enter              Evaluate (while editing)
   Ctrl+U             Clear (while editing)
   Esc                Stop editing

 EVALUATION
   Ctrl+X             Cancel pending evaluation
   Ctrl+↑ / Ctrl+↓    Browse history

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Evaluator: {}

 Press any key to close...
"#,
        APP_NAME, APP_VERSION, state.evaluator_url
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
